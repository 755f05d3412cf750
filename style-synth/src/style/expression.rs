//! Evaluation of the style expressions emitted for data layers.
//!
//! Supports the subset the generator produces:
//! - literals
//! - `["zoom"]`, `["get", field]`, `["has", field]`
//! - `["interpolate", ["linear"] | ["exponential", base], input, stop, value, ..]`
//! - legacy `{ "base": .., "stops": [[zoom, value], ..] }` zoom functions

use serde::Serialize;
use serde_json::{Map, Value};

use crate::style::paint::{StyleProperty, ZoomFunction};

/// Zoom level and feature properties an expression is evaluated against.
pub struct EvalContext<'a> {
    pub zoom: f64,
    pub properties: &'a Map<String, Value>,
}

impl<'a> EvalContext<'a> {
    pub fn new(zoom: f64, properties: &'a Map<String, Value>) -> Self {
        Self { zoom, properties }
    }
}

pub fn evaluate(expr: &Value, ctx: &EvalContext) -> Option<Value> {
    match expr {
        Value::Array(arr) => evaluate_array(arr, ctx),
        Value::Object(obj) => {
            let function: ZoomFunction = serde_json::from_value(Value::Object(obj.clone())).ok()?;
            evaluate_zoom_function(&function, ctx.zoom).map(Value::from)
        }
        literal => Some(literal.clone()),
    }
}

pub fn evaluate_number(expr: &Value, ctx: &EvalContext) -> Option<f64> {
    evaluate(expr, ctx)?.as_f64()
}

fn evaluate_array(arr: &[Value], ctx: &EvalContext) -> Option<Value> {
    let op = arr.first()?.as_str()?;
    match op {
        "zoom" => Some(Value::from(ctx.zoom)),
        "get" => ctx.properties.get(arr.get(1)?.as_str()?).cloned(),
        "has" => Some(Value::Bool(
            ctx.properties.contains_key(arr.get(1)?.as_str()?),
        )),
        "interpolate" => evaluate_interpolate(arr, ctx),
        _ => None,
    }
}

fn evaluate_interpolate(arr: &[Value], ctx: &EvalContext) -> Option<Value> {
    if arr.len() < 5 {
        return None;
    }

    let base = match arr.get(1)?.as_array()?.as_slice() {
        [kind] if kind.as_str() == Some("linear") => 1.0,
        [kind, base] if kind.as_str() == Some("exponential") => base.as_f64()?,
        _ => return None,
    };
    let input = evaluate_number(arr.get(2)?, ctx)?;

    let stops = arr[3..]
        .chunks(2)
        .map(|chunk| match chunk {
            [stop, value] => Some((stop.as_f64()?, value)),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    // Colors are not interpolated, the stop at or below the input wins
    let numeric = stops.iter().all(|(_, value)| value.is_number());
    if !numeric {
        let (_, value) = stops
            .iter()
            .rev()
            .find(|(stop, _)| *stop <= input)
            .or_else(|| stops.first())?;
        return Some((*value).clone());
    }

    let numbers: Vec<(f64, f64)> = stops
        .iter()
        .map(|(stop, value)| Some((*stop, value.as_f64()?)))
        .collect::<Option<_>>()?;
    interpolate_stops(&numbers, base, input).map(Value::from)
}

fn evaluate_zoom_function(function: &ZoomFunction, zoom: f64) -> Option<f64> {
    interpolate_stops(&function.stops, function.base, zoom)
}

/// Piecewise interpolation over ascending stops, clamped to the first and last value.
fn interpolate_stops(stops: &[(f64, f64)], base: f64, input: f64) -> Option<f64> {
    let (first, last) = (stops.first()?, stops.last()?);
    if input <= first.0 {
        return Some(first.1);
    }
    if input >= last.0 {
        return Some(last.1);
    }

    stops.windows(2).find_map(|pair| {
        let ((low, low_value), (high, high_value)) = (pair[0], pair[1]);
        if input < low || input > high {
            return None;
        }
        let range = high - low;
        let t = if range == 0.0 {
            0.0
        } else if base == 1.0 {
            (input - low) / range
        } else {
            (base.powf(input - low) - 1.0) / (base.powf(range) - 1.0)
        };
        Some(low_value + t * (high_value - low_value))
    })
}

impl<T: Serialize> StyleProperty<T> {
    pub fn evaluate(&self, ctx: &EvalContext) -> Option<Value> {
        match self {
            StyleProperty::Constant(value) => serde_json::to_value(value).ok(),
            StyleProperty::Function(function) => {
                evaluate_zoom_function(function, ctx.zoom).map(Value::from)
            }
            StyleProperty::Expression(expr) => evaluate(expr, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_linear_zoom_interpolation() {
        let expr = json!(["interpolate", ["linear"], ["zoom"], 8, 0, 8.5, 0.6]);
        let empty = Map::new();
        let at = |zoom| evaluate_number(&expr, &EvalContext::new(zoom, &empty)).unwrap();

        assert_eq!(at(7.0), 0.0);
        assert_eq!(at(8.0), 0.0);
        assert!((at(8.25) - 0.3).abs() < 1e-9);
        assert!((at(8.5) - 0.6).abs() < 1e-9);
        assert!((at(12.0) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_color_stops_pick_lower_stop() {
        let expr = json!(["interpolate", ["linear"], ["get", "v"], 1, "a", 2, "b", 3, "c"]);
        let properties = props(json!({"v": 2.5}));
        assert_eq!(
            evaluate(&expr, &EvalContext::new(0.0, &properties)),
            Some(json!("b"))
        );
        let properties = props(json!({"v": 0}));
        assert_eq!(
            evaluate(&expr, &EvalContext::new(0.0, &properties)),
            Some(json!("a"))
        );
    }

    #[test]
    fn test_missing_property_yields_none() {
        let expr = json!(["interpolate", ["linear"], ["get", "v"], 1, 3, 2, 6]);
        let empty = Map::new();
        assert_eq!(evaluate(&expr, &EvalContext::new(0.0, &empty)), None);
        assert_eq!(
            evaluate(&json!(["has", "v"]), &EvalContext::new(0.0, &empty)),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn test_exponential_zoom_function() {
        let function = StyleProperty::<f64>::Function(ZoomFunction {
            base: 1.3,
            stops: vec![(10.0, 2.0), (20.0, 20.0)],
        });
        let empty = Map::new();
        let at = |zoom| {
            function
                .evaluate(&EvalContext::new(zoom, &empty))
                .and_then(|v| v.as_f64())
                .unwrap()
        };

        assert_eq!(at(10.0), 2.0);
        assert_eq!(at(20.0), 20.0);
        // Exponential curves stay below the linear midpoint
        assert!(at(15.0) < 11.0);
        assert!(at(15.0) > 2.0);
    }
}
