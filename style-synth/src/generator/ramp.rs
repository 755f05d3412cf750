//! Data-driven visual encodings: color and radius ramps over an attribute's quantiles, and the
//! zoom-based opacity fade-in of data layers.

use serde_json::{json, Value};

use crate::{
    error::{Error, Result},
    map::{DataAttribute, Dataset, MapLayer, QUANTILE_COUNT},
    settings::SynthesisSettings,
    style::paint::StyleProperty,
};

/// `["interpolate", ["linear"], input, stop0, value0, stop1, value1, ..]`
fn linear_interpolation<I>(input: Value, stops: I) -> Value
where
    I: IntoIterator<Item = (f64, Value)>,
{
    let mut expression = vec![json!("interpolate"), json!(["linear"]), input];
    for (stop, value) in stops {
        expression.push(json!(stop));
        expression.push(value);
    }
    Value::Array(expression)
}

fn get_attribute(field: &str) -> Value {
    json!(["get", field])
}

fn required_quantiles<'a>(
    attribute: &'a DataAttribute,
    dataset: &Dataset,
) -> Result<&'a [f64; QUANTILE_COUNT]> {
    attribute
        .quantiles5
        .as_ref()
        .ok_or_else(|| Error::MissingQuantiles {
            attribute: attribute.field.clone(),
            dataset_id: dataset.id.clone(),
        })
}

/// Interpolates the layer's palette across the attribute's quantiles.
///
/// Falls back to a constant color when the attribute has no quantiles.
pub fn color_ramp(
    layer: &MapLayer,
    dataset: &Dataset,
    settings: &SynthesisSettings,
) -> Result<StyleProperty<String>> {
    let attribute = dataset.attribute(&layer.dataset_attribute)?;

    let quantiles = match &attribute.quantiles5 {
        Some(quantiles) => quantiles,
        None => {
            log::warn!(
                "attribute '{}' of dataset '{}' has no quantiles, using fallback color",
                attribute.field,
                dataset.id
            );
            return Ok(StyleProperty::Constant(settings.fallback_color.clone()));
        }
    };

    let colors = layer.palette.ordered(layer.palette_inverted);
    if colors.len() < QUANTILE_COUNT {
        return Err(Error::PaletteTooShort {
            layer_id: layer.layer_id.clone(),
            expected: QUANTILE_COUNT,
            found: colors.len(),
        });
    }
    if let Some(invalid) = colors
        .iter()
        .find(|color| csscolorparser::parse(color).is_err())
    {
        return Err(Error::InvalidColor {
            layer_id: layer.layer_id.clone(),
            color: invalid.to_string(),
        });
    }

    let stops = quantiles
        .iter()
        .zip(colors)
        .map(|(quantile, color)| (*quantile, Value::from(color)));

    Ok(StyleProperty::Expression(linear_interpolation(
        get_attribute(&attribute.field),
        stops,
    )))
}

/// Radii for the quantile breakpoints, starting at the minimum radius in equal steps.
///
/// The range is split into [`QUANTILE_COUNT`] steps, so the last breakpoint sits one step below
/// the maximum radius.
pub fn radius_stops(settings: &SynthesisSettings) -> [f64; QUANTILE_COUNT] {
    let step = (settings.max_point_radius - settings.min_point_radius) / QUANTILE_COUNT as f64;
    let mut radii = [0.0; QUANTILE_COUNT];
    for (i, radius) in radii.iter_mut().enumerate() {
        *radius = settings.min_point_radius + step * i as f64;
    }
    radii
}

/// Interpolates circle radii across the attribute's quantiles. The palette plays no part.
pub fn radius_ramp(
    layer: &MapLayer,
    dataset: &Dataset,
    settings: &SynthesisSettings,
) -> Result<StyleProperty<f64>> {
    let attribute = dataset.attribute(&layer.dataset_attribute)?;
    let quantiles = required_quantiles(attribute, dataset)?;

    let stops = quantiles
        .iter()
        .zip(radius_stops(settings))
        .map(|(quantile, radius)| (*quantile, json!(radius)));

    Ok(StyleProperty::Expression(linear_interpolation(
        get_attribute(&attribute.field),
        stops,
    )))
}

/// Opacity rising from 0 at the dataset's min zoom to the layer opacity `fade_in_span` later.
pub fn opacity_fade_in(
    layer: &MapLayer,
    dataset: &Dataset,
    settings: &SynthesisSettings,
) -> StyleProperty<f64> {
    StyleProperty::Expression(linear_interpolation(
        json!(["zoom"]),
        [
            (dataset.min_zoom, json!(0)),
            (
                dataset.min_zoom + settings.fade_in_span,
                json!(layer.opacity()),
            ),
        ],
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::Map;

    use super::*;
    use crate::{
        map::{LayerType, Palette},
        style::expression::{evaluate, evaluate_number, EvalContext},
    };

    const PALETTE: [&str; 5] = ["#eff3ff", "#bdd7e7", "#6baed6", "#3182bd", "#08519c"];

    fn dataset() -> Dataset {
        serde_json::from_value(json!({
            "id": "ds1",
            "minZoom": 8,
            "maxZoom": 14,
            "dataAttributes": [
                {"field": "density", "quantiles5": [1, 5, 10, 50, 100]},
                {"field": "flat"}
            ]
        }))
        .unwrap()
    }

    fn layer(attribute: &str, inverted: bool) -> MapLayer {
        MapLayer {
            layer_id: "l1".to_string(),
            dataset_id: "ds1".to_string(),
            dataset_attribute: attribute.to_string(),
            layer_type: LayerType::Circle,
            palette: Palette {
                id: None,
                color_stops: PALETTE.iter().map(|c| c.to_string()).collect(),
            },
            palette_inverted: inverted,
            opacity: Some(0.6),
            label_attribute: None,
        }
    }

    fn expression<T>(property: StyleProperty<T>) -> Value {
        match property {
            StyleProperty::Expression(expr) => expr,
            _ => panic!("expected expression"),
        }
    }

    #[test]
    fn test_color_ramp_pairs_quantiles_and_colors() {
        let settings = SynthesisSettings::default();
        let ramp = expression(color_ramp(&layer("density", false), &dataset(), &settings).unwrap());
        assert_eq!(
            ramp,
            json!([
                "interpolate", ["linear"], ["get", "density"],
                1.0, "#eff3ff", 5.0, "#bdd7e7", 10.0, "#6baed6", 50.0, "#3182bd", 100.0, "#08519c"
            ])
        );
    }

    #[test]
    fn test_inverted_ramp_is_stable_across_calls() {
        let settings = SynthesisSettings::default();
        let dataset = dataset();
        let layer = layer("density", true);

        let first = expression(color_ramp(&layer, &dataset, &settings).unwrap());
        let second = expression(color_ramp(&layer, &dataset, &settings).unwrap());
        assert_eq!(first, second);

        // Breakpoints stay ascending, only the colors are reversed
        assert_eq!(first[3], json!(1.0));
        assert_eq!(first[4], json!("#08519c"));
        assert_eq!(first[11], json!(100.0));
        assert_eq!(first[12], json!("#eff3ff"));
        assert_eq!(layer.palette.color_stops[0], "#eff3ff");
    }

    #[test]
    fn test_color_ramp_without_quantiles_falls_back() {
        let settings = SynthesisSettings::default();
        assert_eq!(
            color_ramp(&layer("flat", false), &dataset(), &settings).unwrap(),
            StyleProperty::Constant("red".to_string())
        );
    }

    #[test]
    fn test_ramps_reject_missing_attribute() {
        let settings = SynthesisSettings::default();
        let err = color_ramp(&layer("income", false), &dataset(), &settings).unwrap_err();
        assert!(err.to_string().contains("'income'"));
        assert!(err.to_string().contains("'ds1'"));

        assert!(matches!(
            radius_ramp(&layer("income", false), &dataset(), &settings),
            Err(Error::AttributeNotFound { .. })
        ));
    }

    #[test]
    fn test_short_or_invalid_palette() {
        let settings = SynthesisSettings::default();
        let mut short = layer("density", false);
        short.palette.color_stops.truncate(3);
        assert!(matches!(
            color_ramp(&short, &dataset(), &settings),
            Err(Error::PaletteTooShort { expected: 5, found: 3, .. })
        ));

        let mut invalid = layer("density", false);
        invalid.palette.color_stops[2] = "not-a-color".to_string();
        assert!(matches!(
            color_ramp(&invalid, &dataset(), &settings),
            Err(Error::InvalidColor { color, .. }) if color == "not-a-color"
        ));
    }

    #[test]
    fn test_radius_ramp_is_monotonic_and_bounded() {
        let settings = SynthesisSettings::default();
        let ramp = expression(radius_ramp(&layer("density", false), &dataset(), &settings).unwrap());

        let radii: Vec<f64> = ramp.as_array().unwrap()[3..]
            .chunks(2)
            .map(|pair| pair[1].as_f64().unwrap())
            .collect();
        assert_eq!(radii.len(), 5);
        assert!((radii[0] - 3.0).abs() < 1e-9);
        assert!((radii[4] - 16.6).abs() < 1e-9);
        assert!(radii.windows(2).all(|w| w[0] <= w[1]));
        assert!(radii.iter().all(|r| (3.0..=20.0).contains(r)));

        let mut properties = Map::new();
        properties.insert("density".to_string(), json!(5));
        let at_second_quantile = evaluate_number(&ramp, &EvalContext::new(10.0, &properties));
        assert!((at_second_quantile.unwrap() - 6.4).abs() < 1e-9);
    }

    #[test]
    fn test_radius_ramp_requires_quantiles() {
        let settings = SynthesisSettings::default();
        assert!(matches!(
            radius_ramp(&layer("flat", false), &dataset(), &settings),
            Err(Error::MissingQuantiles { .. })
        ));
    }

    #[test]
    fn test_opacity_fade_in() {
        let settings = SynthesisSettings::default();
        let fade = opacity_fade_in(&layer("density", false), &dataset(), &settings);
        let empty = Map::new();

        let at = |zoom| {
            fade.evaluate(&EvalContext::new(zoom, &empty))
                .and_then(|v| v.as_f64())
                .unwrap()
        };
        assert_eq!(at(8.0), 0.0);
        assert!((at(8.5) - 0.6).abs() < 1e-9);
        assert!((at(8.25) - 0.3).abs() < 1e-9);
        assert_eq!(
            evaluate(&expression(fade), &EvalContext::new(20.0, &empty)),
            Some(json!(0.6))
        );
    }

    #[test]
    fn test_fade_in_span_is_configurable() {
        let settings = SynthesisSettings {
            fade_in_span: 2.0,
            ..SynthesisSettings::default()
        };
        let mut layer = layer("density", false);
        layer.opacity = None;
        let fade = expression(opacity_fade_in(&layer, &dataset(), &settings));
        assert_eq!(
            fade,
            json!(["interpolate", ["linear"], ["zoom"], 8.0, 0, 10.0, 1.0])
        );
    }
}
