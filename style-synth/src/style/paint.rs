//! Paint blocks of generated data layers.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::{Error, Result},
    map::LayerType,
};

/// A zoom function in the legacy `{ "base": .., "stops": [[zoom, value], ..] }` form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ZoomFunction {
    pub base: f64,
    pub stops: Vec<(f64, f64)>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum StyleProperty<T> {
    Constant(T),
    Function(ZoomFunction),
    Expression(Value),
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FillPaint {
    #[serde(rename = "fill-color")]
    pub fill_color: StyleProperty<String>,
    #[serde(rename = "fill-outline-color")]
    pub fill_outline_color: StyleProperty<String>,
    #[serde(rename = "fill-opacity")]
    pub fill_opacity: StyleProperty<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CirclePaint {
    #[serde(rename = "circle-color")]
    pub circle_color: StyleProperty<String>,
    #[serde(rename = "circle-radius")]
    pub circle_radius: StyleProperty<f64>,
    #[serde(rename = "circle-opacity")]
    pub circle_opacity: StyleProperty<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LinePaint {
    #[serde(rename = "line-color")]
    pub line_color: StyleProperty<String>,
    #[serde(rename = "line-width")]
    pub line_width: StyleProperty<f64>,
    #[serde(rename = "line-opacity")]
    pub line_opacity: StyleProperty<f64>,
}

/// The paint block of a data layer, one variant per [`LayerType`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum LayerPaint {
    Fill(FillPaint),
    Circle(CirclePaint),
    Line(LinePaint),
}

impl LayerPaint {
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerPaint::Fill(_) => LayerType::Fill,
            LayerPaint::Circle(_) => LayerType::Circle,
            LayerPaint::Line(_) => LayerType::Line,
        }
    }

    pub fn color(&self) -> &StyleProperty<String> {
        match self {
            LayerPaint::Fill(paint) => &paint.fill_color,
            LayerPaint::Circle(paint) => &paint.circle_color,
            LayerPaint::Line(paint) => &paint.line_color,
        }
    }

    pub fn opacity(&self) -> &StyleProperty<f64> {
        match self {
            LayerPaint::Fill(paint) => &paint.fill_opacity,
            LayerPaint::Circle(paint) => &paint.circle_opacity,
            LayerPaint::Line(paint) => &paint.line_opacity,
        }
    }

    /// Serializes into the untyped paint object stored on a [`crate::style::layer::StyleLayer`].
    pub fn into_map(self) -> Result<Map<String, Value>> {
        let mut map = Map::new();
        match self {
            LayerPaint::Fill(paint) => {
                map.insert("fill-color".to_string(), serde_json::to_value(paint.fill_color)?);
                map.insert(
                    "fill-outline-color".to_string(),
                    serde_json::to_value(paint.fill_outline_color)?,
                );
                map.insert("fill-opacity".to_string(), serde_json::to_value(paint.fill_opacity)?);
            }
            LayerPaint::Circle(paint) => {
                map.insert("circle-color".to_string(), serde_json::to_value(paint.circle_color)?);
                map.insert("circle-radius".to_string(), serde_json::to_value(paint.circle_radius)?);
                map.insert(
                    "circle-opacity".to_string(),
                    serde_json::to_value(paint.circle_opacity)?,
                );
            }
            LayerPaint::Line(paint) => {
                map.insert("line-color".to_string(), serde_json::to_value(paint.line_color)?);
                map.insert("line-width".to_string(), serde_json::to_value(paint.line_width)?);
                map.insert("line-opacity".to_string(), serde_json::to_value(paint.line_opacity)?);
            }
        }
        Ok(map)
    }
}

/// Name of the opacity paint property for a layer type.
pub fn opacity_property(layer_type: LayerType) -> &'static str {
    match layer_type {
        LayerType::Fill => "fill-opacity",
        LayerType::Circle => "circle-opacity",
        LayerType::Line => "line-opacity",
    }
}

impl TryFrom<&str> for LayerPaint {
    type Error = Error;

    /// Parses a paint object of a generated layer.
    fn try_from(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
