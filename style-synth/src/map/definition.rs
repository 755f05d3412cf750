use std::{fmt, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    map::Dataset,
};

/// Geometry kind a map layer is drawn as.
///
/// Anything other than `fill`, `circle` or `line` is rejected when parsing.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum LayerType {
    Fill,
    Circle,
    Line,
}

impl LayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayerType::Fill => "fill",
            LayerType::Circle => "circle",
            LayerType::Line => "line",
        }
    }
}

impl fmt::Display for LayerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayerType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "fill" => Ok(LayerType::Fill),
            "circle" => Ok(LayerType::Circle),
            "line" => Ok(LayerType::Line),
            other => Err(Error::UnsupportedLayerType(other.to_string())),
        }
    }
}

impl TryFrom<String> for LayerType {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Ordered colors a ramp interpolates through, lowest quantile first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Palette {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub color_stops: Vec<String>,
}

impl Palette {
    /// Returns the colors in ramp order. The palette itself is never reordered.
    pub fn ordered(&self, inverted: bool) -> Vec<&str> {
        let mut colors: Vec<&str> = self.color_stops.iter().map(String::as_str).collect();
        if inverted {
            colors.reverse();
        }
        colors
    }
}

/// One visual layer over one dataset attribute.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MapLayer {
    pub layer_id: String,
    pub dataset_id: String,
    pub dataset_attribute: String,
    pub layer_type: LayerType,
    #[serde(default)]
    pub palette: Palette,
    #[serde(default)]
    pub palette_inverted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_attribute: Option<String>,
}

impl MapLayer {
    pub fn opacity(&self) -> f64 {
        self.opacity.unwrap_or(1.0)
    }
}

/// The user's thematic map.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default)]
    pub layers: Vec<MapLayer>,
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

impl MapDefinition {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn dataset(&self, id: &str) -> Option<&Dataset> {
        self.datasets.iter().find(|dataset| dataset.id == id)
    }

    pub fn dataset_for_layer(&self, layer: &MapLayer) -> Result<&Dataset> {
        self.dataset(&layer.dataset_id)
            .ok_or_else(|| Error::DatasetNotFound {
                layer_id: layer.layer_id.clone(),
                dataset_id: layer.dataset_id.clone(),
            })
    }

    /// Layers which carry a label attribute, in definition order.
    pub fn labelled_layers(&self) -> impl Iterator<Item = &MapLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.label_attribute.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_map_definition() {
        let json = r##"{
            "name": "Air quality",
            "zoom": 10,
            "center": [-0.12, 51.5],
            "layers": [{
                "layerId": "l1",
                "datasetId": "ds1",
                "datasetAttribute": "no2",
                "layerType": "circle",
                "palette": {"id": "reds", "colorStops": ["#fee5d9", "#fcae91", "#fb6a4a", "#de2d26", "#a50f15"]},
                "paletteInverted": true,
                "labelAttribute": "site"
            }],
            "datasets": [{"id": "ds1", "minZoom": 6, "maxZoom": 16, "dataAttributes": []}]
        }"##;
        let map = MapDefinition::from_json_str(json).unwrap();
        assert_eq!(map.name.as_deref(), Some("Air quality"));
        assert_eq!(map.center, Some([-0.12, 51.5]));

        let layer = &map.layers[0];
        assert_eq!(layer.layer_type, LayerType::Circle);
        assert!(layer.palette_inverted);
        assert_eq!(layer.opacity(), 1.0);
        assert_eq!(map.dataset_for_layer(layer).unwrap().min_zoom, 6.0);
        assert_eq!(map.labelled_layers().count(), 1);
    }

    #[test]
    fn test_unsupported_layer_type_is_rejected() {
        assert!(matches!(
            "heatmap".parse::<LayerType>(),
            Err(Error::UnsupportedLayerType(t)) if t == "heatmap"
        ));

        let json = r#"{"layerId": "l", "datasetId": "d", "datasetAttribute": "a", "layerType": "symbol"}"#;
        let err = serde_json::from_str::<MapLayer>(json).unwrap_err();
        assert!(err.to_string().contains("unsupported layer type 'symbol'"));
    }

    #[test]
    fn test_inverted_palette_leaves_palette_untouched() {
        let palette = Palette {
            id: None,
            color_stops: vec!["a".into(), "b".into(), "c".into()],
        };
        assert_eq!(palette.ordered(true), vec!["c", "b", "a"]);
        assert_eq!(palette.ordered(true), vec!["c", "b", "a"]);
        assert_eq!(palette.ordered(false), vec!["a", "b", "c"]);
        assert_eq!(palette.color_stops, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_dataset() {
        let map = MapDefinition {
            layers: vec![MapLayer {
                layer_id: "l1".into(),
                dataset_id: "nope".into(),
                dataset_attribute: "a".into(),
                layer_type: LayerType::Fill,
                palette: Palette::default(),
                palette_inverted: false,
                opacity: None,
                label_attribute: None,
            }],
            ..Default::default()
        };
        assert!(matches!(
            map.dataset_for_layer(&map.layers[0]),
            Err(Error::DatasetNotFound { .. })
        ));
    }
}
