//! Base and synthesized style documents.

use std::{collections::BTreeMap, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::Result,
    map::MapDefinition,
    style::{layer::StyleLayer, source::Source},
};

/// Shared layout and paint every generated label layer starts from.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct LabelLayerStyle {
    #[serde(default)]
    pub layout: Map<String, Value>,
    #[serde(default)]
    pub paint: Map<String, Value>,
}

/// The `metadata` object of a style, extended with the anchors generated layers are placed at.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct StyleMetadata {
    /// Layer category (a layer type or `label`) to the id of the layer generated layers go before.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub insertion_points: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_layer_style: Option<LabelLayerStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_definition: Option<MapDefinition>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Stores the style for a multi-layered map.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Style {
    #[serde(default = "default_version")]
    pub version: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: StyleMetadata,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[f64; 2]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pitch: Option<f64>,
    #[serde(default)]
    pub sources: BTreeMap<String, Source>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// A sprite URL or, in newer styles, an array of `{ "id", "url" }` sprites.
    pub sprite: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    #[serde(default)]
    pub layers: Vec<StyleLayer>,

    // to allow for extra fields in the style
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn default_version() -> u16 {
    8
}

impl Default for Style {
    fn default() -> Self {
        Style {
            version: default_version(),
            name: None,
            metadata: Default::default(),
            center: None,
            zoom: None,
            bearing: None,
            pitch: None,
            sources: Default::default(),
            sprite: None,
            glyphs: None,
            layers: Default::default(),
            extra: Default::default(),
        }
    }
}

impl Style {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Name used to refer to this style in errors.
    pub fn basemap_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }

    pub fn layer_by_id(&self, id: &str) -> Option<&StyleLayer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    pub fn layer_index(&self, id: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id == id)
    }
}
