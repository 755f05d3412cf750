//! Style layer definitions.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stores all the styles for a specific layer.
///
/// Base style layers are carried through untouched, so only the fields the generator reads or
/// writes are typed. Everything else lands in `extra`.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StyleLayer {
    pub id: String, // Styles with non-unique layer ids must not exist
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(rename = "source-layer")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paint: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl StyleLayer {
    pub fn paint_property(&self, name: &str) -> Option<&Value> {
        self.paint.as_ref()?.get(name)
    }

    pub fn layout_property(&self, name: &str) -> Option<&Value> {
        self.layout.as_ref()?.get(name)
    }
}

impl Eq for StyleLayer {}
impl PartialEq for StyleLayer {
    fn eq(&self, other: &Self) -> bool {
        self.id.eq(&other.id)
    }
}

impl Hash for StyleLayer {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_survive() {
        let json = r##"{
            "id": "water",
            "type": "fill",
            "source": "openmaptiles",
            "source-layer": "water",
            "interactive": true,
            "paint": {"fill-color": "#aad3df"}
        }"##;
        let layer: StyleLayer = serde_json::from_str(json).unwrap();
        assert_eq!(layer.source_layer.as_deref(), Some("water"));
        assert_eq!(
            layer.paint_property("fill-color"),
            Some(&Value::from("#aad3df"))
        );

        let value = serde_json::to_value(&layer).unwrap();
        assert_eq!(value["interactive"], Value::Bool(true));
        assert_eq!(value["source-layer"], Value::from("water"));
        assert!(value.get("layout").is_none());
    }
}
