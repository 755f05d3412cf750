//! Placement of generated layers at the anchors a base style declares.

use crate::{
    error::{Error, Result},
    style::{layer::StyleLayer, StyleMetadata},
};

/// Insertion point category of label layers. Data layers use their layer type.
pub const LABEL_INSERTION_POINT: &str = "label";

/// Where an anchor layer was found in a layer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Found(usize),
    Missing,
}

impl Anchor {
    pub fn locate(layers: &[StyleLayer], anchor_id: &str) -> Anchor {
        layers
            .iter()
            .position(|layer| layer.id == anchor_id)
            .map_or(Anchor::Missing, Anchor::Found)
    }
}

/// Looks up the anchor layer id for a category in the style's metadata.
pub fn insertion_point<'a>(metadata: &'a StyleMetadata, category: &str) -> Result<&'a str> {
    metadata
        .insertion_points
        .get(category)
        .map(String::as_str)
        .ok_or_else(|| Error::MissingInsertionPoint {
            category: category.to_string(),
        })
}

/// Inserts `layer` immediately before the layer with id `anchor_id` and returns its index.
///
/// Fails if the anchor does not exist or the layer id is already taken.
pub fn insert_layer(layers: &mut Vec<StyleLayer>, anchor_id: &str, layer: StyleLayer) -> Result<usize> {
    if layers.iter().any(|existing| existing.id == layer.id) {
        return Err(Error::DuplicateLayerId(layer.id));
    }

    match Anchor::locate(layers, anchor_id) {
        Anchor::Found(index) => {
            log::debug!("inserting layer {} before {}", layer.id, anchor_id);
            layers.insert(index, layer);
            Ok(index)
        }
        Anchor::Missing => Err(Error::AnchorNotFound {
            anchor: anchor_id.to_string(),
            layer_id: layer.id,
        }),
    }
}
