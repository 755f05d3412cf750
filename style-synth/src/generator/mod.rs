//! Synthesis of a renderer style from a base style and a map definition.

use crate::{
    error::{Error, Result},
    map::MapDefinition,
    settings::SynthesisSettings,
    style::Style,
};

pub mod insert;
pub mod layers;
pub mod ramp;
pub mod sources;

use self::{
    insert::{insert_layer, insertion_point, LABEL_INSERTION_POINT},
    layers::{generate_data_layer, generate_label_layer},
    sources::{expand_tile_sources, generate_sources},
};

/// Merges the data and label layers of a map definition into a base style.
#[derive(Debug, Clone, Default)]
pub struct StyleGenerator {
    settings: SynthesisSettings,
}

impl StyleGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SynthesisSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SynthesisSettings {
        &self.settings
    }

    /// Produces the style for `map` on top of `base`.
    ///
    /// The base style is consumed and a new style is returned, so every call needs its own copy
    /// of the base style. Any error aborts the synthesis and no partial style is returned.
    /// Invalid settings are reported before any layer is generated.
    ///
    /// # Arguments
    ///
    /// * `base` - Base style carrying `metadata.insertionPoints` and, if any layer is labelled,
    ///   `metadata.labelLayerStyle`.
    /// * `map` - The thematic map to render.
    /// * `base_url` - Prefix for relative source URLs, used verbatim.
    pub fn generate(&self, base: Style, map: &MapDefinition, base_url: &str) -> Result<Style> {
        self.settings.validate()?;
        let mut style = base;

        if self.settings.embed_map_definition {
            style.metadata.map_definition = Some(map.clone());
        }
        style.zoom = map.zoom.or(style.zoom);
        style.center = map.center.or(style.center);

        let mut sources = style.sources;
        sources.extend(generate_sources(map));
        style.sources = expand_tile_sources(base_url, &sources);
        log::debug!("style has {} sources", style.sources.len());

        for layer in &map.layers {
            let dataset = map.dataset_for_layer(layer)?;
            let data_layer = generate_data_layer(layer, dataset, &self.settings)?;
            let anchor = insertion_point(&style.metadata, layer.layer_type.as_str())?;
            insert_layer(&mut style.layers, anchor, data_layer)?;
        }

        let mut labelled = map.labelled_layers().peekable();
        if labelled.peek().is_some() {
            let template = style
                .metadata
                .label_layer_style
                .clone()
                .ok_or_else(|| Error::MissingLabelLayerStyle {
                    basemap: style.basemap_name().to_string(),
                })?;
            let anchor = insertion_point(&style.metadata, LABEL_INSERTION_POINT)?.to_string();

            for layer in labelled {
                if let Some(label_layer) = generate_label_layer(layer, &template, &self.settings) {
                    insert_layer(&mut style.layers, &anchor, label_layer)?;
                }
            }
        }

        log::info!(
            "generated style for map {} with {} layers ({} from map definition)",
            map.name.as_deref().unwrap_or("<unnamed>"),
            style.layers.len(),
            map.layers.len() + map.labelled_layers().count(),
        );

        Ok(style)
    }
}

/// Generates a style with the default [`SynthesisSettings`].
pub fn generate_map_style(base: Style, map: &MapDefinition, base_url: &str) -> Result<Style> {
    StyleGenerator::new().generate(base, map, base_url)
}
