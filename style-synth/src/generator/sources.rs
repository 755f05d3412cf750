//! Tile source declarations for the datasets of a map.

use std::collections::BTreeMap;

use crate::{map::MapDefinition, style::source::Source};

/// One vector source per dataset referenced by a layer, keyed by dataset id.
pub fn generate_sources(map: &MapDefinition) -> BTreeMap<String, Source> {
    map.layers
        .iter()
        .map(|layer| {
            (
                layer.dataset_id.clone(),
                Source::vector_tilejson(format!("{}/index.json", layer.dataset_id)),
            )
        })
        .collect()
}

/// Makes a relative resource URL absolute by prepending `base_url` verbatim.
pub fn expand_relative_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("{}{}", base_url, url)
    }
}

/// Returns new sources with every relative `url`, `tiles` entry and GeoJSON `data` URL expanded.
pub fn expand_tile_sources(
    base_url: &str,
    sources: &BTreeMap<String, Source>,
) -> BTreeMap<String, Source> {
    sources
        .iter()
        .map(|(id, source)| {
            (
                id.clone(),
                source.map_urls(|url| expand_relative_url(base_url, url)),
            )
        })
        .collect()
}
