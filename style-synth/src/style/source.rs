//! Style source declarations.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// String url to a tile.
pub type TileUrl = String;

/// String url to a JSON tile.
pub type TileJSONUrl = String;

/// Tiles can be positioned using either the xyz coordinates or the TMS (Tile Map Service) protocol.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum TileAddressingScheme {
    #[serde(rename = "xyz")]
    XYZ,
    #[serde(rename = "tms")]
    TMS,
}

/// GeoJSON data, either an inline JSON value or a URL pointing to a GeoJSON file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum GeoJsonData {
    Url(String),
    Inline(Value),
}

/// Source properties for a GeoJSON source.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GeoJsonSource {
    pub data: GeoJsonData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Source properties for tiles or rasters.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct TileSource {
    /// URL to a TileJSON resource describing the tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<TileJSONUrl>,
    /// Array of URLs which can contain place holders like {x}, {y}, {z}.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tiles: Option<Vec<TileUrl>>,
    /// String which contains attribution information for the used tiles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attribution: Option<String>,
    /// The bounds in which tiles are available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<(f64, f64, f64, f64)>,
    /// Max zoom level at which tiles are available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxzoom: Option<f64>,
    /// Min zoom level at which tiles are available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minzoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<TileAddressingScheme>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageSource {
    pub url: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VideoSource {
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
pub enum Source {
    #[serde(rename = "vector")]
    Vector(TileSource),
    #[serde(rename = "raster")]
    Raster(TileSource),
    #[serde(rename = "raster-dem")]
    RasterDem(TileSource),
    #[serde(rename = "geojson")]
    GeoJson(GeoJsonSource),
    #[serde(rename = "image")]
    Image(ImageSource),
    #[serde(rename = "video")]
    Video(VideoSource),
    /// Any other source kind, such as `canvas`, kept as the raw object including its `type`.
    #[serde(untagged)]
    Other(Map<String, Value>),
}

impl Source {
    /// A vector source described by the TileJSON document at `url`.
    pub fn vector_tilejson(url: TileJSONUrl) -> Self {
        Source::Vector(TileSource {
            url: Some(url),
            ..TileSource::default()
        })
    }

    /// Returns a copy of this source with every resource URL passed through `expand`.
    ///
    /// Covers `url` and `tiles` of tiled sources, `data` of GeoJSON sources when it is a URL and
    /// `url` of image sources. Untyped sources get the same treatment for whichever of these keys
    /// they carry.
    pub fn map_urls<F>(&self, expand: F) -> Source
    where
        F: Fn(&str) -> String,
    {
        let map_tiles = |source: &TileSource| TileSource {
            url: source.url.as_deref().map(&expand),
            tiles: source
                .tiles
                .as_ref()
                .map(|tiles| tiles.iter().map(|tile| expand(tile.as_str())).collect()),
            ..source.clone()
        };

        match self {
            Source::Vector(source) => Source::Vector(map_tiles(source)),
            Source::Raster(source) => Source::Raster(map_tiles(source)),
            Source::RasterDem(source) => Source::RasterDem(map_tiles(source)),
            Source::GeoJson(source) => Source::GeoJson(GeoJsonSource {
                data: match &source.data {
                    GeoJsonData::Url(url) => GeoJsonData::Url(expand(url.as_str())),
                    inline => inline.clone(),
                },
                ..source.clone()
            }),
            Source::Image(source) => Source::Image(ImageSource {
                url: expand(source.url.as_str()),
                extra: source.extra.clone(),
            }),
            Source::Video(source) => Source::Video(source.clone()),
            Source::Other(source) => Source::Other(
                source
                    .iter()
                    .map(|(key, value)| {
                        let value = match (key.as_str(), value) {
                            ("url" | "data", Value::String(url)) => Value::from(expand(url.as_str())),
                            ("tiles", Value::Array(tiles)) => Value::Array(
                                tiles
                                    .iter()
                                    .map(|tile| match tile {
                                        Value::String(url) => Value::from(expand(url.as_str())),
                                        other => other.clone(),
                                    })
                                    .collect(),
                            ),
                            _ => value.clone(),
                        };
                        (key.clone(), value)
                    })
                    .collect(),
            ),
        }
    }
}
