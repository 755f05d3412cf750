//! Errors which can happen while synthesizing a map style.

use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A label layer was requested but the base style has no shared label template
    #[error("no label layer style for basemap {basemap}")]
    MissingLabelLayerStyle { basemap: String },
    #[error("dataset '{dataset_id}' referenced by layer '{layer_id}' not found in map definition")]
    DatasetNotFound { layer_id: String, dataset_id: String },
    #[error("data attribute '{attribute}' not found on dataset '{dataset_id}'")]
    AttributeNotFound {
        attribute: String,
        dataset_id: String,
    },
    /// The radius ramp has no constant fallback
    #[error("data attribute '{attribute}' on dataset '{dataset_id}' has no quantiles")]
    MissingQuantiles {
        attribute: String,
        dataset_id: String,
    },
    #[error("palette of layer '{layer_id}' has {found} colors, {expected} required")]
    PaletteTooShort {
        layer_id: String,
        expected: usize,
        found: usize,
    },
    #[error("palette of layer '{layer_id}' contains invalid color '{color}'")]
    InvalidColor { layer_id: String, color: String },
    #[error("dataset '{dataset_id}' has invalid zoom range {min_zoom}..{max_zoom}")]
    InvalidZoomRange {
        dataset_id: String,
        min_zoom: f64,
        max_zoom: f64,
    },
    #[error("unsupported layer type '{0}', expected one of fill, circle, line")]
    UnsupportedLayerType(String),
    #[error("base style defines no insertion point for '{category}'")]
    MissingInsertionPoint { category: String },
    #[error("anchor layer '{anchor}' for layer '{layer_id}' not found in base style")]
    AnchorNotFound { anchor: String, layer_id: String },
    #[error("layer id '{0}' already exists in style")]
    DuplicateLayerId(String),
    #[error("invalid synthesis setting '{setting}': {reason}")]
    InvalidSettings { setting: String, reason: String },
    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
