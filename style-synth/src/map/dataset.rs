use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of quantile breakpoints every ramp is built from.
pub const QUANTILE_COUNT: usize = 5;

/// One field of a dataset.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DataAttribute {
    pub field: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pre-computed breakpoints in ascending order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantiles5: Option<[f64; QUANTILE_COUNT]>,
}

/// A tiled data source which map layers visualize.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub min_zoom: f64,
    pub max_zoom: f64,
    #[serde(default)]
    pub data_attributes: Vec<DataAttribute>,
}

impl Dataset {
    pub fn attribute(&self, field: &str) -> Result<&DataAttribute> {
        self.data_attributes
            .iter()
            .find(|attribute| attribute.field == field)
            .ok_or_else(|| Error::AttributeNotFound {
                attribute: field.to_string(),
                dataset_id: self.id.clone(),
            })
    }

    /// Checks `min_zoom < max_zoom`.
    pub fn validate(&self) -> Result<()> {
        if self.min_zoom < self.max_zoom {
            Ok(())
        } else {
            Err(Error::InvalidZoomRange {
                dataset_id: self.id.clone(),
                min_zoom: self.min_zoom,
                max_zoom: self.max_zoom,
            })
        }
    }
}
