//! Settings for the style synthesis

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    style::paint::ZoomFunction,
};

/// Tuning constants used while generating data and label layers.
///
/// Every field has a default, so a settings file only needs to name the values it changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct SynthesisSettings {
    /// Zoom span over which a data layer fades in, starting at the dataset's min zoom.
    pub fade_in_span: f64,
    /// Radius of circles at the lowest quantile.
    pub min_point_radius: f64,
    /// Upper bound of circle radii. The top quantile maps one step below it.
    pub max_point_radius: f64,
    /// Constant color used when an attribute has no quantiles.
    pub fallback_color: String,
    pub outline_color: String,
    pub line_width: ZoomFunction,
    /// Offset of labels placed on circle layers so they do not overlap the circle.
    pub label_text_offset: [f64; 2],
    /// Name of the layer within each dataset's vector tiles.
    pub source_layer: String,
    /// Whether the map definition is copied into `metadata.mapDefinition` of the output.
    pub embed_map_definition: bool,
}

impl Default for SynthesisSettings {
    fn default() -> Self {
        Self {
            fade_in_span: 0.5,
            min_point_radius: 3.0,
            max_point_radius: 20.0,
            fallback_color: "red".to_string(),
            outline_color: "white".to_string(),
            line_width: ZoomFunction {
                base: 1.3,
                stops: vec![(10.0, 2.0), (20.0, 20.0)],
            },
            label_text_offset: [0.0, 2.5],
            source_layer: "data".to_string(),
            embed_map_definition: true,
        }
    }
}

fn invalid(setting: &str, reason: &str) -> Error {
    Error::InvalidSettings {
        setting: setting.to_string(),
        reason: reason.to_string(),
    }
}

impl SynthesisSettings {
    /// Checks that the generated ramps and fades have strictly ascending stops and
    /// non-decreasing radii.
    pub fn validate(&self) -> Result<()> {
        // Negated comparisons so NaN is rejected as well
        if !(self.fade_in_span > 0.0) {
            return Err(invalid("fadeInSpan", "must be greater than 0"));
        }
        if !(self.min_point_radius >= 0.0) {
            return Err(invalid("minPointRadius", "must not be negative"));
        }
        if !(self.min_point_radius <= self.max_point_radius) {
            return Err(invalid(
                "maxPointRadius",
                "must not be less than minPointRadius",
            ));
        }
        if self.line_width.stops.is_empty() {
            return Err(invalid("lineWidth", "needs at least one stop"));
        }
        if !self
            .line_width
            .stops
            .windows(2)
            .all(|pair| pair[0].0 < pair[1].0)
        {
            return Err(invalid("lineWidth", "stop zooms must be strictly ascending"));
        }
        Ok(())
    }
}
