//! # style-synth
//!
//! Turns a thematic map definition into a renderer-ready map style.
//!
//! A base style (any MapLibre/Mapbox GL style extended with `metadata.insertionPoints` and
//! `metadata.labelLayerStyle`) is merged with one vector source per dataset and one data layer,
//! plus an optional label layer, per map layer. Colors and circle radii are interpolated over
//! pre-computed attribute quantiles.
//!
//! ### Example
//!
//! ```no_run
//! use style_synth::{generator::StyleGenerator, map::MapDefinition, style::Style};
//!
//! # fn main() -> style_synth::error::Result<()> {
//! let base = Style::load("basemap.json")?;
//! let map = MapDefinition::load("map.json")?;
//! let style = StyleGenerator::new().generate(base, &map, "https://tiles.example.org/")?;
//! println!("{}", style.to_json_string_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod map;
pub mod settings;
pub mod style;

pub use generator::{generate_map_style, StyleGenerator};
pub use settings::SynthesisSettings;
