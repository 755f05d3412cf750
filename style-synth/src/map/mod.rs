//! The thematic map definition which is turned into a style.

mod dataset;
mod definition;

pub use dataset::*;
pub use definition::*;
