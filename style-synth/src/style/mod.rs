//! Renderer style document model.

pub mod expression;
pub mod layer;
pub mod paint;
pub mod source;
mod style;

pub use style::*;
