//! Font loading and text measurement.
//!
//! Glyph rasterization lives in `render::shapes::text`; this module only
//! owns parsed fonts so both the UI layer and the renderer can share them.

mod font_system;

pub use font_system::{FontId, FontLoadError, FontSystem};
