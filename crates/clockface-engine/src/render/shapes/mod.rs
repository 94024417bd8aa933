//! Shape renderers.
//!
//! One renderer per `DrawCmd` variant. `prepare` uploads a frame's
//! instances once; `draw` then records one load/store pass per run.

mod common;

pub mod circle;
pub mod line;
pub mod text;

pub use circle::CircleRenderer;
pub use line::LineRenderer;
pub use text::TextRenderer;
