//! Geometry in logical pixels: origin top-left, +X right, +Y down.
//!
//! Shaders map these to clip space through the viewport uniform, so CPU code
//! never deals with NDC.

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
