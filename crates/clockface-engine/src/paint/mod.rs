//! Color model: linear, premultiplied RGBA.

mod color;

pub use color::Color;
