//! Window, GPU and drawing layer for clockface.
//!
//! | Module | Role |
//! |--------|------|
//! | [`window`] | `winit` event loop hosting one window |
//! | [`device`] | wgpu device and surface |
//! | [`core`] | `App` trait, per-frame context, redraw requests |
//! | [`scene`] | recorded draw commands |
//! | [`render`] | SDF circle and line renderers, glyph-atlas text |
//! | [`text`] | font loading and measurement |
//! | [`time`] | one-shot repaint timer |
//! | [`logging`] | `env_logger` setup |

pub mod core;
pub mod device;
pub mod time;
pub mod window;

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
pub mod text;
