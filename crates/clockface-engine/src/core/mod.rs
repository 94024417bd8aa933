//! Contract between the window runtime and the layers above it.
//!
//! The runtime calls [`App`] hooks; apps draw through [`FrameCtx`] and say
//! when they next need a frame with [`Redraw`].

mod app;
mod ctx;

pub use app::{App, AppControl, Redraw};
pub use ctx::{FrameCtx, WindowCtx};
