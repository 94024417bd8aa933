//! wgpu renderers for the scene's draw commands.
//!
//! One renderer per command kind. Each builds its pipeline lazily on the
//! first frame and again if the surface format changes. [`SceneRenderer`]
//! interleaves them in paint order.

mod ctx;
mod scene;
pub mod shapes;

pub use ctx::{RenderCtx, RenderTarget};
pub use scene::SceneRenderer;
