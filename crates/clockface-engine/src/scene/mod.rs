//! Renderer-agnostic draw stream.
//!
//! Widgets record [`DrawCmd`]s into a [`DrawList`]. The list is split into
//! [`DrawRun`]s of one command kind, drawn back to front. Per-shape command
//! types and push helpers live under [`shapes`].

mod cmd;
mod list;

pub mod shapes;

pub use cmd::{DrawCmd, DrawKind};
pub use list::{DrawItem, DrawList, DrawRun, ZIndex};
pub use shapes::{CircleCmd, LineCap, LineCmd, Stroke, TextAnchor, TextCmd};
