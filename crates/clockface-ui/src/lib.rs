//! Clockface UI: a small retained widget layer on top of `clockface-engine`
//! plus the analog clock face built with it.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use clockface_ui::prelude::*;
//!
//! let style = ClockStyle::parse(include_str!("clock.style"), CLOCK_BLOCK)?;
//! Application::new()
//!     .title("Clock")
//!     .font("body", font_bytes)
//!     .run_widget(move |fonts| {
//!         let font = fonts.default_font().unwrap_or(FontId::new(0));
//!         ClockFace::with_zone(style, font).into()
//!     });
//! ```
//!
//! # Custom widgets
//!
//! Implement [`Widget`](widget::Widget) for any type and wrap it in an
//! [`Element`](widget::Element). Widgets that need periodic repaints own a
//! [`RepaintTimer`](clockface_engine::time::RepaintTimer) and drive it from
//! `on_attach`, `poll` and `on_detach`.

pub mod app;
pub mod clock;
pub mod constraints;
pub mod painter;
pub mod scene;
pub mod widget;
pub mod widgets;

pub use app::Application;

/// Everything needed to build and host widgets.
pub mod prelude {
    pub use crate::app::{Application, FontMap};
    pub use crate::clock::{
        ClockReading, ClockStyle, FixedClock, HandStyle, StyleError, TimeSource, ZonedClock,
        CLOCK_BLOCK,
    };
    pub use crate::constraints::{Constraints, LayoutCtx};
    pub use crate::painter::Painter;
    pub use crate::scene::UiScene;
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::ClockFace;

    pub use clockface_engine::coords::{Rect, Vec2};
    pub use clockface_engine::paint::Color;
    pub use clockface_engine::scene::{LineCap, Stroke, TextAnchor};
    pub use clockface_engine::text::FontId;
}
