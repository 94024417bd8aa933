//! Time subsystem.
//!
//! `RepaintTimer` is a one-shot deadline a widget arms to request its next
//! repaint. It takes `now` explicitly, so it is testable without a runtime.

mod repaint_timer;

pub use repaint_timer::RepaintTimer;
