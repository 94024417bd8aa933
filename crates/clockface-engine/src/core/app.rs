use std::time::Instant;

use winit::event::WindowEvent;
use winit::window::WindowId;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// When the app next needs a frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Redraw {
    /// Redraw as soon as possible.
    Now,
    /// Sleep until the deadline, then redraw.
    At(Instant),
    /// Nothing pending; sleep until the next platform event.
    Idle,
}

impl Redraw {
    /// Combines two requests, keeping the more urgent one.
    pub fn merge(self, other: Redraw) -> Redraw {
        match (self, other) {
            (Redraw::Now, _) | (_, Redraw::Now) => Redraw::Now,
            (Redraw::At(a), Redraw::At(b)) => Redraw::At(a.min(b)),
            (Redraw::At(a), Redraw::Idle) | (Redraw::Idle, Redraw::At(a)) => Redraw::At(a),
            (Redraw::Idle, Redraw::Idle) => Redraw::Idle,
        }
    }
}

/// Application contract implemented by higher layers.
pub trait App {
    /// Called for window events before the runtime handles them.
    fn on_window_event(&mut self, window_id: WindowId, event: &WindowEvent) -> AppControl {
        let _ = (window_id, event);
        AppControl::Continue
    }

    /// Called once per rendered frame per window.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Asked after every event batch; drives `ControlFlow::WaitUntil`.
    ///
    /// The default keeps redrawing continuously.
    fn poll_redraw(&mut self, now: Instant) -> Redraw {
        let _ = now;
        Redraw::Now
    }

    /// Called once when the event loop is exiting.
    fn on_exit(&mut self) {}
}
