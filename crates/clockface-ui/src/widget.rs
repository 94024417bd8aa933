use std::time::Instant;

use clockface_engine::coords::{Rect, Vec2};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;

// ── Widget trait ──────────────────────────────────────────────────────────

/// The core trait every UI component implements.
///
/// Besides layout and painting, a widget may own timers. The host drives
/// them through the lifecycle hooks:
///
/// 1. `on_attach` once the widget is part of a live tree
/// 2. `poll` whenever the event loop wakes; `true` requests a repaint
/// 3. `next_deadline` tells the event loop how long it may sleep
/// 4. `on_detach` at teardown; no timer may fire afterwards
///
/// ```rust,ignore
/// use clockface_ui::prelude::*;
///
/// pub struct Dot { color: Color }
///
/// impl Widget for Dot {
///     fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
///         c.constrain(Vec2::new(12.0, 12.0))
///     }
///     fn paint(&self, painter: &mut Painter, rect: Rect) {
///         painter.fill_circle(rect.center(), rect.width() / 2.0, self.color);
///     }
/// }
/// ```
pub trait Widget: 'static {
    /// Computes the size this widget wants given the available space.
    ///
    /// Must be deterministic; the parent may call it more than once.
    fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2;

    /// Draws this widget into `painter` within `rect`.
    ///
    /// Painting must not schedule work; timers are armed from the lifecycle
    /// hooks only.
    fn paint(&self, painter: &mut Painter, rect: Rect);

    fn on_attach(&mut self, _now: Instant) {}

    fn on_detach(&mut self) {}

    /// Services elapsed timers. Returns `true` if a repaint is needed.
    fn poll(&mut self, _now: Instant) -> bool {
        false
    }

    /// Earliest pending timer deadline, if any.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget.
///
/// Any `Widget` converts to `Element` via `From` / `Into`.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn measure(&self, constraints: Constraints, ctx: &LayoutCtx) -> Vec2 {
        self.0.measure(constraints, ctx)
    }

    #[inline]
    pub fn paint(&self, painter: &mut Painter, rect: Rect) {
        self.0.paint(painter, rect)
    }

    #[inline]
    pub fn on_attach(&mut self, now: Instant) {
        self.0.on_attach(now)
    }

    #[inline]
    pub fn on_detach(&mut self) {
        self.0.on_detach()
    }

    #[inline]
    pub fn poll(&mut self, now: Instant) -> bool {
        self.0.poll(now)
    }

    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.0.next_deadline()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
