use std::cell::Cell;
use std::time::Instant;

use clockface_engine::coords::{Rect, Vec2};
use clockface_engine::text::FontId;
use clockface_engine::time::RepaintTimer;

use crate::clock::{paint_clock, ClockReading, ClockStyle, TimeSource, ZonedClock};
use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Widget;

/// Side length used when the parent leaves both axes unbounded.
const FALLBACK_SIDE: f32 = 600.0;

/// Analog clock face that repaints itself once per refresh period.
///
/// Every paint samples the time source afresh. The repaint timer is armed
/// when the widget is attached and re-armed each time it fires, so at most
/// one deadline is ever pending.
///
/// # Example
/// ```rust,ignore
/// let style = ClockStyle::default();
/// ClockFace::with_zone(style, font)
/// ```
pub struct ClockFace {
    style: ClockStyle,
    source: Box<dyn TimeSource>,
    font: FontId,
    timer: RepaintTimer,
    reading: Cell<ClockReading>,
    degenerate_logged: Cell<bool>,
}

impl ClockFace {
    pub fn new(style: ClockStyle, source: impl TimeSource + 'static, font: FontId) -> Self {
        let timer = RepaintTimer::new(style.refresh);
        Self {
            style,
            source: Box::new(source),
            font,
            timer,
            reading: Cell::new(ClockReading::default()),
            degenerate_logged: Cell::new(false),
        }
    }

    /// Reads the system clock in the style's time zone.
    pub fn with_zone(style: ClockStyle, font: FontId) -> Self {
        let zone = style.time_zone;
        Self::new(style, ZonedClock::new(zone), font)
    }

    #[inline]
    pub fn style(&self) -> &ClockStyle {
        &self.style
    }

    /// Angles used by the most recent paint.
    #[inline]
    pub fn reading(&self) -> ClockReading {
        self.reading.get()
    }

    #[inline]
    pub fn timer(&self) -> &RepaintTimer {
        &self.timer
    }
}

impl Widget for ClockFace {
    fn measure(&self, constraints: Constraints, _ctx: &LayoutCtx) -> Vec2 {
        let side = constraints.max_square().unwrap_or(FALLBACK_SIDE);
        constraints.constrain(Vec2::new(side, side))
    }

    fn paint(&self, painter: &mut Painter, rect: Rect) {
        let reading = self.source.reading();
        self.reading.set(reading);

        if paint_clock(painter, rect, reading, &self.style, self.font) {
            self.degenerate_logged.set(false);
        } else if !self.degenerate_logged.replace(true) {
            log::debug!(
                "clock face skipped: {}px wide rect leaves no room for a {}px dial stroke",
                rect.width(),
                self.style.dial_width
            );
        }
    }

    fn on_attach(&mut self, now: Instant) {
        self.timer.arm(now);
    }

    fn on_detach(&mut self) {
        self.timer.cancel();
    }

    fn poll(&mut self, now: Instant) -> bool {
        if !self.timer.poll(now) {
            return false;
        }
        self.reading.set(self.source.reading());
        self.timer.arm(now);
        true
    }

    fn next_deadline(&self) -> Option<Instant> {
        self.timer.deadline()
    }
}

impl Drop for ClockFace {
    fn drop(&mut self) {
        self.timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::clock::FixedClock;

    use super::*;

    fn face() -> ClockFace {
        let source = FixedClock::hms(9, 30, 15).unwrap();
        ClockFace::new(ClockStyle::default(), source, FontId::new(0))
    }

    #[test]
    fn measure_prefers_largest_square() {
        let fonts = clockface_engine::text::FontSystem::new();
        let ctx = LayoutCtx { fonts: &fonts, scale: 1.0 };
        let size = face().measure(Constraints::loose(Vec2::new(800.0, 500.0)), &ctx);
        assert_eq!(size, Vec2::new(500.0, 500.0));
        let size = face().measure(Constraints::unbounded(), &ctx);
        assert_eq!(size, Vec2::new(FALLBACK_SIDE, FALLBACK_SIDE));
    }

    #[test]
    fn idle_until_attached() {
        let mut face = face();
        assert!(face.next_deadline().is_none());
        assert!(!face.poll(Instant::now() + Duration::from_secs(10)));
    }

    #[test]
    fn poll_rearms_after_firing() {
        let t0 = Instant::now();
        let mut face = face();
        face.on_attach(t0);
        assert_eq!(face.next_deadline(), Some(t0 + Duration::from_secs(1)));

        assert!(!face.poll(t0 + Duration::from_millis(999)));
        let t1 = t0 + Duration::from_millis(1005);
        assert!(face.poll(t1));
        assert_eq!(face.next_deadline(), Some(t1 + Duration::from_secs(1)));
        assert_eq!(face.timer().pending(), 1);
    }

    #[test]
    fn firing_resamples_the_source() {
        let t0 = Instant::now();
        let mut face = face();
        face.on_attach(t0);
        assert!(face.poll(t0 + Duration::from_secs(1)));
        assert_eq!(face.reading(), ClockReading::from_hms(9, 30, 15));
    }

    #[test]
    fn detach_cancels() {
        let t0 = Instant::now();
        let mut face = face();
        face.on_attach(t0);
        face.on_detach();
        assert_eq!(face.timer().pending(), 0);
        assert!(!face.poll(t0 + Duration::from_secs(5)));
    }
}
