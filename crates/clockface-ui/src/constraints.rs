use clockface_engine::coords::Vec2;
use clockface_engine::text::FontSystem;

// ── Constraints ───────────────────────────────────────────────────────────

/// Layout constraints passed down from parent to child during measure.
///
/// A child may return any size in `[min, max]`. Parents enforce their own
/// policy by calling [`Constraints::constrain`] on the returned size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    pub min: Vec2,
    pub max: Vec2,
}

impl Constraints {
    /// Tight: child must be exactly `size`.
    #[inline]
    pub fn tight(size: Vec2) -> Self {
        Self { min: size, max: size }
    }

    /// Loose: child can be anywhere from zero up to `max`.
    #[inline]
    pub fn loose(max: Vec2) -> Self {
        Self { min: Vec2::zero(), max }
    }

    /// No upper bound.
    #[inline]
    pub fn unbounded() -> Self {
        Self { min: Vec2::zero(), max: Vec2::new(f32::INFINITY, f32::INFINITY) }
    }

    /// Clamps a size into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn constrain(self, size: Vec2) -> Vec2 {
        Vec2::new(
            size.x.max(self.min.x).min(self.max.x),
            size.y.max(self.min.y).min(self.max.y),
        )
    }

    /// Largest square that fits, or `None` when both axes are unbounded.
    #[inline]
    pub fn max_square(self) -> Option<f32> {
        let side = self.max.x.min(self.max.y);
        side.is_finite().then_some(side)
    }
}

// ── LayoutCtx ────────────────────────────────────────────────────────────

/// Resources made available to [`Widget::measure`](crate::widget::Widget::measure).
pub struct LayoutCtx<'a> {
    pub fonts: &'a FontSystem,
    /// Physical pixels per logical pixel.
    pub scale: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constrain_clamps_below_min() {
        let c = Constraints { min: Vec2::new(10.0, 10.0), max: Vec2::new(100.0, 100.0) };
        assert_eq!(c.constrain(Vec2::new(5.0, 3.0)), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn constrain_clamps_above_max() {
        let c = Constraints::loose(Vec2::new(50.0, 50.0));
        assert_eq!(c.constrain(Vec2::new(200.0, 200.0)), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn tight_forces_size() {
        let c = Constraints::tight(Vec2::new(300.0, 200.0));
        assert_eq!(c.constrain(Vec2::new(10.0, 900.0)), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn max_square_uses_shorter_axis() {
        assert_eq!(Constraints::loose(Vec2::new(800.0, 600.0)).max_square(), Some(600.0));
        assert_eq!(Constraints::unbounded().max_square(), None);
    }
}
