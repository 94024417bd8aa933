use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};

/// Shape of a stroked segment's ends.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum LineCap {
    /// Ends flush with the endpoints.
    #[default]
    Butt,
    /// Half-disc of radius `width / 2` past each endpoint.
    Round,
}

/// Straight stroked segment payload.
#[derive(Debug, Clone, PartialEq)]
pub struct LineCmd {
    pub from: Vec2,
    pub to: Vec2,
    /// Stroke width in logical pixels.
    pub width: f32,
    pub color: Color,
    pub cap: LineCap,
}

impl LineCmd {
    #[inline]
    pub fn new(from: Vec2, to: Vec2, width: f32, color: Color, cap: LineCap) -> Self {
        Self { from, to, width, color, cap }
    }

    /// A zero-length round-capped stroke: a filled dot of diameter `width`.
    #[inline]
    pub fn point(at: Vec2, width: f32, color: Color) -> Self {
        Self::new(at, at, width, color, LineCap::Round)
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.from.distance(self.to)
    }

    /// `true` when the command would rasterize no pixels.
    ///
    /// Butt-capped segments of zero length have no area; round caps still
    /// produce a disc.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0
            || !self.color.is_visible()
            || (self.cap == LineCap::Butt && self.length() <= f32::EPSILON)
    }
}

impl DrawList {
    /// Records a stroked segment.
    #[inline]
    pub fn push_line(
        &mut self,
        z: ZIndex,
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        cap: LineCap,
    ) {
        self.push(z, DrawCmd::Line(LineCmd::new(from, to, width, color, cap)));
    }

    /// Records a round dot of diameter `width` centered at `at`.
    #[inline]
    pub fn push_point(&mut self, z: ZIndex, at: Vec2, width: f32, color: Color) {
        self.push(z, DrawCmd::Line(LineCmd::point(at, width, color)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_point_is_not_degenerate() {
        assert!(!LineCmd::point(Vec2::new(5.0, 5.0), 30.0, Color::black()).is_degenerate());
    }

    #[test]
    fn zero_length_butt_is_degenerate() {
        let p = Vec2::new(1.0, 1.0);
        assert!(LineCmd::new(p, p, 4.0, Color::black(), LineCap::Butt).is_degenerate());
    }

    #[test]
    fn zero_width_or_transparent_is_degenerate() {
        let a = Vec2::zero();
        let b = Vec2::new(10.0, 0.0);
        assert!(LineCmd::new(a, b, 0.0, Color::black(), LineCap::Butt).is_degenerate());
        assert!(LineCmd::new(a, b, 3.0, Color::transparent(), LineCap::Butt).is_degenerate());
    }
}
