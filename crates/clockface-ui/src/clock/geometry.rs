use clockface_engine::coords::{Rect, Vec2};

/// Dial placement derived from the widget rect on every paint.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DialGeometry {
    pub center: Vec2,
    pub radius: f32,
}

impl DialGeometry {
    /// Centers the dial in `rect`; the radius is half the width minus ten
    /// dial stroke widths.
    pub fn from_rect(rect: Rect, dial_width: f32) -> Self {
        Self {
            center: rect.center(),
            radius: rect.width() / 2.0 - 10.0 * dial_width,
        }
    }

    /// `false` when nothing sensible can be drawn.
    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.radius > 0.0 && self.radius.is_finite() && self.center.is_finite()
    }

    /// Point at `fraction × radius` from the center along `angle_deg`.
    pub fn point_at(&self, angle_deg: f32, fraction: f32) -> Vec2 {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let r = self.radius * fraction;
        Vec2::new(self.center.x + r * sin, self.center.y - r * cos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn radius_is_half_width_minus_hundred() {
        let g = DialGeometry::from_rect(Rect::new(0.0, 0.0, 600.0, 800.0), 10.0);
        assert_eq!(g.center, Vec2::new(300.0, 400.0));
        assert_eq!(g.radius, 200.0);
    }

    #[test]
    fn center_includes_rect_origin() {
        let g = DialGeometry::from_rect(Rect::new(20.0, 40.0, 400.0, 400.0), 10.0);
        assert_eq!(g.center, Vec2::new(220.0, 240.0));
    }

    #[test]
    fn cardinal_points() {
        let g = DialGeometry { center: Vec2::new(100.0, 100.0), radius: 50.0 };
        assert!(close(g.point_at(0.0, 1.0), Vec2::new(100.0, 50.0)));
        assert!(close(g.point_at(90.0, 1.0), Vec2::new(150.0, 100.0)));
        assert!(close(g.point_at(180.0, 0.5), Vec2::new(100.0, 125.0)));
        assert!(close(g.point_at(270.0, 0.5), Vec2::new(75.0, 100.0)));
    }

    #[test]
    fn narrow_rect_is_not_drawable() {
        assert!(!DialGeometry::from_rect(Rect::new(0.0, 0.0, 200.0, 200.0), 10.0).is_drawable());
        assert!(DialGeometry::from_rect(Rect::new(0.0, 0.0, 201.0, 201.0), 10.0).is_drawable());
    }
}
