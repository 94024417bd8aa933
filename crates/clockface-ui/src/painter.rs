use clockface_engine::coords::Vec2;
use clockface_engine::paint::Color;
use clockface_engine::scene::{DrawList, LineCap, Stroke, TextAnchor, ZIndex};
use clockface_engine::text::{FontId, FontSystem};

/// Drawing surface passed to [`Widget::paint`](crate::widget::Widget::paint).
///
/// Wraps the engine's `DrawList`. Every call gets the next z-index, so
/// later calls paint over earlier ones.
pub struct Painter<'a> {
    draw_list: &'a mut DrawList,
    font_system: &'a FontSystem,
    /// Physical pixels per logical pixel for this frame.
    pub scale: f32,
    z: i32,
}

impl<'a> Painter<'a> {
    pub fn new(draw_list: &'a mut DrawList, font_system: &'a FontSystem, scale: f32) -> Self {
        Self { draw_list, font_system, scale, z: 0 }
    }

    /// Measures a single line of `text` in logical pixels.
    pub fn measure_text(&self, text: &str, font: FontId, size: f32) -> Vec2 {
        self.font_system.measure_text(text, font, size)
    }

    // ── drawing ───────────────────────────────────────────────────────────

    /// Circle outline; the stroke straddles `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        let z = self.next_z();
        self.draw_list.push_stroke_circle(z, center, radius, stroke);
    }

    /// Solid disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_solid_circle(z, center, radius, color);
    }

    /// Straight segment.
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, cap: LineCap) {
        let z = self.next_z();
        self.draw_list.push_line(z, from, to, width, color, cap);
    }

    /// Round dot of diameter `width`, as a zero-length round-capped stroke.
    pub fn point(&mut self, at: Vec2, width: f32, color: Color) {
        let z = self.next_z();
        self.draw_list.push_point(z, at, width, color);
    }

    /// Single line of text anchored at `origin`.
    pub fn text(
        &mut self,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        anchor: TextAnchor,
    ) {
        let z = self.next_z();
        self.draw_list.push_text(z, text, font, size, color, origin, anchor);
    }

    #[inline]
    fn next_z(&mut self) -> ZIndex {
        let z = ZIndex::new(self.z);
        self.z += 1;
        z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_calls_paint_on_top() {
        let fonts = FontSystem::new();
        let mut list = DrawList::new();
        {
            let mut p = Painter::new(&mut list, &fonts, 1.0);
            p.point(Vec2::new(1.0, 0.0), 4.0, Color::black());
            p.fill_circle(Vec2::zero(), 3.0, Color::white());
        }
        let keys: Vec<i32> = list.items().iter().map(|i| i.z.0).collect();
        assert_eq!(keys, vec![0, 1]);
        assert!(list.items()[1].cmd.as_circle().is_some());
    }
}
