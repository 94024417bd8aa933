use clockface_engine::coords::{Rect, Vec2, Viewport};
use clockface_engine::render::{RenderCtx, RenderTarget, SceneRenderer};
use clockface_engine::scene::DrawList;
use clockface_engine::text::{FontId, FontLoadError, FontSystem};

use crate::constraints::{Constraints, LayoutCtx};
use crate::painter::Painter;
use crate::widget::Element;

/// Owns the resources shared across frames: loaded fonts and the draw list
/// rebuilt by every [`frame_ref`](UiScene::frame_ref) call.
#[derive(Default)]
pub struct UiScene {
    font_system: FontSystem,
    draw_list: DrawList,
}

impl UiScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a TrueType / OpenType font from raw bytes.
    pub fn load_font(&mut self, data: &[u8]) -> Result<FontId, FontLoadError> {
        self.font_system.load_font(data)
    }

    /// Lays out `root` to fill the viewport and paints it.
    ///
    /// The returned list is valid until the next call.
    pub fn frame_ref(&mut self, root: &Element, viewport: Viewport, scale: f32) -> &mut DrawList {
        self.draw_list.clear();

        let ctx = LayoutCtx { fonts: &self.font_system, scale };
        let viewport_size = Vec2::new(viewport.width, viewport.height);
        let size = root.measure(Constraints::tight(viewport_size), &ctx);

        let rect = Rect::new(0.0, 0.0, size.x, size.y);
        let mut painter = Painter::new(&mut self.draw_list, &self.font_system, scale);
        root.paint(&mut painter, rect);

        &mut self.draw_list
    }

    /// Draws the current list with `renderer`.
    pub fn render(
        &mut self,
        renderer: &mut SceneRenderer,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
    ) {
        renderer.render(ctx, target, &mut self.draw_list, &self.font_system);
    }
}

#[cfg(test)]
mod tests {
    use clockface_engine::paint::Color;

    use super::*;
    use crate::widget::Widget;

    struct Disc;

    impl Widget for Disc {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(Vec2::new(10.0, 10.0))
        }

        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.fill_circle(rect.center(), 5.0, Color::white());
        }
    }

    #[test]
    fn each_frame_starts_from_an_empty_list() {
        let mut scene = UiScene::new();
        let root = Element::new(Disc);
        assert_eq!(scene.frame_ref(&root, Viewport::new(40.0, 20.0), 1.0).len(), 1);
        let list = scene.frame_ref(&root, Viewport::new(40.0, 20.0), 2.0);
        assert_eq!(list.len(), 1);
        let disc = list.items()[0].cmd.as_circle().unwrap();
        assert_eq!(disc.center, Vec2::new(20.0, 10.0));
    }

    /// Paints a disc as wide as the rect it is given.
    struct Span;

    impl Widget for Span {
        fn measure(&self, c: Constraints, _ctx: &LayoutCtx) -> Vec2 {
            c.constrain(Vec2::new(1.0, 1.0))
        }

        fn paint(&self, painter: &mut Painter, rect: Rect) {
            painter.fill_circle(rect.center(), rect.width() / 2.0, Color::white());
        }
    }

    #[test]
    fn root_is_laid_out_to_the_viewport() {
        let mut scene = UiScene::new();
        let root = Element::new(Span);
        let list = scene.frame_ref(&root, Viewport::new(300.0, 120.0), 1.0);
        let disc = list.items()[0].cmd.as_circle().unwrap();
        assert_eq!(disc.center, Vec2::new(150.0, 60.0));
        assert_eq!(disc.radius, 150.0);
    }
}
