use crate::render::shapes::{CircleRenderer, LineRenderer, TextRenderer};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawKind, DrawList};
use crate::text::FontSystem;

/// Draws a whole [`DrawList`] with the shape renderers.
///
/// Each renderer uploads its instances once, then the list's runs are drawn
/// back to front, so a hand recorded after a numeral covers it.
#[derive(Default)]
pub struct SceneRenderer {
    circle: CircleRenderer,
    line: LineRenderer,
    text: TextRenderer,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        font_system: &FontSystem,
    ) {
        let runs = draw_list.runs();
        if runs.is_empty() {
            return;
        }

        self.circle.prepare(ctx, &runs);
        self.line.prepare(ctx, &runs);
        self.text.prepare(ctx, &runs, font_system);

        for (index, run) in runs.iter().enumerate() {
            match run.kind {
                DrawKind::Circle => self.circle.draw(ctx, target, index),
                DrawKind::Line => self.line.draw(ctx, target, index),
                DrawKind::Text => self.text.draw(target, index),
            }
        }
    }
}
