use crate::coords::Vec2;
use crate::paint::Color;
use crate::scene::{DrawCmd, DrawList, ZIndex};
use crate::text::FontId;

/// Which point of the first line `TextCmd::origin` refers to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum TextAnchor {
    /// Top-left corner of the line box.
    #[default]
    TopLeft,
    /// Left end of the baseline, canvas-style.
    Baseline,
}

/// Text draw payload.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Anchor point of the first line in logical pixels.
    pub origin: Vec2,
    pub anchor: TextAnchor,
}

impl DrawList {
    /// Records a text draw command.
    pub fn push_text(
        &mut self,
        z: ZIndex,
        text: impl Into<String>,
        font: FontId,
        size: f32,
        color: Color,
        origin: Vec2,
        anchor: TextAnchor,
    ) {
        self.push(z, DrawCmd::Text(TextCmd {
            text: text.into(),
            font,
            size,
            color,
            origin,
            anchor,
        }));
    }
}
