use crate::scene::shapes::{CircleCmd, LineCmd, TextCmd};

/// One recorded drawing primitive.
///
/// Every variant has a matching renderer in `render::shapes`; a variant
/// without one would be silently skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Circle(CircleCmd),
    Line(LineCmd),
    Text(TextCmd),
}

/// Command variant without its payload, used to group runs.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum DrawKind {
    Circle,
    Line,
    Text,
}

impl DrawCmd {
    #[inline]
    pub fn kind(&self) -> DrawKind {
        match self {
            DrawCmd::Circle(_) => DrawKind::Circle,
            DrawCmd::Line(_) => DrawKind::Line,
            DrawCmd::Text(_) => DrawKind::Text,
        }
    }

    #[inline]
    pub fn as_circle(&self) -> Option<&CircleCmd> {
        if let DrawCmd::Circle(c) = self { Some(c) } else { None }
    }

    #[inline]
    pub fn as_line(&self) -> Option<&LineCmd> {
        if let DrawCmd::Line(l) = self { Some(l) } else { None }
    }

    #[inline]
    pub fn as_text(&self) -> Option<&TextCmd> {
        if let DrawCmd::Text(t) = self { Some(t) } else { None }
    }
}
