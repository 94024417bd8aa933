use super::{DrawCmd, DrawKind};

/// Paint layer of a draw item. Higher layers paint over lower ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct ZIndex(pub i32);

impl ZIndex {
    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub z: ZIndex,
    pub cmd: DrawCmd,
}

/// Draw commands recorded for one frame.
///
/// Items are kept in recording order. Paint order (by z, ties in recording
/// order) is computed lazily and cached until the next `push` or `clear`.
#[derive(Debug, Default)]
pub struct DrawList {
    items: Vec<DrawItem>,
    paint_order: Option<Vec<usize>>,
}

impl DrawList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every item; allocations are kept for the next frame.
    pub fn clear(&mut self) {
        self.items.clear();
        self.paint_order = None;
    }

    /// Items in recording order.
    #[inline]
    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn push(&mut self, z: ZIndex, cmd: DrawCmd) {
        self.items.push(DrawItem { z, cmd });
        self.paint_order = None;
    }

    /// Items back to front.
    pub fn iter_in_paint_order(&mut self) -> impl Iterator<Item = &DrawItem> {
        let items = &self.items;
        let order = self.paint_order.get_or_insert_with(|| {
            let mut order: Vec<usize> = (0..items.len()).collect();
            // Stable: equal layers keep recording order.
            order.sort_by_key(|&i| items[i].z);
            order
        });
        order.iter().map(move |&i| &items[i])
    }

    /// Splits the paint order into maximal stretches of one command kind.
    ///
    /// Drawing the runs in sequence, each with its kind's renderer, composes
    /// the frame in z order even across kinds.
    pub fn runs(&mut self) -> Vec<DrawRun<'_>> {
        let mut runs: Vec<DrawRun<'_>> = Vec::new();
        for item in self.iter_in_paint_order() {
            let kind = item.cmd.kind();
            match runs.last_mut() {
                Some(run) if run.kind == kind => run.items.push(item),
                _ => runs.push(DrawRun { kind, items: vec![item] }),
            }
        }
        runs
    }
}

/// Consecutive items, in paint order, that share a command kind.
#[derive(Debug, Clone)]
pub struct DrawRun<'a> {
    pub kind: DrawKind,
    pub items: Vec<&'a DrawItem>,
}

impl<'a> DrawRun<'a> {
    /// Commands of this run, back to front.
    pub fn cmds(&self) -> impl Iterator<Item = &'a DrawCmd> + '_ {
        self.items.iter().map(|&item| &item.cmd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::LineCmd;

    fn dot(x: f32) -> DrawCmd {
        DrawCmd::Line(LineCmd::point(Vec2::new(x, 0.0), 2.0, Color::black()))
    }

    fn painted_xs(list: &mut DrawList) -> Vec<f32> {
        list.iter_in_paint_order()
            .filter_map(|i| i.cmd.as_line().map(|l| l.from.x))
            .collect()
    }

    #[test]
    fn same_layer_keeps_recording_order() {
        let mut list = DrawList::new();
        for x in [3.0, 1.0, 2.0] {
            list.push(ZIndex::new(0), dot(x));
        }
        assert_eq!(painted_xs(&mut list), [3.0, 1.0, 2.0]);
    }

    #[test]
    fn lower_layers_paint_first() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(5), dot(1.0));
        list.push(ZIndex::new(-1), dot(2.0));
        list.push(ZIndex::new(0), dot(3.0));
        assert_eq!(painted_xs(&mut list), [2.0, 3.0, 1.0]);
        // Recording order is untouched.
        assert_eq!(list.items()[0].z, ZIndex::new(5));
    }

    #[test]
    fn push_after_iteration_invalidates_order() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(1), dot(1.0));
        let _ = painted_xs(&mut list);
        list.push(ZIndex::new(0), dot(2.0));
        assert_eq!(painted_xs(&mut list), [2.0, 1.0]);

        list.clear();
        assert!(list.is_empty());
        assert!(painted_xs(&mut list).is_empty());
    }

    fn disc() -> DrawCmd {
        DrawCmd::Circle(crate::scene::CircleCmd::new(Vec2::zero(), 4.0, Some(Color::black()), None))
    }

    #[test]
    fn runs_follow_z_across_kinds() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(3), dot(1.0));
        list.push(ZIndex::new(0), disc());
        list.push(ZIndex::new(1), dot(2.0));
        list.push(ZIndex::new(2), dot(3.0));
        list.push(ZIndex::new(4), disc());

        let runs = list.runs();
        let kinds: Vec<DrawKind> = runs.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, [DrawKind::Circle, DrawKind::Line, DrawKind::Circle]);

        let xs: Vec<f32> = runs[1].cmds().filter_map(|c| c.as_line()).map(|l| l.from.x).collect();
        assert_eq!(xs, [2.0, 3.0, 1.0]);
    }

    #[test]
    fn empty_list_has_no_runs() {
        assert!(DrawList::new().runs().is_empty());
    }
}
