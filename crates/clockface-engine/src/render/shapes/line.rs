use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawKind, DrawRun, LineCap, LineCmd};

use super::common::{collect_runs, Instance, InstanceBuffer, RunSpans, ViewportPipeline};

const LABEL: &str = "clockface line";

/// Renderer for `DrawCmd::Line`.
///
/// Segments are drawn as oriented quads. Butt caps use a box distance,
/// round caps a capsule distance, so a zero-length round segment renders
/// as a filled dot.
#[derive(Default)]
pub struct LineRenderer {
    pipeline: Option<ViewportPipeline>,
    instances: InstanceBuffer,
    spans: RunSpans,
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and uploads the instances of every line run in `runs`.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, runs: &[DrawRun<'_>]) {
        let (instances, spans) =
            collect_runs(runs, DrawKind::Line, |cmd, out: &mut Vec<LineInstance>| {
                out.extend(cmd.as_line().and_then(LineInstance::from_cmd));
            });
        self.spans = spans;

        if instances.is_empty() {
            return;
        }

        if self.pipeline.as_ref().is_none_or(|p| p.format != ctx.surface_format) {
            self.pipeline = Some(ViewportPipeline::new(
                ctx,
                LABEL,
                include_str!("shaders/line.wgsl"),
                LineInstance::layout(),
            ));
        }

        if self.instances.upload(ctx, "clockface line instance vbo", &instances).is_none() {
            self.spans.clear();
        }
    }

    /// Draws the instances prepared for `runs[run]`. Runs of another kind
    /// draw nothing.
    pub fn draw(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, run: usize) {
        let Some(range) = self.spans.get(run).cloned().flatten() else { return };
        let (Some(pipeline), Some(vbo)) = (self.pipeline.as_ref(), self.instances.buffer()) else {
            return;
        };
        pipeline.draw(ctx, target, "clockface line pass", vbo, range);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// `hw_cap` packs the half width and the cap kind (1.0 for round).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct LineInstance {
    p0: [f32; 2],
    p1: [f32; 2],
    hw_cap: [f32; 2],
    color: [f32; 4],
}

impl Instance for LineInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x2, 4 => Float32x4];
}

impl LineInstance {
    fn from_cmd(cmd: &LineCmd) -> Option<Self> {
        if cmd.is_degenerate() || !cmd.from.is_finite() || !cmd.to.is_finite() {
            return None;
        }
        let round = match cmd.cap {
            LineCap::Butt => 0.0,
            LineCap::Round => 1.0,
        };
        Some(Self {
            p0: [cmd.from.x, cmd.from.y],
            p1: [cmd.to.x, cmd.to.y],
            hw_cap: [cmd.width * 0.5, round],
            color: cmd.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;

    #[test]
    fn round_point_becomes_instance() {
        let inst = LineInstance::from_cmd(&LineCmd::point(Vec2::new(3.0, 4.0), 30.0, Color::black()))
            .unwrap();
        assert_eq!(inst.p0, inst.p1);
        assert_eq!(inst.hw_cap, [15.0, 1.0]);
    }

    #[test]
    fn butt_segment_carries_half_width() {
        let cmd = LineCmd::new(
            Vec2::zero(),
            Vec2::new(0.0, -50.0),
            5.0,
            Color::white(),
            LineCap::Butt,
        );
        let inst = LineInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.hw_cap, [2.5, 0.0]);
        assert_eq!(inst.p1, [0.0, -50.0]);
    }

    #[test]
    fn degenerate_segment_is_skipped() {
        let p = Vec2::new(1.0, 1.0);
        assert!(LineInstance::from_cmd(&LineCmd::new(p, p, 2.0, Color::black(), LineCap::Butt))
            .is_none());
    }
}
