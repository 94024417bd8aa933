use bytemuck::{Pod, Zeroable};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{CircleCmd, DrawKind, DrawRun};

use super::common::{collect_runs, Instance, InstanceBuffer, RunSpans, ViewportPipeline};

const LABEL: &str = "clockface circle";

/// Renderer for `DrawCmd::Circle`.
///
/// Each circle is one instanced quad shaded with a signed-distance function:
/// the optional fill covers the disc, the optional stroke is an AA ring
/// centered on the outline and composited over the fill.
#[derive(Default)]
pub struct CircleRenderer {
    pipeline: Option<ViewportPipeline>,
    instances: InstanceBuffer,
    spans: RunSpans,
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds and uploads the instances of every circle run in `runs`.
    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, runs: &[DrawRun<'_>]) {
        let (instances, spans) =
            collect_runs(runs, DrawKind::Circle, |cmd, out: &mut Vec<CircleInstance>| {
                out.extend(cmd.as_circle().and_then(CircleInstance::from_cmd));
            });
        self.spans = spans;

        if instances.is_empty() {
            return;
        }

        if self.pipeline.as_ref().is_none_or(|p| p.format != ctx.surface_format) {
            self.pipeline = Some(ViewportPipeline::new(
                ctx,
                LABEL,
                include_str!("shaders/circle.wgsl"),
                CircleInstance::layout(),
            ));
        }

        if self.instances.upload(ctx, "clockface circle instance vbo", &instances).is_none() {
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
        pipeline.draw(ctx, target, "clockface circle pass", vbo, range);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// `radius_sw` packs the radius and the stroke width. A transparent `fill`
/// or `stroke` disables that part.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
struct CircleInstance {
    center: [f32; 2],
    radius_sw: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl Instance for CircleInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![1 => Float32x2, 2 => Float32x2, 3 => Float32x4, 4 => Float32x4];
}

impl CircleInstance {
    /// Returns `None` when the command would draw nothing.
    fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
            return None;
        }

        let fill = cmd.fill.filter(|c| c.is_visible()).map_or([0.0; 4], |c| c.to_array());
        let (stroke_width, stroke) = match cmd.stroke {
            Some(s) if s.width > 0.0 && s.color.is_visible() => (s.width, s.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };

        if fill[3] <= 0.0 && stroke_width <= 0.0 {
            return None;
        }

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_sw: [cmd.radius, stroke_width],
            fill,
            stroke,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Stroke;

    #[test]
    fn stroke_only_circle_has_transparent_fill() {
        let cmd = CircleCmd::new(
            Vec2::new(10.0, 10.0),
            5.0,
            None,
            Some(Stroke::new(10.0, Color::black())),
        );
        let inst = CircleInstance::from_cmd(&cmd).unwrap();
        assert_eq!(inst.fill, [0.0; 4]);
        assert_eq!(inst.radius_sw, [5.0, 10.0]);
        assert_eq!(inst.stroke, [0.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn non_positive_radius_is_skipped() {
        let cmd = CircleCmd::new(Vec2::zero(), 0.0, Some(Color::black()), None);
        assert!(CircleInstance::from_cmd(&cmd).is_none());
        let cmd = CircleCmd::new(Vec2::zero(), -3.0, Some(Color::black()), None);
        assert!(CircleInstance::from_cmd(&cmd).is_none());
    }

    #[test]
    fn invisible_circle_is_skipped() {
        let cmd = CircleCmd::new(
            Vec2::zero(),
            4.0,
            Some(Color::transparent()),
            Some(Stroke::new(0.0, Color::black())),
        );
        assert!(CircleInstance::from_cmd(&cmd).is_none());
    }
}
