//! Shared GPU types and helpers used by the shape renderers.

use std::num::NonZeroU64;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::coords::Viewport;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawKind, DrawRun};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn premul_alpha_blend() -> wgpu::BlendState {
    let component = wgpu::BlendComponent {
        src_factor: wgpu::BlendFactor::One,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    wgpu::BlendState { color: component, alpha: component }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

impl ViewportUniform {
    pub(super) fn new(viewport: Viewport) -> Self {
        Self { viewport: viewport.clamped(), _pad: [0.0; 2] }
    }
}

pub(super) const VIEWPORT_UBO_SIZE: NonZeroU64 =
    match NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64) {
        Some(size) => size,
        None => panic!("ViewportUniform must not be zero-sized"),
    };

/// Layout entry for the viewport uniform at `binding`, visible to vertex shaders.
pub(super) fn viewport_layout_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: Some(VIEWPORT_UBO_SIZE),
        },
        count: None,
    }
}

pub(super) fn create_viewport_ubo(ctx: &RenderCtx<'_>, label: &str) -> wgpu::Buffer {
    ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: VIEWPORT_UBO_SIZE.get(),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

pub(super) fn write_viewport_ubo(ctx: &RenderCtx<'_>, ubo: &wgpu::Buffer) {
    ctx.queue
        .write_buffer(ubo, 0, bytemuck::bytes_of(&ViewportUniform::new(ctx.viewport)));
}

// ── unit quad ─────────────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct QuadVertex {
    pub pos: [f32; 2], // 0..1
}

impl QuadVertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<QuadVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Per-instance vertex data. Location 0 belongs to the quad corner, so
/// attributes start at location 1.
pub(super) trait Instance: Pod {
    const ATTRS: &'static [wgpu::VertexAttribute];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: Self::ATTRS,
        }
    }
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [0.0, 0.0] },
    QuadVertex { pos: [1.0, 0.0] },
    QuadVertex { pos: [1.0, 1.0] },
    QuadVertex { pos: [0.0, 1.0] },
];

const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// Static unit-quad vertex and index buffers, instanced by every renderer.
pub(super) struct QuadBuffers {
    pub vbo: wgpu::Buffer,
    pub ibo: wgpu::Buffer,
}

impl QuadBuffers {
    pub(super) fn new(ctx: &RenderCtx<'_>, label: &str) -> Self {
        let vbo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad vbo")),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibo = ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{label} quad ibo")),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self { vbo, ibo }
    }

    pub(super) const INDEX_COUNT: u32 = QUAD_INDICES.len() as u32;
}

// ── instance buffer ───────────────────────────────────────────────────────

/// Growable per-instance vertex buffer.
///
/// Capacity grows to the next power of two and never shrinks.
#[derive(Default)]
pub(super) struct InstanceBuffer {
    buffer: Option<wgpu::Buffer>,
    capacity: usize,
}

impl InstanceBuffer {
    /// Uploads `instances`, reallocating if they do not fit.
    pub(super) fn upload<T: Pod>(
        &mut self,
        ctx: &RenderCtx<'_>,
        label: &str,
        instances: &[T],
    ) -> Option<&wgpu::Buffer> {
        if instances.len() > self.capacity || self.buffer.is_none() {
            let new_cap = instances.len().next_power_of_two().max(64);
            self.buffer = Some(ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: (new_cap * std::mem::size_of::<T>()) as u64,
                usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }));
            self.capacity = new_cap;
        }

        let buffer = self.buffer.as_ref()?;
        ctx.queue.write_buffer(buffer, 0, bytemuck::cast_slice(instances));
        Some(buffer)
    }

    #[inline]
    pub(super) fn buffer(&self) -> Option<&wgpu::Buffer> {
        self.buffer.as_ref()
    }
}

// ── runs ──────────────────────────────────────────────────────────────────

/// Instance ranges of one renderer, indexed like the frame's run list.
/// `None` marks runs of another kind and runs that produced no instances.
pub(super) type RunSpans = Vec<Option<Range<u32>>>;

/// Flattens every `kind` run into one instance vector.
///
/// A frame uploads each renderer's instances once; the runs then draw
/// disjoint ranges of that buffer.
pub(super) fn collect_runs<T>(
    runs: &[DrawRun<'_>],
    kind: DrawKind,
    mut emit: impl FnMut(&DrawCmd, &mut Vec<T>),
) -> (Vec<T>, RunSpans) {
    let mut instances = Vec::new();
    let spans = runs
        .iter()
        .map(|run| {
            if run.kind != kind {
                return None;
            }
            let start = instances.len() as u32;
            for cmd in run.cmds() {
                emit(cmd, &mut instances);
            }
            let end = instances.len() as u32;
            (end > start).then_some(start..end)
        })
        .collect();
    (instances, spans)
}

// ── pipeline / pass ───────────────────────────────────────────────────────

/// Creates an instanced quad pipeline: vertex buffer 0 is the unit quad,
/// vertex buffer 1 is `instance_layout`.
pub(super) fn create_instanced_pipeline(
    ctx: &RenderCtx<'_>,
    label: &str,
    wgsl: &str,
    bind_group_layout: &wgpu::BindGroupLayout,
    instance_layout: wgpu::VertexBufferLayout<'static>,
) -> wgpu::RenderPipeline {
    let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} shader")),
        source: wgpu::ShaderSource::Wgsl(wgsl.into()),
    });

    let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} pipeline layout")),
        bind_group_layouts: &[bind_group_layout],
        immediate_size: 0,
    });

    ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} pipeline")),
        layout: Some(&pipeline_layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[QuadVertex::layout(), instance_layout],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: ctx.surface_format,
                blend: Some(premul_alpha_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}

/// Begins a pass that keeps the target's existing contents.
pub(super) fn begin_load_pass<'e>(
    target: &'e mut RenderTarget<'_>,
    label: &str,
) -> wgpu::RenderPass<'e> {
    target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target.color_view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Load,
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
        multiview_mask: None,
    })
}

/// Pipeline plus a viewport-only bind group, shared by the SDF renderers.
pub(super) struct ViewportPipeline {
    pub format: wgpu::TextureFormat,
    pub pipeline: wgpu::RenderPipeline,
    pub bind_group: wgpu::BindGroup,
    pub viewport_ubo: wgpu::Buffer,
    pub quad: QuadBuffers,
}

impl ViewportPipeline {
    pub(super) fn new(
        ctx: &RenderCtx<'_>,
        label: &str,
        wgsl: &str,
        instance_layout: wgpu::VertexBufferLayout<'static>,
    ) -> Self {
        let bind_group_layout =
            ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some(&format!("{label} bgl")),
                entries: &[viewport_layout_entry(0)],
            });

        let pipeline =
            create_instanced_pipeline(ctx, label, wgsl, &bind_group_layout, instance_layout);

        let viewport_ubo = create_viewport_ubo(ctx, &format!("{label} viewport ubo"));
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{label} bind group")),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_ubo.as_entire_binding(),
            }],
        });

        log::debug!("{label}: pipeline created for {:?}", ctx.surface_format);

        Self {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            quad: QuadBuffers::new(ctx, label),
        }
    }

    /// Records an instanced draw of the quads in `range` of `instances`.
    pub(super) fn draw(
        &self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        label: &str,
        instances: &wgpu::Buffer,
        range: Range<u32>,
    ) {
        write_viewport_ubo(ctx, &self.viewport_ubo);

        let mut rpass = begin_load_pass(target, label);
        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instances.slice(..));
        rpass.set_index_buffer(self.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, range);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::{CircleCmd, DrawList, LineCmd, ZIndex};

    fn line(x: f32) -> DrawCmd {
        DrawCmd::Line(LineCmd::point(Vec2::new(x, 0.0), 2.0, Color::black()))
    }

    fn circle() -> DrawCmd {
        DrawCmd::Circle(CircleCmd::new(Vec2::zero(), 3.0, Some(Color::black()), None))
    }

    #[test]
    fn spans_line_up_with_runs() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(0), line(1.0));
        list.push(ZIndex::new(1), line(2.0));
        list.push(ZIndex::new(2), circle());
        list.push(ZIndex::new(3), line(3.0));
        let runs = list.runs();

        let (xs, spans) = collect_runs(&runs, DrawKind::Line, |cmd, out: &mut Vec<f32>| {
            out.extend(cmd.as_line().map(|l| l.from.x));
        });
        assert_eq!(xs, [1.0, 2.0, 3.0]);
        assert_eq!(spans, [Some(0..2), None, Some(2..3)]);
    }

    #[test]
    fn run_without_instances_has_no_span() {
        let mut list = DrawList::new();
        list.push(ZIndex::new(0), circle());
        let runs = list.runs();
        let (out, spans) = collect_runs(&runs, DrawKind::Circle, |_, _: &mut Vec<u8>| {});
        assert!(out.is_empty());
        assert_eq!(spans, [None]);
    }
}
