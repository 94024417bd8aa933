use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawKind, DrawRun, TextAnchor, TextCmd};
use crate::text::FontSystem;

use super::common::{
    begin_load_pass, collect_runs, create_instanced_pipeline, create_viewport_ubo,
    viewport_layout_entry, write_viewport_ubo, Instance, InstanceBuffer, QuadBuffers, RunSpans,
};

const LABEL: &str = "clockface text";

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1;

/// Atlas rect of a rasterized glyph in normalized texture coordinates.
#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv: [f32; 4],
}

/// Shelf packer for the glyph atlas.
#[derive(Debug)]
struct ShelfCursor {
    x: u32,
    y: u32,
    row_height: u32,
    full: bool,
}

impl Default for ShelfCursor {
    fn default() -> Self {
        Self { x: GLYPH_PADDING, y: GLYPH_PADDING, row_height: 0, full: false }
    }
}

impl ShelfCursor {
    /// Reserves a `w × h` cell and returns its top-left corner.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full {
            return None;
        }
        if self.x + w + GLYPH_PADDING > ATLAS_SIZE {
            self.y += self.row_height + GLYPH_PADDING;
            self.x = GLYPH_PADDING;
            self.row_height = 0;
        }
        if self.y + h + GLYPH_PADDING > ATLAS_SIZE {
            self.full = true;
            return None;
        }
        let at = (self.x, self.y);
        self.x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }
}

/// GPU resources created on first use.
struct TextGpu {
    format: wgpu::TextureFormat,
    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
    atlas: wgpu::Texture,
    quad: QuadBuffers,
}

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized by fontdue at the physical pixel size
/// (`size * scale_factor`) into a single R8 atlas and cached for the
/// renderer's lifetime. The dial only ever shows the twelve hour numerals,
/// so the atlas stays small.
pub struct TextRenderer {
    gpu: Option<TextGpu>,
    cursor: ShelfCursor,
    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    instances: InstanceBuffer,
    spans: RunSpans,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            gpu: None,
            cursor: ShelfCursor::default(),
            glyph_cache: HashMap::new(),
            instances: InstanceBuffer::default(),
            spans: RunSpans::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out, rasterizes and uploads the glyphs of every text run.
    pub fn prepare(
        &mut self,
        ctx: &RenderCtx<'_>,
        runs: &[DrawRun<'_>],
        font_system: &FontSystem,
    ) {
        self.spans.clear();
        if !runs.iter().any(|run| run.kind == DrawKind::Text) {
            return;
        }

        self.ensure_gpu(ctx);

        let (instances, spans) = collect_runs(runs, DrawKind::Text, |cmd, out| {
            if let Some(text) = cmd.as_text() {
                self.push_glyphs(ctx, font_system, text, out);
            }
        });
        self.spans = spans;

        if instances.is_empty() {
            return;
        }
        if self.instances.upload(ctx, "clockface text instance vbo", &instances).is_none() {
            self.spans.clear();
            return;
        }
        if let Some(gpu) = self.gpu.as_ref() {
            write_viewport_ubo(ctx, &gpu.viewport_ubo);
        }
    }

    /// Draws the glyphs prepared for `runs[run]`. Runs of another kind draw
    /// nothing.
    pub fn draw(&self, target: &mut RenderTarget<'_>, run: usize) {
        let Some(range) = self.spans.get(run).cloned().flatten() else { return };
        let (Some(gpu), Some(instance_vbo)) = (self.gpu.as_ref(), self.instances.buffer()) else {
            return;
        };

        let mut rpass = begin_load_pass(target, "clockface text pass");
        rpass.set_pipeline(&gpu.pipeline);
        rpass.set_bind_group(0, &gpu.bind_group, &[]);
        rpass.set_vertex_buffer(0, gpu.quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(gpu.quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QuadBuffers::INDEX_COUNT, 0, range);
    }

    /// Appends one glyph quad per visible glyph of `cmd`.
    fn push_glyphs(
        &mut self,
        ctx: &RenderCtx<'_>,
        font_system: &FontSystem,
        cmd: &TextCmd,
        out: &mut Vec<GlyphInstance>,
    ) {
        if cmd.text.is_empty() || !(cmd.size > 0.0) || !cmd.color.is_visible() {
            return;
        }
        let Some(font) = font_system.get(cmd.font) else {
            log::warn!("TextRenderer: unknown FontId {:?}, skipping", cmd.font);
            return;
        };

        let scale = ctx.scale_factor;
        let top = match cmd.anchor {
            TextAnchor::TopLeft => cmd.origin.y,
            TextAnchor::Baseline => cmd.origin.y - font_system.ascent(cmd.font, cmd.size),
        };

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: top * scale,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Copy positions out so the borrow on `self.layout` ends before
        // `upload_glyph` needs `&mut self`.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        let color = cmd.color.to_array();
        for (key, x, y, w, h) in glyphs {
            if !self.glyph_cache.contains_key(&key) {
                let (metrics, bitmap) = font.rasterize_config(key);
                if metrics.width == 0 || metrics.height == 0 {
                    continue;
                }
                match self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32) {
                    Some(entry) => {
                        self.glyph_cache.insert(key, entry);
                    }
                    None => continue,
                }
            }

            let Some(cached) = self.glyph_cache.get(&key) else { continue };

            out.push(GlyphInstance {
                dst: [x / scale, y / scale, (x + w as f32) / scale, (y + h as f32) / scale],
                uv: cached.uv,
                color,
            });
        }
    }

    fn upload_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        let was_full = self.cursor.full;
        let Some((gx, gy)) = self.cursor.place(w, h) else {
            if !was_full {
                log::warn!(
                    "TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                     some glyphs will not be rendered"
                );
            }
            return None;
        };
        let gpu = self.gpu.as_ref()?;

        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &gpu.atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let texel = 1.0 / ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv: [gx as f32 * texel, gy as f32 * texel, (gx + w) as f32 * texel, (gy + h) as f32 * texel],
        })
    }

    fn ensure_gpu(&mut self, ctx: &RenderCtx<'_>) {
        match &self.gpu {
            Some(gpu) if gpu.format == ctx.surface_format => return,
            Some(_) => {
                // A fresh atlas is created below; cached UVs are stale.
                self.glyph_cache.clear();
                self.cursor = ShelfCursor::default();
            }
            None => {}
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("clockface text bgl"),
            entries: &[
                viewport_layout_entry(0),
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline = create_instanced_pipeline(
            ctx,
            LABEL,
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        let atlas = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("clockface text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let atlas_view = atlas.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("clockface text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        let viewport_ubo = create_viewport_ubo(ctx, "clockface text viewport ubo");

        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("clockface text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&atlas_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        log::debug!("{LABEL}: pipeline and {ATLAS_SIZE}px atlas created");

        self.gpu = Some(TextGpu {
            format: ctx.surface_format,
            pipeline,
            bind_group,
            viewport_ubo,
            atlas,
            quad: QuadBuffers::new(ctx, LABEL),
        });
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Screen rect and atlas rect of one glyph, each as `[min.x, min.y, max.x, max.y]`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst: [f32; 4],
    uv: [f32; 4],
    color: [f32; 4],
}

impl Instance for GlyphInstance {
    const ATTRS: &'static [wgpu::VertexAttribute] =
        &wgpu::vertex_attr_array![1 => Float32x4, 2 => Float32x4, 3 => Float32x4];
}
