use std::time::{Duration, Instant};

use anyhow::Result;
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use tracing::debug;
use winit::dpi::PhysicalSize;

use crate::animation::AnimationState;
use crate::geometry::{QuadGeometry, INDEX_COUNT};
use crate::program::ShaderProgram;

use super::context::GpuContext;
use super::pipeline::{FractalPipeline, DEPTH_FORMAT};
use super::uniforms::FractalUniforms;

/// Aggregates every GPU resource of the renderer: context, pipeline, static
/// quad buffers, the uniform buffer, and the depth target. Created once at
/// startup; only the swapchain and depth target are ever rebuilt (on resize).
pub(crate) struct GpuState {
    context: GpuContext,
    pipeline: FractalPipeline,
    geometry: QuadGeometry,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    depth_view: wgpu::TextureView,
    last_fps_update: Instant,
    frames_since_last_update: u32,
}

impl GpuState {
    pub fn new<T>(
        target: &T,
        size: PhysicalSize<u32>,
        program: &ShaderProgram,
    ) -> Result<Self>
    where
        T: HasDisplayHandle + HasWindowHandle,
    {
        let context = GpuContext::new(target, size)?;
        let pipeline = FractalPipeline::new(&context.device, context.surface_format, program);
        let geometry = QuadGeometry::new(&context.device);

        let uniform_buffer = context.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("fractal params"),
            size: std::mem::size_of::<FractalUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let uniform_bind_group = context.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("fractal uniform bind group"),
            layout: &pipeline.uniform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: pipeline.params_binding,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let depth_view = create_depth_view(&context.device, context.size);

        Ok(Self {
            context,
            pipeline,
            geometry,
            uniform_buffer,
            uniform_bind_group,
            depth_view,
            last_fps_update: Instant::now(),
            frames_since_last_update: 0,
        })
    }

    pub fn size(&self) -> PhysicalSize<u32> {
        self.context.size
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.context.resize(new_size);
        self.depth_view = create_depth_view(&self.context.device, self.context.size);
    }

    /// Draws one frame from the given animation state.
    ///
    /// Uploads the uniforms, clears color (opaque black) and depth, issues
    /// the single indexed draw over the quad fan, and presents.
    pub fn render(&mut self, state: &AnimationState) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.surface.get_current_texture()?;

        let uniforms = FractalUniforms::from_state(state);
        self.context
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            self.context
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("render encoder"),
                });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("fractal pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });
            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(self.pipeline.params_group, &self.uniform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.geometry.vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            render_pass.draw_indexed(0..INDEX_COUNT, 0, 0..1);
        }

        self.context.queue.submit(std::iter::once(encoder.finish()));
        frame.present();

        self.frames_since_last_update += 1;
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_fps_update);
        if elapsed >= Duration::from_secs(1) {
            debug!(
                fps = (self.frames_since_last_update as f32 / elapsed.as_secs_f32()).round(),
                time = state.total_time,
                color_shift = state.color_shift,
                paused = state.paused,
                "render stats"
            );
            self.frames_since_last_update = 0;
            self.last_fps_update = now;
        }

        Ok(())
    }
}

fn create_depth_view(device: &wgpu::Device, size: PhysicalSize<u32>) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth target"),
        size: wgpu::Extent3d {
            width: size.width.max(1),
            height: size.height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
