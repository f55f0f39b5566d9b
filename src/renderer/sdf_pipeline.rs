//! SDF-based WebGPU render pipeline
//!
//! Renders the entire scene in fragment shader using signed distance fields.

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::{RenderSink, Scene};
use crate::sim::GamePhase;

/// Maximum number of obstacle columns (two per pair)
const MAX_COLUMNS: usize = 32;

// ============================================================================
// GPU DATA STRUCTURES (must match shader)
// ============================================================================

#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Globals {
    resolution: [f32; 2], // offset 0
    world_size: [f32; 2], // offset 8
    actor: [f32; 4],      // offset 16 - center x, center y, radius, velocity
    scroll: f32,          // offset 32
    column_count: u32,    // offset 36
    phase: u32,           // offset 40 - 0 ready, 1 running, 2 ended
    _pad: u32,            // pad to 48 bytes
}

/// Columns as (min.x, min.y, max.x, max.y). Uniform, not storage: WebGL2 has
/// no fragment storage buffers.
#[repr(C)]
#[derive(Copy, Clone, Pod, Zeroable)]
struct Columns {
    rects: [[f32; 4]; MAX_COLUMNS],
}

fn phase_code(phase: GamePhase) -> u32 {
    match phase {
        GamePhase::Ready => 0,
        GamePhase::Running => 1,
        GamePhase::Ended => 2,
    }
}

// ============================================================================
// SDF RENDER STATE
// ============================================================================

pub struct SdfRenderState {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub pipeline: wgpu::RenderPipeline,

    globals_buffer: wgpu::Buffer,
    columns_buffer: wgpu::Buffer,

    bind_group: wgpu::BindGroup,

    pub size: (u32, u32),
}

impl SdfRenderState {
    pub async fn new(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        width: u32,
        height: u32,
    ) -> Result<Self, wgpu::RequestDeviceError> {
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("sdf-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: Default::default(),
                trace: Default::default(),
                experimental_features: Default::default(),
            })
            .await?;

        let surface_caps = surface.get_capabilities(adapter);
        log::info!("Surface formats: {:?}", surface_caps.formats);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Using surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("sdf_shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("sdf_shader.wgsl").into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [width as f32, height as f32],
                world_size: [crate::consts::WORLD_WIDTH, crate::consts::WORLD_HEIGHT],
                actor: [0.0; 4],
                scroll: 0.0,
                column_count: 0,
                phase: 0,
                _pad: 0,
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let columns_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("columns"),
            size: std::mem::size_of::<Columns>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_entry = |binding: u32| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sdf_bind_group_layout"),
            entries: &[uniform_entry(0), uniform_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sdf_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: globals_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: columns_buffer.as_entire_binding(),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("sdf_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("sdf_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[], // No vertex buffers - fullscreen triangle
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            globals_buffer,
            columns_buffer,
            bind_group,
            size: (width, height),
        })
    }

    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width > 0 && new_height > 0 {
            self.size = (new_width, new_height);
            self.config.width = new_width;
            self.config.height = new_height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Update GPU buffers from the scene and render
    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        if scene.obstacles.len() > MAX_COLUMNS {
            log::warn!(
                "{} obstacle columns, drawing the first {}",
                scene.obstacles.len(),
                MAX_COLUMNS
            );
        }
        let column_count = scene.obstacles.len().min(MAX_COLUMNS) as u32;

        let center = (scene.actor.min + scene.actor.max) * 0.5;
        let globals = Globals {
            resolution: [self.size.0 as f32, self.size.1 as f32],
            world_size: [scene.world_size.x, scene.world_size.y],
            actor: [center.x, center.y, scene.actor.width() * 0.5, scene.actor_velocity],
            scroll: scene.scroll,
            column_count,
            phase: phase_code(scene.phase),
            _pad: 0,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));

        let mut columns = Columns {
            rects: [[0.0; 4]; MAX_COLUMNS],
        };
        for (slot, rect) in columns.rects.iter_mut().zip(&scene.obstacles) {
            *slot = [rect.min.x, rect.min.y, rect.max.x, rect.max.y];
        }
        self.queue
            .write_buffer(&self.columns_buffer, 0, bytemuck::bytes_of(&columns));

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("sdf_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("sdf_render_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

impl RenderSink for SdfRenderState {
    fn draw(&mut self, scene: &Scene) {
        match self.render(scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.resize(self.size.0, self.size.1);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of memory!");
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_layouts_match_shader() {
        assert_eq!(std::mem::size_of::<Globals>(), 48);
        assert_eq!(std::mem::size_of::<Columns>(), 16 * MAX_COLUMNS);
    }

    #[test]
    fn test_phase_codes() {
        assert_eq!(phase_code(GamePhase::Ready), 0);
        assert_eq!(phase_code(GamePhase::Running), 1);
        assert_eq!(phase_code(GamePhase::Ended), 2);
    }
}
