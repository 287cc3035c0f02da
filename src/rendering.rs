//! Rendering system with wgpu pipelines for sky, water and ship.

use std::sync::Arc;

use anyhow::Context;
use bytemuck::{Pod, Zeroable};
use glam::Mat4;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::ocean::{Vertex, WaterGrid};
use crate::params::ColorParams;
use crate::ship::{ShipMesh, ShipUniforms, ShipVertex};
use crate::sky::SkyUniforms;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Uniform buffer for the water shader (camera plus the live color ramp)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct WaterUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub depth_color: [f32; 4],
    pub surface_color: [f32; 4],
    /// x = color offset, y = color multiplier
    pub ramp: [f32; 4],
}

impl WaterUniforms {
    /// Pack the ramp so the fragment stage reproduces `water::shade`
    ///
    /// Offset and multiplier are kept finite: WGSL `clamp` is undefined on NaN.
    pub fn new(view_proj: Mat4, colors: &ColorParams) -> Self {
        let offset = if colors.offset.is_finite() {
            colors.offset
        } else {
            0.0
        };
        let multiplier = if colors.multiplier.is_nan() {
            0.0
        } else {
            colors.multiplier.clamp(-f32::MAX, f32::MAX)
        };
        let rgba = |c: [f32; 3]| [c[0], c[1], c[2], 1.0];
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            depth_color: rgba(colors.depth_color.to_array()),
            surface_color: rgba(colors.surface_color.to_array()),
            ramp: [offset, multiplier, 0.0, 0.0],
        }
    }
}

/// Water vertices carry only the displaced position
const WATER_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

/// Ship vertices: position, normal
const SHIP_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

/// Uniform buffer plus its bind group
struct UniformBinding {
    buffer: wgpu::Buffer,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    fn new<T: Pod>(device: &wgpu::Device, label: &str, initial: &T) -> Self {
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::bytes_of(initial),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(label),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.as_entire_binding(),
            }],
        });

        Self {
            buffer,
            layout,
            bind_group,
        }
    }
}

/// Everything needed to build one render pipeline
struct PipelineDesc<'a> {
    label: &'a str,
    shader: &'a wgpu::ShaderModule,
    uniforms: &'a UniformBinding,
    vertex_layout: Option<wgpu::VertexBufferLayout<'a>>,
    cull_mode: Option<wgpu::Face>,
    depth_write: bool,
    depth_compare: wgpu::CompareFunction,
}

fn create_pipeline(
    device: &wgpu::Device,
    format: wgpu::TextureFormat,
    desc: PipelineDesc<'_>,
) -> wgpu::RenderPipeline {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(desc.label),
        bind_group_layouts: &[&desc.uniforms.layout],
        push_constant_ranges: &[],
    });

    let buffers: Vec<wgpu::VertexBufferLayout<'_>> = desc.vertex_layout.into_iter().collect();

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(desc.label),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: desc.shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: desc.shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: desc.cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: desc.depth_write,
            depth_compare: desc.depth_compare,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width,
            height,
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

/// Rendering system managing wgpu device, pipelines, and buffers
pub struct RenderSystem {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    depth_view: wgpu::TextureView,

    sky_pipeline: wgpu::RenderPipeline,
    sky_uniforms: UniformBinding,

    water_pipeline: wgpu::RenderPipeline,
    water_uniforms: UniformBinding,
    water_vertex_buffer: wgpu::Buffer,
    water_index_buffer: wgpu::Buffer,
    water_index_count: u32,

    ship_pipeline: wgpu::RenderPipeline,
    ship_uniforms: UniformBinding,
    ship_vertex_buffer: wgpu::Buffer,
    ship_index_buffer: wgpu::Buffer,
    ship_index_count: u32,
}

impl RenderSystem {
    /// Create new rendering system
    pub async fn new(
        window: Arc<Window>,
        water_grid: &WaterGrid,
        ship_mesh: &ShipMesh,
    ) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // Create wgpu instance
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface (window must have 'static lifetime via Arc)
        let surface = instance
            .create_surface(window)
            .context("Failed to create surface")?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find suitable GPU adapter")?;
        log::info!("GPU adapter: {}", adapter.get_info().name);

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .context("Failed to request device")?;

        // Ramp colors are authored in sRGB already, so write them to a non-sRGB target
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .context("Surface reports no supported formats")?;
        if surface_format.is_srgb() {
            log::warn!("Only sRGB surface formats available; colors will look washed out");
        }

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth_view = create_depth_view(&device, config.width, config.height);

        // Load shaders
        let water_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Water Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/water.wgsl").into()),
        });
        let sky_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Sky Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/sky.wgsl").into()),
        });
        let ship_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Ship Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/ship.wgsl").into()),
        });

        // Create buffers
        let water_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Vertex Buffer"),
            contents: bytemuck::cast_slice(&water_grid.vertices),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let water_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Water Index Buffer"),
            contents: bytemuck::cast_slice(&water_grid.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let ship_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ship Vertex Buffer"),
            contents: bytemuck::cast_slice(&ship_mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ship_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Ship Index Buffer"),
            contents: bytemuck::cast_slice(&ship_mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let water_uniforms = UniformBinding::new(
            &device,
            "Water Uniforms",
            &WaterUniforms::new(Mat4::IDENTITY, &ColorParams::default()),
        );
        let sky_uniforms = UniformBinding::new(&device, "Sky Uniforms", &SkyUniforms::zeroed());
        let ship_uniforms = UniformBinding::new(&device, "Ship Uniforms", &ShipUniforms::zeroed());

        // Sky is drawn first as background: no depth writes, always passes
        let sky_pipeline = create_pipeline(
            &device,
            config.format,
            PipelineDesc {
                label: "Sky Pipeline",
                shader: &sky_shader,
                uniforms: &sky_uniforms,
                vertex_layout: None,
                cull_mode: None,
                depth_write: false,
                depth_compare: wgpu::CompareFunction::Always,
            },
        );

        // Water is visible from both sides when the camera dips below it
        let water_pipeline = create_pipeline(
            &device,
            config.format,
            PipelineDesc {
                label: "Water Pipeline",
                shader: &water_shader,
                uniforms: &water_uniforms,
                vertex_layout: Some(wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &WATER_ATTRIBUTES,
                }),
                cull_mode: None,
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        let ship_pipeline = create_pipeline(
            &device,
            config.format,
            PipelineDesc {
                label: "Ship Pipeline",
                shader: &ship_shader,
                uniforms: &ship_uniforms,
                vertex_layout: Some(wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<ShipVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &SHIP_ATTRIBUTES,
                }),
                cull_mode: Some(wgpu::Face::Back),
                depth_write: true,
                depth_compare: wgpu::CompareFunction::Less,
            },
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            sky_pipeline,
            sky_uniforms,
            water_pipeline,
            water_uniforms,
            water_vertex_buffer,
            water_index_buffer,
            water_index_count: water_grid.indices.len() as u32,
            ship_pipeline,
            ship_uniforms,
            ship_vertex_buffer,
            ship_index_buffer,
            ship_index_count: ship_mesh.indices.len() as u32,
        })
    }

    /// Reconfigure the surface and depth buffer for a new window size
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return; // Minimized
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.depth_view = create_depth_view(&self.device, width, height);
    }

    /// Current surface size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Update water vertex buffer with new mesh data
    pub fn update_water_vertices(&self, vertices: &[Vertex]) {
        self.queue
            .write_buffer(&self.water_vertex_buffer, 0, bytemuck::cast_slice(vertices));
    }

    pub fn update_water_uniforms(&self, uniforms: &WaterUniforms) {
        self.queue
            .write_buffer(&self.water_uniforms.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn update_sky_uniforms(&self, uniforms: &SkyUniforms) {
        self.queue
            .write_buffer(&self.sky_uniforms.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    pub fn update_ship_uniforms(&self, uniforms: &ShipUniforms) {
        self.queue
            .write_buffer(&self.ship_uniforms.buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Render a frame: sky, then water, then ship
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated; reconfiguring");
                self.surface.configure(&self.device, &self.config);
                self.surface.get_current_texture()?
            }
            Err(e) => return Err(e),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
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
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Render sky first
            render_pass.set_pipeline(&self.sky_pipeline);
            render_pass.set_bind_group(0, &self.sky_uniforms.bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Fullscreen triangle

            // Render water
            render_pass.set_pipeline(&self.water_pipeline);
            render_pass.set_bind_group(0, &self.water_uniforms.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.water_vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.water_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.water_index_count, 0, 0..1);

            // Render ship
            render_pass.set_pipeline(&self.ship_pipeline);
            render_pass.set_bind_group(0, &self.ship_uniforms.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.ship_vertex_buffer.slice(..));
            render_pass
                .set_index_buffer(self.ship_index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.draw_indexed(0..self.ship_index_count, 0, 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
