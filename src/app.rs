//! Application state holding the wgpu graphics context
//!
//! Owns the device, surface and plane pipeline, and runs the per-frame
//! driver: read velocity and camera distance, derive the kinematic factors
//! and zoom level, rebuild the plane transform and uniforms, then render the
//! plane and the egui overlay.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec2;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::gallery::{self, Artwork};
use crate::physics::KinematicFactors;
use crate::scene::{
    ArtPlane, PlaneUniforms, PlaneVertex, HIGH_RES_ZOOM_THRESHOLD, PLANE_INDICES, PLANE_VERTICES,
};
use crate::store::RelativityStore;
use crate::textures::{ArtworkImages, DecodedImage};
use crate::ui::{self, UiState};

/// Main application state
pub struct App {
    /// Reference to the window
    window: Arc<Window>,
    /// The wgpu surface for presenting rendered frames
    surface: wgpu::Surface<'static>,
    /// The wgpu device for creating GPU resources
    device: wgpu::Device,
    /// The command queue for submitting GPU work
    queue: wgpu::Queue,
    /// Surface configuration
    config: wgpu::SurfaceConfiguration,
    /// Current window size in physical pixels
    size: PhysicalSize<u32>,

    // Plane rendering resources
    plane_pipeline: wgpu::RenderPipeline,
    plane_bind_group_layout: wgpu::BindGroupLayout,
    plane_bind_group: wgpu::BindGroup,
    plane_uniform_buffer: wgpu::Buffer,
    plane_vertex_buffer: wgpu::Buffer,
    plane_index_buffer: wgpu::Buffer,
    sampler: wgpu::Sampler,
    /// 1x1 white stand-in used for either tier until its load completes
    placeholder_view: wgpu::TextureView,
    base_texture: Option<(wgpu::Texture, wgpu::TextureView)>,
    high_res_texture: Option<(wgpu::Texture, wgpu::TextureView)>,

    // Scene state
    plane: Option<ArtPlane>,
    pending_images: Option<ArtworkImages>,
    asset_root: PathBuf,
    catalog: Vec<Artwork>,

    store: RelativityStore,
    orbit: OrbitCamera,
    ui_state: UiState,

    // egui integration
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,

    // Frame timing
    fps: f64,
    last_fps_update: Instant,
    frames_since_update: u64,

    ctrl_held: bool,
}

impl App {
    /// Create a new App instance with initialized wgpu context
    pub async fn new(window: Arc<Window>, asset_root: PathBuf) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to find suitable GPU adapter");

        log::info!("Using GPU: {}", adapter.get_info().name);
        log::info!("Backend: {:?}", adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Relativity Gallery Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: adapter.limits(),
                    memory_hints: wgpu::MemoryHints::Performance,
                },
                None,
            )
            .await
            .expect("Failed to create device");

        let surface_caps = surface.get_capabilities(&adapter);

        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        log::info!("Surface format: {:?}", surface_format);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 1,
        };

        surface.configure(&device, &config);

        // Create sampler
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Plane Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        // Create plane pipeline
        let plane_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Art Plane Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/art_plane.wgsl").into()),
        });

        let plane_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Plane Bind Group Layout"),
                entries: &[
                    // Uniforms
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    // Base texture
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
                    // High-resolution texture
                    wgpu::BindGroupLayoutEntry {
                        binding: 2,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Texture {
                            sample_type: wgpu::TextureSampleType::Float { filterable: true },
                            view_dimension: wgpu::TextureViewDimension::D2,
                            multisampled: false,
                        },
                        count: None,
                    },
                    // Sampler
                    wgpu::BindGroupLayoutEntry {
                        binding: 3,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let plane_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Plane Pipeline Layout"),
                bind_group_layouts: &[&plane_bind_group_layout],
                push_constant_ranges: &[],
            });

        let plane_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Plane Pipeline"),
            layout: Some(&plane_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &plane_shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<PlaneVertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            offset: 0,
                            shader_location: 0,
                            format: wgpu::VertexFormat::Float32x3,
                        },
                        wgpu::VertexAttribute {
                            offset: 12,
                            shader_location: 1,
                            format: wgpu::VertexFormat::Float32x2,
                        },
                    ],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &plane_shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState {
                        color: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::SrcAlpha,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                        alpha: wgpu::BlendComponent {
                            src_factor: wgpu::BlendFactor::One,
                            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
                            operation: wgpu::BlendOperation::Add,
                        },
                    }),
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
            multiview: None,
            cache: None,
        });

        // Create uniform buffer
        let plane_uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Plane Uniform Buffer"),
            size: std::mem::size_of::<PlaneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(
            &plane_uniform_buffer,
            0,
            bytemuck::bytes_of(&PlaneUniforms::default()),
        );

        // Create quad geometry
        let plane_vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Plane Vertex Buffer"),
            size: std::mem::size_of_val(&PLANE_VERTICES) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&plane_vertex_buffer, 0, bytemuck::cast_slice(&PLANE_VERTICES));

        let plane_index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Plane Index Buffer"),
            size: std::mem::size_of_val(&PLANE_INDICES) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        queue.write_buffer(&plane_index_buffer, 0, bytemuck::cast_slice(&PLANE_INDICES));

        // 1x1 white placeholder bound for both tiers until loads land
        let placeholder = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Placeholder Texture"),
            size: wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &placeholder,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &[255u8; 4],
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: 1,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
        let placeholder_view = placeholder.create_view(&wgpu::TextureViewDescriptor::default());

        let plane_bind_group = Self::build_bind_group(
            &device,
            &plane_bind_group_layout,
            &plane_uniform_buffer,
            &placeholder_view,
            &placeholder_view,
            &sampler,
        );

        // Initialize egui
        let egui_ctx = egui::Context::default();
        let mut style = (*egui_ctx.style()).clone();
        style.visuals.window_shadow = egui::epaint::Shadow::NONE;
        egui_ctx.set_style(style);

        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );

        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        // Load the artwork catalog; a broken or missing file leaves the
        // gallery empty but the app running
        let catalog = match gallery::load_catalog(&asset_root.join("artworks.json")) {
            Ok(catalog) => {
                log::info!("Loaded {} artworks from catalog", catalog.len());
                catalog
            }
            Err(e) => {
                log::warn!("Could not load artwork catalog: {}", e);
                Vec::new()
            }
        };

        let mut app = Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            plane_pipeline,
            plane_bind_group_layout,
            plane_bind_group,
            plane_uniform_buffer,
            plane_vertex_buffer,
            plane_index_buffer,
            sampler,
            placeholder_view,
            base_texture: None,
            high_res_texture: None,
            plane: None,
            pending_images: None,
            asset_root,
            catalog,
            store: RelativityStore::new(),
            orbit: OrbitCamera::new(),
            ui_state: UiState::new(),
            egui_ctx,
            egui_state,
            egui_renderer,
            fps: 60.0,
            last_fps_update: Instant::now(),
            frames_since_update: 0,
            ctrl_held: false,
        };

        if let Some(first) = app.catalog.first().cloned() {
            app.select_artwork(first);
        }

        app
    }

    fn build_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        base_view: &wgpu::TextureView,
        high_res_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Plane Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(base_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(high_res_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }

    fn rebuild_plane_bind_group(&mut self) {
        let base_view = self
            .base_texture
            .as_ref()
            .map(|(_, view)| view)
            .unwrap_or(&self.placeholder_view);
        let high_res_view = self
            .high_res_texture
            .as_ref()
            .map(|(_, view)| view)
            .unwrap_or(&self.placeholder_view);
        self.plane_bind_group = Self::build_bind_group(
            &self.device,
            &self.plane_bind_group_layout,
            &self.plane_uniform_buffer,
            base_view,
            high_res_view,
            &self.sampler,
        );
    }

    /// Handle a window event, returning true if egui consumed it
    pub fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(&self.window, event);
        response.consumed
    }

    /// Resize the surface
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Get current size
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    fn aspect(&self) -> f32 {
        self.config.width.max(1) as f32 / self.config.height.max(1) as f32
    }

    /// Switch the active artwork: replace the plane, drop both texture
    /// slots and start fresh background loads. In-flight loads for the old
    /// selection are not cancelled; their completions land in dropped slots.
    pub fn select_artwork(&mut self, art: Artwork) {
        log::info!("Selected artwork: {} by {}", art.display_title(), art.artist);
        self.pending_images = Some(ArtworkImages::begin_load(&art, &self.asset_root));
        self.base_texture = None;
        self.high_res_texture = None;
        self.plane = Some(ArtPlane::new(art.clone()));
        self.store.select_art(art);
        self.rebuild_plane_bind_group();
    }

    /// Poll the decode slots and upload any newly arrived image. Each tier
    /// updates only its own slot, so a completed base never disturbs a
    /// pending high-res load or vice versa.
    pub fn update_textures(&mut self) {
        let Some(pending) = &self.pending_images else {
            return;
        };

        let base = pending.take_base();
        let high_res = pending.take_high_res();

        if let Some(img) = base {
            let uploaded = self.upload_texture(&img, "Base Art Texture");
            self.base_texture = Some(uploaded);
            self.rebuild_plane_bind_group();
        }
        if let Some(img) = high_res {
            let uploaded = self.upload_texture(&img, "High-Res Art Texture");
            self.high_res_texture = Some(uploaded);
            self.rebuild_plane_bind_group();
        }
    }

    fn upload_texture(
        &self,
        img: &DecodedImage,
        label: &str,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: img.width,
                height: img.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &img.data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(img.width * 4),
                rows_per_image: Some(img.height),
            },
            wgpu::Extent3d {
                width: img.width,
                height: img.height,
                depth_or_array_layers: 1,
            },
        );

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }

    /// Per-frame driver. Everything here is recomputed from the current
    /// store and camera; no derived state survives between frames.
    pub fn update_frame(&mut self) {
        let zoom_level = self.orbit.zoom_level();
        let use_high_res =
            self.high_res_texture.is_some() && zoom_level > HIGH_RES_ZOOM_THRESHOLD;

        let speed = self.store.speed();
        let factors = KinematicFactors::for_speed(speed);
        let direction = self.store.direction();
        let velocity = Vec2::new(self.store.velocity_x(), self.store.velocity_y());
        let view_proj = self.orbit.view_proj(self.aspect());

        if let Some(plane) = &mut self.plane {
            plane.update(velocity, direction, factors, zoom_level, use_high_res, view_proj);
            self.queue.write_buffer(
                &self.plane_uniform_buffer,
                0,
                bytemuck::bytes_of(&plane.uniforms),
            );
        }

        // Derived zoom reading goes straight to the UI layer
        self.ui_state
            .set_zoom_percentage((zoom_level * 100.0).round() as u32);
    }

    /// Handle cursor movement. While Ctrl is held the orbit target follows
    /// the point of the plane under the pointer.
    pub fn on_cursor_moved(&mut self, x: f32, y: f32) {
        if self.ctrl_held && self.plane.is_some() {
            let ndc = Vec2::new(
                2.0 * x / self.config.width.max(1) as f32 - 1.0,
                1.0 - 2.0 * y / self.config.height.max(1) as f32,
            );
            let aspect = self.aspect();
            self.orbit.retarget(ndc, aspect);
        }
    }

    /// Pan from a pixel-space drag delta.
    pub fn on_pointer_dragged(&mut self, dx: f32, dy: f32) {
        let height = self.config.height.max(1) as f32;
        self.orbit.pan(Vec2::new(dx / height, dy / height));
    }

    /// Dolly from scroll input.
    pub fn on_scroll(&mut self, amount: f32) {
        self.orbit.dolly(amount);
    }

    pub fn set_ctrl_held(&mut self, held: bool) {
        self.ctrl_held = held;
        self.ui_state.set_zoom_hint_visible(!held);
    }

    /// Render a frame
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        // Background + artwork plane
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Plane Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.01,
                            g: 0.01,
                            b: 0.02,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            // Nothing to draw until an artwork is selected
            if self.plane.is_some() {
                render_pass.set_pipeline(&self.plane_pipeline);
                render_pass.set_bind_group(0, &self.plane_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.plane_vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(self.plane_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                render_pass.draw_indexed(0..PLANE_INDICES.len() as u32, 0, 0..1);
            }
        }

        self.render_ui(&mut encoder, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        self.update_fps();

        Ok(())
    }

    fn render_ui(&mut self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let raw_input = self.egui_state.take_egui_input(&self.window);

        let egui_ctx = self.egui_ctx.clone();
        let ui_state = &mut self.ui_state;
        let store = &mut self.store;
        let catalog = &self.catalog;
        let fps = self.fps;

        let mut actions = ui::UiActions::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            actions = ui::draw(ctx, ui_state, store, catalog, fps);
        });

        if let Some(art) = actions.selected_artwork {
            self.select_artwork(art);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let render_pass_static: &mut wgpu::RenderPass<'static> =
                unsafe { std::mem::transmute(&mut render_pass) };

            self.egui_renderer
                .render(render_pass_static, &paint_jobs, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }

    fn update_fps(&mut self) {
        self.frames_since_update += 1;

        let now = Instant::now();
        let elapsed = now.duration_since(self.last_fps_update).as_secs_f64();
        if elapsed >= 1.0 {
            self.fps = self.frames_since_update as f64 / elapsed;
            self.frames_since_update = 0;
            self.last_fps_update = now;
        }
    }
}
