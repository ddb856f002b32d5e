use crate::camera::view_projection;
use crate::core::constants::{FOG_COLOR, FOG_DENSITY, LIGHT_COLOR, LIGHT_DISTANCE, TUBE_COLOR};
use crate::core::flight::FlightFrame;
use crate::core::tube::TubeMesh;
use web_sys as web;

mod helpers;
mod post;
mod recovery;
mod targets;
mod tunnel;

pub use recovery::{surface_recovery, SurfaceRecovery};
use post::{PostBindGroups, PostResources, PostUniforms};
use targets::{bloom_size, RenderTargets};
use tunnel::{create_tunnel_resources, TunnelResources, TunnelUniforms};

/// Bloom tuning picked by the active variant.
#[derive(Clone, Copy, Debug)]
pub struct BloomSettings {
    pub strength: f32,
    pub threshold: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    tunnel: TunnelResources,
    targets: RenderTargets,
    post: PostResources,
    post_groups: PostBindGroups,
    bloom: BloomSettings,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    frame: Option<FlightFrame>,
    time_accum: f32,
    ambient_energy: f32,
}

fn fog_clear_color() -> wgpu::Color {
    wgpu::Color {
        r: FOG_COLOR[0] as f64,
        g: FOG_COLOR[1] as f64,
        b: FOG_COLOR[2] as f64,
        a: 1.0,
    }
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        mesh: &TubeMesh,
        bloom: BloomSettings,
    ) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        // Falls back to WebGL2 when navigator.gpu exists but yields no adapter
        let instance =
            wgpu::util::new_instance_with_webgpu_detection(&wgpu::InstanceDescriptor::default()).await;
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU/WebGL adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // WebGL2 cannot satisfy the default WebGPU limits
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let targets = RenderTargets::new(&device, width, height);
        let tunnel = create_tunnel_resources(&device, helpers::HDR_FORMAT, mesh);
        let post = post::create_post_resources(&device, format);
        let post_groups = post::build_bind_groups(&device, &post, &targets);
        log::info!(
            "[gpu] {}x{} format={:?} tube_edges={}",
            width,
            height,
            format,
            mesh.edge_count()
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            tunnel,
            targets,
            post,
            post_groups,
            bloom,
            width,
            height,
            clear_color: fog_clear_color(),
            frame: None,
            time_accum: 0.0,
            ambient_energy: 0.0,
        })
    }

    /// Camera, light and emissive values for the next `render`.
    pub fn set_frame(&mut self, frame: FlightFrame) {
        self.frame = Some(frame);
    }

    /// 0..1 bass energy; lifts the composite slightly.
    pub fn set_ambient(&mut self, energy01: f32) {
        self.ambient_energy = energy01.clamp(0.0, 1.0);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.targets.recreate(&self.device, width, height);
            self.post_groups = post::build_bind_groups(&self.device, &self.post, &self.targets);
        }
    }

    /// Configure the surface again after it was lost or went stale.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn tunnel_uniforms(&self, frame: &FlightFrame) -> TunnelUniforms {
        let aspect = self.width as f32 / self.height.max(1) as f32;
        let vp = view_projection(&frame.camera, aspect);
        let eye = frame.camera.eye;
        let light = frame.light_position;
        TunnelUniforms {
            view_proj: vp.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, self.time_accum],
            light_pos: [light.x, light.y, light.z, frame.light_intensity],
            light_color: [LIGHT_COLOR[0], LIGHT_COLOR[1], LIGHT_COLOR[2], LIGHT_DISTANCE],
            base_color: [TUBE_COLOR[0], TUBE_COLOR[1], TUBE_COLOR[2], frame.emissive],
            fog: [FOG_COLOR[0], FOG_COLOR[1], FOG_COLOR[2], FOG_DENSITY],
        }
    }

    pub fn render(&mut self, dt_sec: f32) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);
        let Some(frame_state) = self.frame else {
            return Ok(());
        };
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: wireframe tube into HDR
        let u = self.tunnel_uniforms(&frame_state);
        self.queue
            .write_buffer(&self.tunnel.uniform_buffer, 0, bytemuck::bytes_of(&u));
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("tunnel_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.targets.hdr_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_pipeline(&self.tunnel.pipeline);
            rpass.set_bind_group(0, &self.tunnel.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.tunnel.vertex_buffer.slice(..));
            rpass.set_index_buffer(self.tunnel.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.tunnel.index_count, 0, 0..1);
        }

        let (bw, bh) = bloom_size(self.width, self.height);
        let uniforms = |blur_dir: [f32; 2]| PostUniforms {
            resolution: [bw as f32, bh as f32],
            time: self.time_accum,
            ambient: self.ambient_energy,
            blur_dir,
            bloom_strength: self.bloom.strength,
            threshold: self.bloom.threshold,
        };
        post::write_post_uniforms(&self.queue, &self.post.bright_uniforms, uniforms([0.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post.blur_h_uniforms, uniforms([1.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post.blur_v_uniforms, uniforms([0.0, 1.0]));
        post::write_post_uniforms(&self.queue, &self.post.composite_uniforms, uniforms([0.0, 0.0]));

        // Pass 2: bright pass → bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright_from_hdr,
            None,
        );
        // Pass 3: blur horizontal bloom_a → bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h_from_a,
            None,
        );
        // Pass 4: blur vertical bloom_b → bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v_from_b,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite_hdr,
            Some(&self.post_groups.composite_bloom),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
