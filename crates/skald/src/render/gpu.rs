//! GPU context: wgpu device, queue, and the window surface.
//!
//! [`GpuContext`] does the one-time wgpu setup and owns the surface
//! configuration afterwards. The sprite pipeline is built once against
//! [`surface_format`](GpuContext::surface_format), so the format is picked
//! here, up front, and never changes for the lifetime of the context —
//! resizes only reconfigure width and height.

use std::sync::Arc;

/// The wgpu device, queue, surface, and current surface configuration.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
}

/// Prefer an sRGB swapchain format so blending matches the Rgba8UnormSrgb
/// textures the renderer uploads.
fn preferred_format(caps: &wgpu::SurfaceCapabilities) -> wgpu::TextureFormat {
    caps.formats
        .iter()
        .copied()
        .find(wgpu::TextureFormat::is_srgb)
        .unwrap_or(caps.formats[0])
}

impl GpuContext {
    /// Bring up wgpu for `window`: adapter, device, queue, and a
    /// configured surface sized to the window.
    pub fn new(window: Arc<winit::window::Window>) -> Self {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance.create_surface(window).unwrap();

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("no suitable GPU adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("skald device".into()),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                ..Default::default()
            },
        ))
        .expect("failed to create GPU device");

        let caps = surface.get_capabilities(&adapter);
        let format = preferred_format(&caps);
        log::info!(
            "GPU adapter: {}, surface format {format:?}",
            adapter.get_info().name
        );

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Self {
            device,
            queue,
            surface,
            surface_config,
        }
    }

    /// Reconfigure the surface to a new window size. A zero dimension
    /// (minimized window) or an unchanged size leaves the surface alone.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if (width, height) == self.surface_size() {
            return;
        }
        log::debug!("surface resize to {width}x{height}");
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// The swapchain format the render pipeline must target.
    pub fn surface_format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Current surface size in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
