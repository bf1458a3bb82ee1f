use std::sync::Arc;
use wgpu::{Adapter, Device, DeviceDescriptor, Instance, Queue, Surface, SurfaceConfiguration};
use winit::window::Window;

use crate::error::RenderError;

/// Shared device and queue, cheap to clone
#[derive(Clone)]
pub struct GpuContext {
    device: Arc<Device>,
    queue: Arc<Queue>,
}

impl GpuContext {
    /// Creates the device together with a configured surface for `window`.
    ///
    /// The adapter is requested with the surface as its compatible target, so
    /// the pair is always usable together.
    pub async fn for_window(window: Arc<Window>) -> Result<(Self, WindowSurface), RenderError> {
        let instance = Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let size = window.inner_size();
        let surface = instance.create_surface(window)?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let info = adapter.get_info();
        log::info!("Using adapter {} ({:?})", info.name, info.backend);

        let surface = WindowSurface::new(surface, &adapter, &device, size.width, size.height);
        Ok((
            Self {
                device: Arc::new(device),
                queue: Arc::new(queue),
            },
            surface,
        ))
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn queue(&self) -> &Queue {
        &self.queue
    }

    async fn request_adapter(instance: &Instance, surface: &Surface<'_>) -> Result<Adapter, RenderError> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await?;
        Ok(adapter)
    }

    async fn request_device(adapter: &Adapter) -> Result<(Device, Queue), RenderError> {
        let pair = adapter
            .request_device(&DeviceDescriptor {
                label: Some("Server Room Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await?;
        Ok(pair)
    }
}

/// What to do about a failed `get_current_texture`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceRecovery {
    /// Reconfigure and try again next frame
    Reconfigure,
    /// Drop this frame only
    Skip,
    /// Give up on the 3D layer
    Fatal,
}

impl SurfaceRecovery {
    pub fn classify(err: &wgpu::SurfaceError) -> Self {
        match err {
            wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => SurfaceRecovery::Reconfigure,
            wgpu::SurfaceError::Timeout => SurfaceRecovery::Skip,
            wgpu::SurfaceError::OutOfMemory | wgpu::SurfaceError::Other => SurfaceRecovery::Fatal,
        }
    }
}

/// Window surface plus its current configuration
pub struct WindowSurface {
    surface: Surface<'static>,
    config: SurfaceConfiguration,
}

impl WindowSurface {
    fn new(surface: Surface<'static>, adapter: &Adapter, device: &Device, width: u32, height: u32) -> Self {
        let caps = surface.get_capabilities(adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first().copied())
            .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb);

        let config = SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(device, &config);
        Self { surface, config }
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    pub fn resize(&mut self, device: &Device, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device, &self.config);
    }

    /// Next frame to draw into. `Ok(None)` means skip this frame.
    pub fn acquire(&self, device: &Device) -> Result<Option<wgpu::SurfaceTexture>, RenderError> {
        match self.surface.get_current_texture() {
            Ok(frame) => Ok(Some(frame)),
            Err(err) => match SurfaceRecovery::classify(&err) {
                SurfaceRecovery::Reconfigure => {
                    log::warn!("Surface {err}, reconfiguring");
                    self.surface.configure(device, &self.config);
                    Ok(None)
                }
                SurfaceRecovery::Skip => {
                    log::debug!("Surface timeout, skipping frame");
                    Ok(None)
                }
                SurfaceRecovery::Fatal => Err(RenderError::Frame(err)),
            },
        }
    }
}
