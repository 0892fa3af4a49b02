use std::sync::Arc;

use tracing::{info, warn};
use winit::window::Window;

use super::types::{PhysicalSize, RendererError};

/// Device, queue, and the window surface the composite pass writes to.
pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface: wgpu::Surface<'static>,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize,
}

impl GpuContext {
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self, RendererError> {
        let window_size = window.inner_size();
        let size = PhysicalSize {
            width: window_size.width.max(1),
            height: window_size.height.max(1),
        };

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window)
            .map_err(|e| RendererError::SurfaceError(e.to_string()))?;
        let adapter = pick_adapter(&instance, &surface).await?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("orrery device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let format = choose_surface_format(&surface.get_capabilities(&adapter).formats);
        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width,
            height: size.height,
            present_mode: present_mode(vsync),
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &surface_config);
        info!(?format, vsync, width = size.width, height = size.height, "surface configured");

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size,
        })
    }

    /// Match the surface to a new target size. Zero edges clamp to 1.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.size = PhysicalSize {
            width: width.max(1),
            height: height.max(1),
        };
        self.surface_config.width = self.size.width;
        self.surface_config.height = self.size.height;
        self.reconfigure();
    }

    /// Reapply the current configuration, e.g. after `SurfaceError::Lost`.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    pub fn current_texture(&self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.surface.get_current_texture()
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.surface_config.format
    }

    /// Largest width or height a render target may have on this device.
    pub fn max_target_dimension(&self) -> u32 {
        self.device.limits().max_texture_dimension_2d
    }
}

/// A hardware adapter if there is one, otherwise the fallback adapter.
async fn pick_adapter(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<wgpu::Adapter, RendererError> {
    let options = |force_fallback_adapter| wgpu::RequestAdapterOptions {
        power_preference: wgpu::PowerPreference::HighPerformance,
        force_fallback_adapter,
        compatible_surface: Some(surface),
    };

    let adapter = match instance.request_adapter(&options(false)).await {
        Some(adapter) => adapter,
        None => {
            warn!("no hardware adapter, requesting fallback");
            instance
                .request_adapter(&options(true))
                .await
                .ok_or(RendererError::AdapterNotFound)?
        }
    };

    let adapter_info = adapter.get_info();
    info!(
        name = %adapter_info.name,
        device_type = ?adapter_info.device_type,
        backend = ?adapter_info.backend,
        "adapter selected"
    );
    Ok(adapter)
}

/// First sRGB format, so linear shader output is encoded on write.
fn choose_surface_format(formats: &[wgpu::TextureFormat]) -> wgpu::TextureFormat {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb())
        .or_else(|| formats.first().copied())
        .unwrap_or(wgpu::TextureFormat::Bgra8UnormSrgb)
}

fn present_mode(vsync: bool) -> wgpu::PresentMode {
    if vsync {
        wgpu::PresentMode::Fifo
    } else {
        wgpu::PresentMode::AutoNoVsync
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wgpu::TextureFormat;

    #[test]
    fn prefers_srgb_surface() {
        let formats = [TextureFormat::Bgra8Unorm, TextureFormat::Rgba8UnormSrgb];
        assert_eq!(choose_surface_format(&formats), TextureFormat::Rgba8UnormSrgb);
    }

    #[test]
    fn falls_back_to_first_format() {
        let formats = [TextureFormat::Rgba16Float, TextureFormat::Bgra8Unorm];
        assert_eq!(choose_surface_format(&formats), TextureFormat::Rgba16Float);
        assert_eq!(choose_surface_format(&[]), TextureFormat::Bgra8UnormSrgb);
    }

    #[test]
    fn vsync_selects_fifo() {
        assert_eq!(present_mode(true), wgpu::PresentMode::Fifo);
        assert_eq!(present_mode(false), wgpu::PresentMode::AutoNoVsync);
    }
}
