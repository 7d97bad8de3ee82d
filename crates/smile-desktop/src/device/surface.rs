use anyhow::{anyhow, Context, Result};
use winit::dpi::PhysicalSize;

use super::GpuInit;

/// The window surface and the configuration it was last given.
///
/// wgpu rejects a zero-sized configuration, so while the window has a zero
/// extent the surface is left as it was and reported as not drawable.
pub(crate) struct SurfaceTarget {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    drawable: bool,

    /// Set when the last acquired texture was suboptimal; the surface is
    /// reconfigured before the next acquire.
    stale: bool,
}

impl SurfaceTarget {
    pub(crate) fn negotiate(
        surface: wgpu::Surface<'static>,
        adapter: &wgpu::Adapter,
        device: &wgpu::Device,
        init: &GpuInit,
        size: PhysicalSize<u32>,
    ) -> Result<Self> {
        let caps = surface.get_capabilities(adapter);
        let format = pick_format(&caps.formats, init.prefer_srgb)
            .context("surface reports no texture formats")?;
        log::debug!("surface format {format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode: pick_alpha_mode(&caps.alpha_modes, init.alpha_mode),
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        let mut target = Self {
            surface,
            config,
            drawable: false,
            stale: false,
        };
        target.resize(device, size.width, size.height);
        Ok(target)
    }

    pub(crate) fn is_drawable(&self) -> bool {
        self.drawable
    }

    pub(crate) fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        self.drawable = width > 0 && height > 0;
        if !self.drawable {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(device, &self.config);
        self.stale = false;
    }

    /// Next texture to draw into, or `None` when this frame cannot be drawn
    /// but later ones may be.
    ///
    /// A lost or outdated surface is reconfigured in place. Only running out
    /// of memory is an error; the context has to be recreated after it.
    pub(crate) fn acquire(&mut self, device: &wgpu::Device) -> Result<Option<wgpu::SurfaceTexture>> {
        if self.stale {
            self.surface.configure(device, &self.config);
            self.stale = false;
        }

        match self.surface.get_current_texture() {
            Ok(texture) => {
                self.stale = texture.suboptimal;
                Ok(Some(texture))
            }
            Err(err @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::debug!("{err}; reconfiguring {}x{}", self.config.width, self.config.height);
                self.surface.configure(device, &self.config);
                Ok(None)
            }
            Err(err @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Other)) => {
                log::debug!("{err}; skipping frame");
                Ok(None)
            }
            Err(err @ wgpu::SurfaceError::OutOfMemory) => {
                Err(anyhow!(err).context("surface texture unavailable"))
            }
        }
    }
}

/// First format of the wanted color space, else whatever the surface lists
/// first.
fn pick_format(formats: &[wgpu::TextureFormat], srgb: bool) -> Option<wgpu::TextureFormat> {
    formats
        .iter()
        .copied()
        .find(|f| f.is_srgb() == srgb)
        .or_else(|| formats.first().copied())
}

fn pick_alpha_mode(
    supported: &[wgpu::CompositeAlphaMode],
    requested: Option<wgpu::CompositeAlphaMode>,
) -> wgpu::CompositeAlphaMode {
    match requested {
        Some(mode) if supported.contains(&mode) => mode,
        Some(mode) => {
            log::warn!("alpha mode {mode:?} unsupported by this surface");
            supported.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto)
        }
        None => supported.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
    }
}
