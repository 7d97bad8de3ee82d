use std::sync::Arc;

use anyhow::{Context, Result};
use winit::window::Window;

use smile_core::{FrameInfo, GraphicsBackend, HostContext, SurfaceState};

use super::surface::SurfaceTarget;
use super::GpuInit;

/// Everything bound to one GPU context: surface, device, queue, and the
/// texture of a rendered frame awaiting presentation.
pub struct GpuResources {
    target: SurfaceTarget,
    device: wgpu::Device,
    queue: wgpu::Queue,

    pending: Option<wgpu::SurfaceTexture>,

    window: Arc<Window>,
}

impl GpuResources {
    async fn new(window: Arc<Window>, init: &GpuInit) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(Arc::clone(&window))
            .context("failed to create wgpu surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: init.power_preference,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to find a suitable GPU adapter")?;
        log::info!("using adapter {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("smile device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints: wgpu::MemoryHints::MemoryUsage,
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to create wgpu device/queue")?;

        let target =
            SurfaceTarget::negotiate(surface, &adapter, &device, init, window.inner_size())?;

        Ok(Self {
            target,
            device,
            queue,
            pending: None,
            window,
        })
    }
}

/// `GraphicsBackend` over wgpu for a winit window.
///
/// The host context passed to `set_up` must carry the `Arc<Window>`.
pub struct WgpuBackend {
    init: GpuInit,
    clear: wgpu::Color,
}

impl WgpuBackend {
    pub fn new(init: GpuInit, clear: wgpu::Color) -> Self {
        Self { init, clear }
    }
}

impl GraphicsBackend for WgpuBackend {
    type Resources = GpuResources;

    fn create_resources(&mut self, host: &HostContext) -> Result<GpuResources> {
        let window = host
            .downcast_ref::<Arc<Window>>()
            .context("host context does not carry a window")?;

        pollster::block_on(GpuResources::new(Arc::clone(window), &self.init))
    }

    fn release_resources(&mut self, mut resources: GpuResources) {
        // An unpresented frame must go before the surface it came from.
        drop(resources.pending.take());
        drop(resources);
        log::debug!("wgpu context objects dropped");
    }

    fn resize(&mut self, res: &mut GpuResources, surface: SurfaceState) -> Result<()> {
        let Some((width, height)) = surface.size() else {
            return Ok(());
        };
        res.target.resize(&res.device, width, height);
        Ok(())
    }

    fn render(&mut self, res: &mut GpuResources, frame: &FrameInfo) -> Result<()> {
        if !res.target.is_drawable() {
            log::trace!("frame {} not drawn: surface has zero extent", frame.index);
            return Ok(());
        }
        if frame.time.is_first_on_context() {
            log::debug!("first frame on new context ({})", frame.index);
        }

        let Some(surface_texture) = res.target.acquire(&res.device)? else {
            log::trace!("frame {} not drawn: no surface texture", frame.index);
            return Ok(());
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = res
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("smile frame encoder"),
            });

        {
            let _rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("smile clear"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
        }

        res.queue.submit(std::iter::once(encoder.finish()));
        res.pending = Some(surface_texture);
        Ok(())
    }

    fn present(&mut self, res: &mut GpuResources) -> Result<()> {
        if let Some(texture) = res.pending.take() {
            res.window.pre_present_notify();
            texture.present();
        }
        Ok(())
    }
}
