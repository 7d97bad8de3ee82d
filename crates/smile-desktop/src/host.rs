use std::sync::Arc;

use anyhow::{Context, Result};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use smile_core::{HostContext, HostEventSink};

use crate::config::WindowConfig;

/// Runs the winit event loop, forwarding window lifecycle into `sink`.
///
/// Mapping:
/// - first `resumed`: window created, `set_up` with the window as host context
/// - `resumed`: `on_surface_created` followed by the current size
/// - `suspended`: `on_surface_destroyed`
/// - `Resized` / `ScaleFactorChanged`: `resize_surface`
/// - `RedrawRequested`: `on_draw_frame`
/// - close or loop exit: `tear_down`
pub fn run(config: WindowConfig, sink: Arc<dyn HostEventSink>) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    let mut host = DesktopHost::new(config, sink);

    event_loop
        .run_app(&mut host)
        .context("winit event loop terminated with error")?;

    Ok(())
}

struct DesktopHost {
    config: WindowConfig,
    sink: Arc<dyn HostEventSink>,
    window: Option<Arc<Window>>,
    surface_live: bool,
    torn_down: bool,
}

impl DesktopHost {
    fn new(config: WindowConfig, sink: Arc<dyn HostEventSink>) -> Self {
        Self {
            config,
            sink,
            window: None,
            surface_live: false,
            torn_down: false,
        }
    }

    fn window_or_create(&mut self, event_loop: &ActiveEventLoop) -> Result<Arc<Window>> {
        if let Some(window) = &self.window {
            return Ok(Arc::clone(window));
        }

        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        self.sink.set_up(HostContext::new(Arc::clone(&window)));
        self.window = Some(Arc::clone(&window));
        Ok(window)
    }

    fn forward_size(&self, size: PhysicalSize<u32>) {
        self.sink
            .resize_surface(to_extent(size.width), to_extent(size.height));
    }

    fn shut_down(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.surface_live = false;
        self.sink.tear_down();
    }
}

impl ApplicationHandler for DesktopHost {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.torn_down || self.surface_live {
            return;
        }

        let window = match self.window_or_create(event_loop) {
            Ok(w) => w,
            Err(e) => {
                log::error!("{e:#}");
                event_loop.exit();
                return;
            }
        };

        self.sink.on_surface_created();
        self.surface_live = true;
        self.forward_size(window.inner_size());
        window.request_redraw();
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        if self.surface_live {
            self.surface_live = false;
            self.sink.on_surface_destroyed();
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw while a surface exists.
        if let (true, Some(window)) = (self.surface_live, &self.window) {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(window) = self.window.clone() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.shut_down();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => self.forward_size(size),
            WindowEvent::ScaleFactorChanged { .. } => self.forward_size(window.inner_size()),
            WindowEvent::RedrawRequested => self.sink.on_draw_frame(),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.shut_down();
    }
}

/// Window extents arrive as `u32`; the host interface takes platform-style
/// signed sizes.
fn to_extent(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
