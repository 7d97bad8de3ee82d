use std::sync::Arc;

use crate::config::RendererConfig;
use crate::context::{ContextLifecycle, FrameInfo, GraphicsBackend, HostContext, ResourceSetId};
use crate::error::RendererError;
use crate::scheduler::{FrameGuard, FrameScheduler};
use crate::surface::{clamp_extent, SurfaceState};
use crate::time::FrameClock;

use super::{Diagnostics, EventKind, HostEvent, LifecycleState, RendererStats, Transition};

/// Renderer lifecycle state machine for one surface.
///
/// Owns the context lifecycle and the frame scheduler. Every entry point is
/// total: events outside their legal state set are dropped and recorded in
/// [`diagnostics`](Self::diagnostics), never raised to the caller.
///
/// This type is single-threaded. Hosts that deliver lifecycle events from a
/// different thread than surface events wrap it in a
/// [`SharedRenderer`](super::SharedRenderer).
pub struct RendererCore<B: GraphicsBackend> {
    state: LifecycleState,
    surface: SurfaceState,

    /// Last size reported while the surface was lost; replayed on the next
    /// surface creation.
    pending_resize: Option<(u32, u32)>,

    host: HostContext,
    context: ContextLifecycle<B>,
    scheduler: Arc<FrameScheduler>,
    clock: FrameClock,

    stats: RendererStats,
    diagnostics: Diagnostics,
}

impl<B: GraphicsBackend> RendererCore<B> {
    pub fn new(backend: B, config: RendererConfig) -> Self {
        Self {
            state: LifecycleState::Uninitialized,
            surface: SurfaceState::new(),
            pending_resize: None,
            host: HostContext::empty(),
            context: ContextLifecycle::new(backend),
            scheduler: Arc::new(FrameScheduler::new()),
            clock: config.frame_clock(),
            stats: RendererStats::default(),
            diagnostics: Diagnostics::new(config.diagnostic_history),
        }
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn surface(&self) -> SurfaceState {
        self.surface
    }

    pub fn pending_resize(&self) -> Option<(u32, u32)> {
        self.pending_resize
    }

    /// Id of the live resource set, if the current context has one.
    pub fn resource_set_id(&self) -> Option<ResourceSetId> {
        self.context.resource_set_id()
    }

    pub fn stats(&self) -> RendererStats {
        RendererStats {
            frames_dropped: self.scheduler.dropped_frames(),
            ..self.stats
        }
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn scheduler(&self) -> Arc<FrameScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Delivers a queued host event.
    pub fn handle(&mut self, event: HostEvent) {
        log::trace!("host event {} in state {}", event.kind(), self.state);
        match event {
            HostEvent::SetUp(host) => self.set_up(host),
            HostEvent::TearDown => self.tear_down(),
            HostEvent::SurfaceCreated => self.on_surface_created(),
            HostEvent::SurfaceDestroyed => self.on_surface_destroyed(),
            HostEvent::Resize { width, height } => self.resize_surface(width, height),
            HostEvent::DrawFrame => self.on_draw_frame(),
        }
    }

    pub fn set_up(&mut self, host: HostContext) {
        let Some(next) = self.admit(EventKind::SetUp) else {
            return;
        };

        self.host = host;
        self.state = next;
        log::info!("renderer set up");
    }

    pub fn on_surface_created(&mut self) {
        let Some(next) = self.admit(EventKind::SurfaceCreated) else {
            return;
        };

        match self.context.on_context_created(&self.host) {
            Ok(id) => {
                self.stats.contexts_created += 1;
                log::info!("surface created, resource set {id}");
            }
            Err(err) => {
                self.stats.backend_failures += 1;
                self.report(err);
            }
        }
        self.clock.reset();

        if let Some((width, height)) = self.pending_resize.take() {
            log::debug!("replaying deferred resize {width}x{height}");
            self.surface.update_dimensions(width, height);
            self.forward_resize();
        }

        self.state = next;
        self.check_invariants();
    }

    pub fn on_surface_destroyed(&mut self) {
        let Some(next) = self.admit(EventKind::SurfaceDestroyed) else {
            return;
        };

        self.release_context();
        self.surface.invalidate();
        self.state = next;
        log::info!("surface destroyed");
        self.check_invariants();
    }

    /// Records a new surface size. Negative extents clamp to zero.
    ///
    /// While the surface is lost the size is kept and applied verbatim on the
    /// next surface creation.
    pub fn resize_surface(&mut self, width: i32, height: i32) {
        let Some(next) = self.admit(EventKind::Resize) else {
            return;
        };

        let (width, height) = (clamp_extent(width), clamp_extent(height));
        match self.state {
            LifecycleState::SurfaceLost => {
                log::debug!("deferring resize {width}x{height} until the surface returns");
                self.pending_resize = Some((width, height));
            }
            _ => {
                log::debug!("surface resized to {width}x{height}");
                self.surface.update_dimensions(width, height);
                self.forward_resize();
            }
        }
        self.state = next;
    }

    /// Draws one frame if the renderer is active and no frame is in flight.
    pub fn on_draw_frame(&mut self) {
        if !self.ready_to_draw() {
            return;
        }

        let scheduler = Arc::clone(&self.scheduler);
        let Some(frame) = scheduler.try_begin_frame() else {
            log::trace!("frame dropped: previous frame still in flight");
            return;
        };
        self.render_frame(frame);
    }

    pub fn tear_down(&mut self) {
        let Some(next) = self.admit(EventKind::TearDown) else {
            return;
        };

        self.release_context();
        self.surface.invalidate();
        self.pending_resize = None;
        self.host = HostContext::empty();
        self.state = next;
        log::info!("renderer torn down");
        self.check_invariants();
    }

    /// Checks the draw request against the current state, counting and
    /// reporting requests that cannot be drawn.
    pub(crate) fn ready_to_draw(&mut self) -> bool {
        match self.state.transition(EventKind::DrawFrame) {
            Transition::Move(_) => true,
            Transition::Skip => {
                self.stats.frames_skipped += 1;
                log::trace!("frame skipped: renderer is {}", self.state);
                false
            }
            Transition::Illegal => {
                self.stats.frames_skipped += 1;
                self.report(RendererError::IllegalTransition {
                    event: EventKind::DrawFrame,
                    state: self.state,
                });
                false
            }
        }
    }

    /// Renders an admitted frame. The frame ends when `frame` drops, whatever
    /// the outcome.
    pub(crate) fn render_frame(&mut self, frame: FrameGuard<'_>) {
        self.stats.frames_admitted += 1;

        let info = FrameInfo {
            index: frame.index(),
            surface: self.surface,
            time: self.clock.tick(),
        };

        match self.context.render(&info) {
            Ok(()) => self.stats.frames_rendered += 1,
            Err(err @ RendererError::InvalidRenderState(_)) => {
                self.stats.frames_skipped += 1;
                self.report(err);
            }
            Err(err) => {
                self.stats.backend_failures += 1;
                self.report(err);
            }
        }
    }

    fn admit(&mut self, event: EventKind) -> Option<LifecycleState> {
        match self.state.transition(event) {
            Transition::Move(next) => Some(next),
            Transition::Skip | Transition::Illegal => {
                self.report(RendererError::IllegalTransition {
                    event,
                    state: self.state,
                });
                None
            }
        }
    }

    fn release_context(&mut self) {
        if let Some(id) = self.context.on_context_destroyed() {
            self.stats.contexts_released += 1;
            log::debug!("context released, resource set {id}");
        }
    }

    fn forward_resize(&mut self) {
        if let Err(err) = self.context.resize(self.surface) {
            self.stats.backend_failures += 1;
            self.report(err);
        }
    }

    fn check_invariants(&mut self) {
        if let Err(err) = self.context.check_invariants() {
            debug_assert!(false, "{err}");
            self.report(err);
        }
    }

    fn report(&mut self, err: RendererError) {
        if let RendererError::IllegalTransition { .. } = err {
            self.stats.illegal_transitions += 1;
        }
        log::log!(err.level(), "{err}");
        self.diagnostics.record(err);
    }
}
