use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::context::{GraphicsBackend, HostContext};
use crate::scheduler::FrameScheduler;

use super::{HostEventSink, RendererCore};

/// Thread-safe renderer handle for host bindings.
///
/// A single lock guards every state transition, so `tear_down` from the UI
/// thread cannot interleave with a draw or surface callback on the render
/// thread: it waits for the one frame holding the lock, then releases the
/// context synchronously.
///
/// The in-flight slot is claimed on the lock-free scheduler before the lock
/// is taken, so a draw request arriving while another frame is executing is
/// dropped instead of queueing behind it. The frame is numbered only under
/// the lock, once the renderer is known to be active; a request that finds
/// it inactive frees the slot without advancing the frame counter.
pub struct SharedRenderer<B: GraphicsBackend> {
    core: Mutex<RendererCore<B>>,
    scheduler: Arc<FrameScheduler>,
}

impl<B: GraphicsBackend> SharedRenderer<B> {
    pub fn new(core: RendererCore<B>) -> Self {
        let scheduler = core.scheduler();
        Self {
            core: Mutex::new(core),
            scheduler,
        }
    }

    /// Locks the renderer for inspection or direct calls.
    ///
    /// A lock poisoned by a panicking backend is recovered: the core's state
    /// is updated only after backend calls return, so it stays consistent.
    pub fn lock(&self) -> MutexGuard<'_, RendererCore<B>> {
        self.core.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            log::warn!("renderer lock poisoned by a panicking frame; recovering");
            poisoned.into_inner()
        })
    }

    pub fn into_inner(self) -> RendererCore<B> {
        self.core
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<B> HostEventSink for SharedRenderer<B>
where
    B: GraphicsBackend + Send,
    B::Resources: Send,
{
    fn set_up(&self, host: HostContext) {
        self.lock().set_up(host);
    }

    fn tear_down(&self) {
        self.lock().tear_down();
    }

    fn on_surface_created(&self) {
        self.lock().on_surface_created();
    }

    fn on_surface_destroyed(&self) {
        self.lock().on_surface_destroyed();
    }

    fn resize_surface(&self, width: i32, height: i32) {
        self.lock().resize_surface(width, height);
    }

    fn on_draw_frame(&self) {
        let Some(slot) = self.scheduler.try_claim() else {
            log::trace!("frame dropped: previous frame still in flight");
            return;
        };

        let mut core = self.lock();
        if core.ready_to_draw() {
            core.render_frame(slot.admit());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RendererConfig;
    use crate::renderer::{HostEvent, LifecycleState};
    use crate::testing::{Call, Recorder, RecordingBackend};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    fn shared() -> (Arc<SharedRenderer<RecordingBackend>>, Recorder) {
        let (backend, rec) = RecordingBackend::new();
        let core = RendererCore::new(backend, RendererConfig::default());
        (Arc::new(SharedRenderer::new(core)), rec)
    }

    fn activate(r: &SharedRenderer<RecordingBackend>) {
        r.set_up(HostContext::empty());
        r.on_surface_created();
        r.resize_surface(100, 100);
    }

    #[test]
    fn sink_is_object_safe_and_dispatches() {
        let (r, rec) = shared();
        let sink: Arc<dyn HostEventSink> = r.clone();

        for event in [
            HostEvent::SetUp(HostContext::empty()),
            HostEvent::SurfaceCreated,
            HostEvent::Resize { width: 4, height: 3 },
            HostEvent::DrawFrame,
        ] {
            sink.dispatch(event);
        }

        assert_eq!(r.lock().state(), LifecycleState::Active);
        assert_eq!(rec.renders(), 1);
    }

    #[test]
    fn tear_down_waits_for_in_flight_frame() {
        let (r, rec) = shared();
        activate(&r);

        let (entered_tx, entered_rx) = mpsc::channel::<()>();
        let (resume_tx, resume_rx) = mpsc::channel::<()>();
        let resume_rx = Mutex::new(resume_rx);
        rec.set_render_hook(move || {
            let _ = entered_tx.send(());
            let _ = resume_rx.lock().map(|rx| rx.recv());
        });

        let drawer = {
            let r = Arc::clone(&r);
            thread::spawn(move || r.on_draw_frame())
        };
        entered_rx.recv().unwrap();

        // A second draw while the first is executing returns immediately.
        r.on_draw_frame();
        assert_eq!(r.scheduler.dropped_frames(), 1);

        let tearer = {
            let r = Arc::clone(&r);
            thread::spawn(move || r.tear_down())
        };
        thread::sleep(Duration::from_millis(50));
        assert_eq!(rec.releases(), 0, "context released under an in-flight frame");

        resume_tx.send(()).unwrap();
        drawer.join().unwrap();
        tearer.join().unwrap();

        let calls = rec.calls();
        assert_eq!(
            calls[calls.len() - 3..],
            [
                Call::Render { token: 1, width: 100, height: 100 },
                Call::Present(1),
                Call::Release(1),
            ]
        );
        assert_eq!(r.lock().state(), LifecycleState::TornDown);
        assert!(!r.scheduler.is_frame_in_flight());
    }

    #[test]
    fn panicking_frame_does_not_wedge_the_renderer() {
        let (r, rec) = shared();
        activate(&r);
        rec.set_render_hook(|| panic!("driver crashed mid-frame"));

        let drawer = {
            let r = Arc::clone(&r);
            thread::spawn(move || r.on_draw_frame())
        };
        assert!(drawer.join().is_err());

        assert!(!r.scheduler.is_frame_in_flight());
        r.tear_down();
        assert_eq!(rec.releases(), 1);
        assert_eq!(r.lock().state(), LifecycleState::TornDown);
    }

    #[test]
    fn draw_waiting_on_tear_down_is_skipped_uncounted() {
        let (r, rec) = shared();
        activate(&r);

        let drawer = {
            let mut core = r.lock();
            let drawer = {
                let r = Arc::clone(&r);
                thread::spawn(move || r.on_draw_frame())
            };
            // The drawer holds the slot and is blocked on the lock we hold.
            while !r.scheduler.is_frame_in_flight() {
                thread::yield_now();
            }
            core.tear_down();
            drawer
        };
        drawer.join().unwrap();

        let core = r.lock();
        assert_eq!(core.state(), LifecycleState::TornDown);
        assert_eq!(rec.renders(), 0);
        assert_eq!(core.stats().frames_admitted, 0);
        assert_eq!(r.scheduler.frame_counter(), 0);
        assert!(!r.scheduler.is_frame_in_flight());
    }

    // ── frame numbering ───────────────────────────────────────────────────

    #[test]
    fn draws_outside_active_leave_frame_counter_alone() {
        let (r, rec) = shared();

        r.on_draw_frame();
        r.set_up(HostContext::empty());
        r.on_draw_frame();
        r.on_surface_created();
        r.resize_surface(10, 10);
        r.on_draw_frame();
        r.on_surface_destroyed();
        r.resize_surface(12, 12);
        r.on_draw_frame();
        r.on_surface_created();
        r.on_draw_frame();
        r.tear_down();
        r.on_draw_frame();

        let core = r.lock();
        assert_eq!(rec.frame_indices(), vec![1, 2]);
        assert_eq!(core.stats().frames_admitted, 2);
        assert_eq!(r.scheduler.frame_counter(), core.stats().frames_admitted);
        assert_eq!(core.stats().frames_dropped, 0);
        assert!(!r.scheduler.is_frame_in_flight());
    }
}
