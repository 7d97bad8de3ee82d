use crate::context::HostContext;

use super::EventKind;

/// A host callback as a value, for hosts that queue events before delivering
/// them.
#[derive(Debug, Clone)]
pub enum HostEvent {
    SetUp(HostContext),
    TearDown,
    SurfaceCreated,
    SurfaceDestroyed,
    Resize { width: i32, height: i32 },
    DrawFrame,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::SetUp(_) => EventKind::SetUp,
            Self::TearDown => EventKind::TearDown,
            Self::SurfaceCreated => EventKind::SurfaceCreated,
            Self::SurfaceDestroyed => EventKind::SurfaceDestroyed,
            Self::Resize { .. } => EventKind::Resize,
            Self::DrawFrame => EventKind::DrawFrame,
        }
    }
}

/// The interface a platform binding forwards its native callbacks into.
///
/// Every method is total: illegal or ill-timed events are absorbed and
/// reported through diagnostics, never returned or raised to the host.
pub trait HostEventSink: Send + Sync {
    /// Attaches the host context. Application start.
    fn set_up(&self, host: HostContext);

    /// Releases everything. Application stop.
    fn tear_down(&self);

    /// A drawable surface and its GPU context exist.
    fn on_surface_created(&self);

    /// The surface and its GPU context are going away.
    fn on_surface_destroyed(&self);

    /// Surface size in physical pixels, as reported by the platform.
    fn resize_surface(&self, width: i32, height: i32);

    /// One draw callback from the platform's render loop.
    fn on_draw_frame(&self);

    fn dispatch(&self, event: HostEvent) {
        match event {
            HostEvent::SetUp(host) => self.set_up(host),
            HostEvent::TearDown => self.tear_down(),
            HostEvent::SurfaceCreated => self.on_surface_created(),
            HostEvent::SurfaceDestroyed => self.on_surface_destroyed(),
            HostEvent::Resize { width, height } => self.resize_surface(width, height),
            HostEvent::DrawFrame => self.on_draw_frame(),
        }
    }
}
