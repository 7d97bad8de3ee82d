//! Smile core crate.
//!
//! This crate owns the renderer lifecycle that platform bindings drive:
//! surface bookkeeping, ownership of GPU-context-bound resources, frame
//! admission, and the state machine tying them together. It has no windowing
//! or graphics API dependency; hosts plug those in through
//! [`context::GraphicsBackend`] and forward their callbacks through
//! [`renderer::HostEventSink`].

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod renderer;
pub mod scheduler;
pub mod surface;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use config::RendererConfig;
pub use context::{ContextLifecycle, FrameInfo, GraphicsBackend, HostContext, ResourceSetId};
pub use error::{BackendStage, InvalidRenderReason, RendererError};
pub use renderer::{
    EventKind, HostEvent, HostEventSink, LifecycleState, RendererCore, RendererStats,
    SharedRenderer,
};
pub use scheduler::{FrameGuard, FrameScheduler, FrameSlot};
pub use surface::SurfaceState;
