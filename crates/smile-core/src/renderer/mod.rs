//! Renderer lifecycle state machine.
//!
//! `RendererCore` receives host events, checks them against its current
//! state, and drives the context lifecycle and frame scheduler. Hosts that
//! deliver lifecycle and surface events from different threads hold a
//! `SharedRenderer` through the `HostEventSink` interface instead.

mod core;
mod diagnostics;
mod event;
mod shared;
mod state;

pub use self::core::RendererCore;
pub use diagnostics::{Diagnostics, RendererStats};
pub use event::{HostEvent, HostEventSink};
pub use shared::SharedRenderer;
pub use state::{EventKind, LifecycleState, Transition};
