//! GPU context resource ownership.
//!
//! This module is responsible for:
//! - the `GraphicsBackend` seam hosts implement for their graphics API
//! - owning at most one live resource set per context
//! - releasing that set synchronously when the context goes away

mod backend;
mod host;
mod lifecycle;
mod resource;

pub use backend::{FrameInfo, GraphicsBackend};
pub use host::HostContext;
pub use lifecycle::ContextLifecycle;
pub use resource::{ResourceSet, ResourceSetId};
