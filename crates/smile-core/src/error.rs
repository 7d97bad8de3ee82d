//! Error taxonomy for the renderer core.
//!
//! None of these reach the host: every entry point absorbs them into the
//! renderer's diagnostics and the `log` facade, and the visible effect is a
//! dropped event or a skipped frame.

use std::fmt;

use crate::context::ResourceSetId;
use crate::renderer::{EventKind, LifecycleState};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RendererError {
    /// Event delivered outside its legal state set. The event was dropped.
    #[error("`{event}` is not legal while {state}")]
    IllegalTransition {
        event: EventKind,
        state: LifecycleState,
    },

    /// A frame reached the backend without a live resource set or a valid
    /// surface. The frame was skipped.
    #[error("cannot render: {0}")]
    InvalidRenderState(InvalidRenderReason),

    /// A resource set is alive although its context is gone.
    #[error("resource set {id} outlived its context")]
    ResourceLeakGuard { id: ResourceSetId },

    /// The graphics backend reported a failure.
    #[error("backend failed to {stage}: {message}")]
    Backend { stage: BackendStage, message: String },
}

impl RendererError {
    /// Flattens a backend error, keeping its context chain.
    pub(crate) fn backend(stage: BackendStage, err: anyhow::Error) -> Self {
        Self::Backend {
            stage,
            message: format!("{err:#}"),
        }
    }

    /// Log level this error is reported at.
    pub fn level(&self) -> log::Level {
        match self {
            Self::IllegalTransition { .. } => log::Level::Warn,
            Self::InvalidRenderState(_) => log::Level::Debug,
            Self::ResourceLeakGuard { .. } | Self::Backend { .. } => log::Level::Error,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRenderReason {
    #[error("no live resource set")]
    NoResources,
    #[error("surface is not valid")]
    SurfaceInvalid,
}

/// Backend call that failed.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BackendStage {
    Create,
    Resize,
    Render,
    Present,
}

impl fmt::Display for BackendStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create resources",
            Self::Resize => "resize",
            Self::Render => "render",
            Self::Present => "present",
        })
    }
}
