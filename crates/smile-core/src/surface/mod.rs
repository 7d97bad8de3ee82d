//! Drawing surface bookkeeping.
//!
//! Hosts report surface sizes as signed integers; this module owns the
//! clamped, validity-tracked record the rest of the core sizes against.

mod state;

pub use state::{clamp_extent, SurfaceState};
