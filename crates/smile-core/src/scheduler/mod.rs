//! Frame admission.
//!
//! Draw requests never overlap: a request arriving while a frame is still
//! executing is dropped, not queued. Admission is lock-free so hosts can test
//! it before contending for the renderer lock.

mod frame;

pub use frame::{FrameGuard, FrameScheduler, FrameSlot};
