//! Time subsystem.
//!
//! Provides frame delta-time for backends that advance a simulation per frame.
//! The renderer owns one `FrameClock` and resets it whenever a new GPU context
//! is created, so time spent without a surface never reaches the backend.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
