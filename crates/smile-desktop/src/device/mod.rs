//! wgpu graphics backend.
//!
//! Each surface creation reported to the renderer allocates a fresh wgpu
//! surface, device and queue bound to the host window; surface destruction
//! drops them. Frames are cleared to a solid color and presented.

mod backend;
mod init;
mod surface;

pub use backend::WgpuBackend;
pub use init::GpuInit;
