use anyhow::Result;

use crate::surface::SurfaceState;
use crate::time::FrameTime;

use super::HostContext;

/// Per-frame input handed to the backend.
#[derive(Debug, Copy, Clone)]
pub struct FrameInfo {
    /// Scheduler counter value of the admitted frame.
    pub index: u64,
    /// Surface the frame is drawn into. Always valid when the backend sees it.
    pub surface: SurfaceState,
    pub time: FrameTime,
}

/// Graphics API seam consumed by the core.
///
/// A backend allocates everything that lives inside a GPU context (buffers,
/// programs, textures, swapchains) as one `Resources` value. The core owns that
/// value between `create_resources` and `release_resources` and never hands it
/// out after the context that created it is gone.
///
/// Every method runs on the thread that delivers surface events, with the
/// renderer lock held.
pub trait GraphicsBackend {
    type Resources;

    /// Allocates a fresh resource set on a newly created context.
    fn create_resources(&mut self, host: &HostContext) -> Result<Self::Resources>;

    /// Releases a resource set. Must complete before returning: the context
    /// may already be invalid by the time this runs, so nothing can be
    /// deferred.
    fn release_resources(&mut self, resources: Self::Resources);

    /// Reconfigures size-dependent resources for a valid surface.
    fn resize(&mut self, resources: &mut Self::Resources, surface: SurfaceState) -> Result<()> {
        let _ = (resources, surface);
        Ok(())
    }

    /// Records and submits one frame.
    fn render(&mut self, resources: &mut Self::Resources, frame: &FrameInfo) -> Result<()>;

    /// Presents the frame recorded by the last successful `render`.
    fn present(&mut self, resources: &mut Self::Resources) -> Result<()> {
        let _ = resources;
        Ok(())
    }
}
