use crate::error::{BackendStage, InvalidRenderReason, RendererError};
use crate::surface::SurfaceState;

use super::{FrameInfo, GraphicsBackend, HostContext, ResourceSet, ResourceSetId};

/// Owns the GPU-context-bound resource set and the backend that allocates it.
///
/// Invariant: a resource set only exists while the context is live. At most
/// one set is live at a time; a new context releases the previous set before
/// allocating.
pub struct ContextLifecycle<B: GraphicsBackend> {
    backend: B,
    live: Option<ResourceSet<B::Resources>>,
    context_live: bool,
    next_id: ResourceSetId,
}

impl<B: GraphicsBackend> ContextLifecycle<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            live: None,
            context_live: false,
            next_id: ResourceSetId::FIRST,
        }
    }

    /// Allocates a fresh resource set for a newly created context.
    ///
    /// A set left over from a lost context is released first. On backend
    /// failure the context is still marked live but holds no resources, so
    /// every render fails until the next context.
    pub fn on_context_created(
        &mut self,
        host: &HostContext,
    ) -> Result<ResourceSetId, RendererError> {
        if let Some(stale) = self.live.take() {
            log::debug!("releasing resource set {} left over from a lost context", stale.id);
            self.backend.release_resources(stale.resources);
        }

        self.context_live = true;

        let id = self.next_id;
        self.next_id = id.next();

        let resources = self
            .backend
            .create_resources(host)
            .map_err(|e| RendererError::backend(BackendStage::Create, e))?;

        self.live = Some(ResourceSet { id, resources });
        log::debug!("resource set {id} allocated");
        Ok(id)
    }

    /// Releases the live resource set, if any, and marks the context lost.
    ///
    /// Returns the id of the released set; `None` means nothing was released.
    pub fn on_context_destroyed(&mut self) -> Option<ResourceSetId> {
        self.context_live = false;

        let set = self.live.take()?;
        self.backend.release_resources(set.resources);
        log::debug!("resource set {} released", set.id);
        Some(set.id)
    }

    /// Renders and presents one frame.
    pub fn render(&mut self, frame: &FrameInfo) -> Result<(), RendererError> {
        let Some(set) = self.live.as_mut() else {
            return Err(RendererError::InvalidRenderState(
                InvalidRenderReason::NoResources,
            ));
        };
        if !frame.surface.is_valid() {
            return Err(RendererError::InvalidRenderState(
                InvalidRenderReason::SurfaceInvalid,
            ));
        }

        self.backend
            .render(&mut set.resources, frame)
            .map_err(|e| RendererError::backend(BackendStage::Render, e))?;
        self.backend
            .present(&mut set.resources)
            .map_err(|e| RendererError::backend(BackendStage::Present, e))
    }

    /// Forwards a valid surface size to the live resource set.
    pub fn resize(&mut self, surface: SurfaceState) -> Result<(), RendererError> {
        let Some(set) = self.live.as_mut() else {
            return Ok(());
        };
        if !surface.is_valid() {
            return Ok(());
        }

        self.backend
            .resize(&mut set.resources, surface)
            .map_err(|e| RendererError::backend(BackendStage::Resize, e))
    }

    pub fn resource_set_id(&self) -> Option<ResourceSetId> {
        self.live.as_ref().map(|set| set.id)
    }

    pub fn has_live_resources(&self) -> bool {
        self.live.is_some()
    }

    pub fn is_context_live(&self) -> bool {
        self.context_live
    }

    /// Checks that no resource set outlives its context.
    pub fn check_invariants(&self) -> Result<(), RendererError> {
        match &self.live {
            Some(set) if !self.context_live => {
                Err(RendererError::ResourceLeakGuard { id: set.id })
            }
            _ => Ok(()),
        }
    }
}

impl<B: GraphicsBackend> Drop for ContextLifecycle<B> {
    fn drop(&mut self) {
        if let Some(set) = self.live.take() {
            log::warn!("resource set {} still live at drop; releasing", set.id);
            self.backend.release_resources(set.resources);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Call, RecordingBackend};
    use crate::time::FrameClock;

    fn frame(surface: SurfaceState) -> FrameInfo {
        FrameInfo {
            index: 1,
            surface,
            time: FrameClock::new().tick(),
        }
    }

    fn valid_surface(w: u32, h: u32) -> SurfaceState {
        let mut s = SurfaceState::new();
        s.update_dimensions(w, h);
        s
    }

    // ── create / destroy ──────────────────────────────────────────────────

    #[test]
    fn created_context_holds_one_live_set() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        let id = ctx.on_context_created(&HostContext::empty()).unwrap();

        assert_eq!(ctx.resource_set_id(), Some(id));
        assert!(ctx.is_context_live());
        assert_eq!(rec.creates(), 1);
        assert!(ctx.check_invariants().is_ok());
    }

    #[test]
    fn recreation_releases_previous_set_first() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        let first = ctx.on_context_created(&HostContext::empty()).unwrap();
        let second = ctx.on_context_created(&HostContext::empty()).unwrap();

        assert!(second > first);
        assert_eq!(rec.calls(), vec![Call::Create(1), Call::Release(1), Call::Create(2)]);
    }

    #[test]
    fn destroy_is_idempotent() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);
        ctx.on_context_created(&HostContext::empty()).unwrap();

        assert!(ctx.on_context_destroyed().is_some());
        assert!(ctx.on_context_destroyed().is_none());
        assert_eq!(rec.releases(), 1);
        assert!(!ctx.is_context_live());
    }

    #[test]
    fn destroy_without_context_is_noop() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        assert!(ctx.on_context_destroyed().is_none());
        assert!(rec.calls().is_empty());
    }

    #[test]
    fn failed_creation_leaves_context_live_without_resources() {
        let (backend, rec) = RecordingBackend::new();
        rec.fail_next_create();
        let mut ctx = ContextLifecycle::new(backend);

        let err = ctx.on_context_created(&HostContext::empty()).unwrap_err();

        assert!(matches!(err, RendererError::Backend { stage: BackendStage::Create, .. }));
        assert!(ctx.is_context_live());
        assert!(!ctx.has_live_resources());
        assert_eq!(
            ctx.render(&frame(valid_surface(1, 1))),
            Err(RendererError::InvalidRenderState(InvalidRenderReason::NoResources))
        );
    }

    #[test]
    fn ids_are_not_reused_after_failed_creation() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        let first = ctx.on_context_created(&HostContext::empty()).unwrap();
        ctx.on_context_destroyed();
        rec.fail_next_create();
        assert!(ctx.on_context_created(&HostContext::empty()).is_err());
        ctx.on_context_destroyed();
        let third = ctx.on_context_created(&HostContext::empty()).unwrap();

        assert_eq!(third.get(), first.get() + 2);
    }

    // ── render ────────────────────────────────────────────────────────────

    #[test]
    fn render_requires_live_set() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        let err = ctx.render(&frame(valid_surface(4, 4))).unwrap_err();

        assert_eq!(err, RendererError::InvalidRenderState(InvalidRenderReason::NoResources));
        assert_eq!(rec.renders(), 0);
    }

    #[test]
    fn render_requires_valid_surface() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);
        ctx.on_context_created(&HostContext::empty()).unwrap();

        let err = ctx.render(&frame(SurfaceState::new())).unwrap_err();

        assert_eq!(err, RendererError::InvalidRenderState(InvalidRenderReason::SurfaceInvalid));
        assert_eq!(rec.renders(), 0);
    }

    #[test]
    fn render_presents_after_success() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);
        ctx.on_context_created(&HostContext::empty()).unwrap();

        ctx.render(&frame(valid_surface(8, 6))).unwrap();

        assert_eq!(
            rec.calls(),
            vec![
                Call::Create(1),
                Call::Render { token: 1, width: 8, height: 6 },
                Call::Present(1),
            ]
        );
    }

    #[test]
    fn failed_render_is_not_presented() {
        let (backend, rec) = RecordingBackend::new();
        rec.fail_renders(true);
        let mut ctx = ContextLifecycle::new(backend);
        ctx.on_context_created(&HostContext::empty()).unwrap();

        let err = ctx.render(&frame(valid_surface(8, 6))).unwrap_err();

        assert!(matches!(err, RendererError::Backend { stage: BackendStage::Render, .. }));
        assert_eq!(rec.presents(), 0);
    }

    // ── resize ────────────────────────────────────────────────────────────

    #[test]
    fn resize_only_reaches_live_set_with_valid_surface() {
        let (backend, rec) = RecordingBackend::new();
        let mut ctx = ContextLifecycle::new(backend);

        ctx.resize(valid_surface(3, 3)).unwrap();
        ctx.on_context_created(&HostContext::empty()).unwrap();
        ctx.resize(SurfaceState::new()).unwrap();
        ctx.resize(valid_surface(5, 7)).unwrap();

        assert_eq!(rec.calls(), vec![Call::Create(1), Call::Resize { width: 5, height: 7 }]);
    }

    // ── drop ──────────────────────────────────────────────────────────────

    #[test]
    fn drop_releases_live_set_once() {
        let (backend, rec) = RecordingBackend::new();
        {
            let mut ctx = ContextLifecycle::new(backend);
            ctx.on_context_created(&HostContext::empty()).unwrap();
        }
        assert_eq!(rec.releases(), 1);
    }

    #[test]
    fn drop_after_destroy_releases_nothing_more() {
        let (backend, rec) = RecordingBackend::new();
        {
            let mut ctx = ContextLifecycle::new(backend);
            ctx.on_context_created(&HostContext::empty()).unwrap();
            ctx.on_context_destroyed();
        }
        assert_eq!(rec.releases(), 1);
    }
}
