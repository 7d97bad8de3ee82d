//! Test double for `GraphicsBackend`.

use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{bail, Result};

use crate::context::{FrameInfo, GraphicsBackend, HostContext};
use crate::surface::SurfaceState;

/// Backend call observed by the recorder. Resource sets are identified by a
/// token assigned at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(u64),
    Release(u64),
    Resize { width: u32, height: u32 },
    Render { token: u64, width: u32, height: u32 },
    Present(u64),
}

type Hook = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    frame_indices: Vec<u64>,
    next_token: u64,
    fail_next_create: bool,
    fail_renders: bool,
    render_hook: Option<Hook>,
}

/// Shared view of everything a `RecordingBackend` was asked to do.
#[derive(Clone, Default)]
pub(crate) struct Recorder {
    inner: Arc<Mutex<Inner>>,
}

impl Recorder {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.lock().calls.iter().filter(|c| pred(c)).count()
    }

    /// `FrameInfo::index` of every frame handed to `render`, failed or not.
    pub(crate) fn frame_indices(&self) -> Vec<u64> {
        self.lock().frame_indices.clone()
    }

    pub(crate) fn creates(&self) -> usize {
        self.count(|c| matches!(c, Call::Create(_)))
    }

    pub(crate) fn releases(&self) -> usize {
        self.count(|c| matches!(c, Call::Release(_)))
    }

    pub(crate) fn renders(&self) -> usize {
        self.count(|c| matches!(c, Call::Render { .. }))
    }

    pub(crate) fn presents(&self) -> usize {
        self.count(|c| matches!(c, Call::Present(_)))
    }

    pub(crate) fn fail_next_create(&self) {
        self.lock().fail_next_create = true;
    }

    pub(crate) fn fail_renders(&self, fail: bool) {
        self.lock().fail_renders = fail;
    }

    /// Runs `hook` inside every `render`, before the call is recorded.
    pub(crate) fn set_render_hook(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.lock().render_hook = Some(Arc::new(hook));
    }
}

pub(crate) struct RecordingBackend {
    recorder: Recorder,
}

impl RecordingBackend {
    pub(crate) fn new() -> (Self, Recorder) {
        let recorder = Recorder::default();
        (
            Self {
                recorder: recorder.clone(),
            },
            recorder,
        )
    }
}

impl GraphicsBackend for RecordingBackend {
    type Resources = u64;

    fn create_resources(&mut self, _host: &HostContext) -> Result<u64> {
        let mut inner = self.recorder.lock();
        if std::mem::take(&mut inner.fail_next_create) {
            bail!("context refused allocation");
        }
        inner.next_token += 1;
        let token = inner.next_token;
        inner.calls.push(Call::Create(token));
        Ok(token)
    }

    fn release_resources(&mut self, token: u64) {
        self.recorder.lock().calls.push(Call::Release(token));
    }

    fn resize(&mut self, _token: &mut u64, surface: SurfaceState) -> Result<()> {
        self.recorder.lock().calls.push(Call::Resize {
            width: surface.width(),
            height: surface.height(),
        });
        Ok(())
    }

    fn render(&mut self, token: &mut u64, frame: &FrameInfo) -> Result<()> {
        let hook = self.recorder.lock().render_hook.clone();
        if let Some(hook) = hook {
            hook();
        }

        let mut inner = self.recorder.lock();
        inner.frame_indices.push(frame.index);
        if inner.fail_renders {
            bail!("draw call rejected");
        }
        inner.calls.push(Call::Render {
            token: *token,
            width: frame.surface.width(),
            height: frame.surface.height(),
        });
        Ok(())
    }

    fn present(&mut self, token: &mut u64) -> Result<()> {
        self.recorder.lock().calls.push(Call::Present(*token));
        Ok(())
    }
}
