use std::time::Duration;

use crate::time::FrameClock;

/// Renderer core configuration.
///
/// Keep this minimal; hosts configure their graphics API through their own
/// backend, not here.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Number of absorbed errors kept for inspection. Oldest are evicted.
    ///
    /// `0` disables the history; errors are still logged and counted.
    pub diagnostic_history: usize,

    /// Lower clamp for per-frame delta time.
    pub dt_min: Duration,

    /// Upper clamp for per-frame delta time.
    pub dt_max: Duration,
}

impl RendererConfig {
    pub(crate) fn frame_clock(&self) -> FrameClock {
        FrameClock::with_clamps(self.dt_min, self.dt_max)
    }
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            diagnostic_history: 32,
            dt_min: FrameClock::DEFAULT_DT_MIN,
            dt_max: FrameClock::DEFAULT_DT_MAX,
        }
    }
}
