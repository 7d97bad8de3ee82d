use std::time::{Duration, Instant};

/// Frame timing snapshot handed to the backend with every admitted frame.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous frame on this context, clamped.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Frames ticked since the clock was last reset; `0` is the first frame
    /// drawn on a freshly created context.
    pub context_frame: u64,
}

impl FrameTime {
    /// True for the first frame after a context (re)creation.
    pub fn is_first_on_context(&self) -> bool {
        self.context_frame == 0
    }
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stalled or backgrounded host does not hand a
/// huge step to the backend.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    context_frame: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub const DEFAULT_DT_MIN: Duration = Duration::from_micros(100);
    pub const DEFAULT_DT_MAX: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::with_clamps(Self::DEFAULT_DT_MIN, Self::DEFAULT_DT_MAX)
    }

    /// Creates a clock with custom delta-time clamps.
    ///
    /// Inverted clamps are swapped rather than rejected.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        let (dt_min, dt_max) = if dt_min <= dt_max {
            (dt_min, dt_max)
        } else {
            (dt_max, dt_min)
        };
        Self {
            last: Instant::now(),
            context_frame: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the baseline; the next tick is reported as the first frame.
    pub fn reset(&mut self) {
        self.last = Instant::now();
        self.context_frame = 0;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            context_frame: self.context_frame,
        };

        self.context_frame = self.context_frame.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
