use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Admits at most one frame at a time and counts admitted frames.
#[derive(Debug, Default)]
pub struct FrameScheduler {
    in_flight: AtomicBool,
    counter: AtomicU64,
    dropped: AtomicU64,
}

impl FrameScheduler {
    pub const fn new() -> Self {
        Self {
            in_flight: AtomicBool::new(false),
            counter: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Admits a frame unless one is already in flight.
    ///
    /// The returned guard carries the new counter value and ends the frame
    /// when dropped, on every exit path.
    pub fn try_begin_frame(&self) -> Option<FrameGuard<'_>> {
        self.try_claim().map(FrameSlot::admit)
    }

    /// Claims the in-flight slot without numbering a frame.
    ///
    /// Lets a caller reject overlapping draws before it has decided whether
    /// the request will be drawn at all. Dropping the slot without admitting it
    /// leaves the frame counter untouched.
    pub fn try_claim(&self) -> Option<FrameSlot<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return None;
        }
        Some(FrameSlot { scheduler: self })
    }

    fn end_frame(&self) {
        let was_in_flight = self.in_flight.swap(false, Ordering::Release);
        debug_assert!(was_in_flight, "frame ended without being admitted");
    }

    /// Number of frames admitted so far.
    pub fn frame_counter(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }

    /// Number of requests rejected because a frame was in flight.
    pub fn dropped_frames(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_frame_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// A claimed in-flight slot that has not been numbered yet. Dropping it
/// frees the slot.
#[must_use = "dropping the slot frees it immediately"]
#[derive(Debug)]
pub struct FrameSlot<'a> {
    scheduler: &'a FrameScheduler,
}

impl<'a> FrameSlot<'a> {
    /// Numbers the frame. The slot stays claimed until the guard drops.
    pub fn admit(self) -> FrameGuard<'a> {
        let index = self.scheduler.counter.fetch_add(1, Ordering::Relaxed) + 1;
        FrameGuard { _slot: self, index }
    }
}

impl Drop for FrameSlot<'_> {
    fn drop(&mut self) {
        self.scheduler.end_frame();
    }
}

/// An admitted frame. Dropping it ends the frame.
#[must_use = "dropping the guard ends the frame immediately"]
#[derive(Debug)]
pub struct FrameGuard<'a> {
    _slot: FrameSlot<'a>,
    index: u64,
}

impl FrameGuard<'_> {
    /// Counter value assigned at admission.
    pub fn index(&self) -> u64 {
        self.index
    }

    /// Ends the frame explicitly.
    pub fn end(self) {}
}
