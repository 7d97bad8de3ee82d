use std::collections::VecDeque;

use crate::error::RendererError;

/// Counters describing what the renderer did with the events it received.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RendererStats {
    pub contexts_created: u64,
    pub contexts_released: u64,
    /// Draw requests the scheduler admitted while active.
    pub frames_admitted: u64,
    /// Admitted frames the backend rendered and presented.
    pub frames_rendered: u64,
    /// Draw requests rejected because a frame was in flight.
    pub frames_dropped: u64,
    /// Draw requests ignored for lack of a drawable state or surface.
    pub frames_skipped: u64,
    pub illegal_transitions: u64,
    pub backend_failures: u64,
}

/// Bounded history of absorbed errors, oldest first.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    history: VecDeque<RendererError>,
    capacity: usize,
}

impl Diagnostics {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub(crate) fn record(&mut self, err: RendererError) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(err);
    }

    pub fn iter(&self) -> impl Iterator<Item = &RendererError> {
        self.history.iter()
    }

    pub fn last(&self) -> Option<&RendererError> {
        self.history.back()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}
