use gluekit_core::PositionSample;
use std::collections::VecDeque;

/// Fixed-capacity FIFO of trail samples.
///
/// Samples are kept in arrival order; pushing past capacity evicts the
/// oldest sample.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    samples: VecDeque<PositionSample>,
    capacity: usize,
}

impl TrailBuffer {
    /// Create an empty buffer. A capacity of zero is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, returning the evicted one if the buffer was full
    pub fn push(&mut self, sample: PositionSample) -> Option<PositionSample> {
        let evicted = if self.samples.len() == self.capacity {
            self.samples.pop_front()
        } else {
            None
        };
        self.samples.push_back(sample);
        evicted
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionSample> {
        self.samples.iter()
    }

    /// Owned copy of the contents, oldest first
    pub fn to_vec(&self) -> Vec<PositionSample> {
        self.samples.iter().copied().collect()
    }
}
