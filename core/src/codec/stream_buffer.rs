use std::collections::VecDeque;

/// Occupancy ratio past which the backing storage is shrunk.
const COMPACT_RATIO: usize = 4;
/// Capacity floor below which compaction is never attempted.
const COMPACT_FLOOR: usize = 4096;

/// FIFO accumulator owning all in-flight bytes for one stream.
#[derive(Debug, Default)]
pub struct StreamBuffer {
    bytes: VecDeque<u8>,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk at the tail.
    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend(chunk);
    }

    /// Pop the next byte, consuming it permanently.
    pub fn read_byte(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    /// Pop exactly `count` bytes; `None` (and nothing consumed) when fewer
    /// are buffered.
    pub fn take(&mut self, count: usize) -> Option<Vec<u8>> {
        if self.bytes.len() < count {
            return None;
        }
        Some(self.bytes.drain(..count).collect())
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Release backing storage once capacity far exceeds occupancy. Keeps
    /// long-running streams from pinning the high-water mark of a burst.
    pub fn compact(&mut self) {
        let capacity = self.bytes.capacity();
        if capacity > COMPACT_FLOOR && capacity / COMPACT_RATIO > self.bytes.len() {
            self.bytes.shrink_to(self.bytes.len().max(COMPACT_FLOOR));
        }
    }
}
