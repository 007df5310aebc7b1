use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Counters for one codec instance.
pub struct CodecMetrics {
    inner: Mutex<Counters>,
}

#[derive(Default)]
struct Counters {
    chunks_received: u64,
    chunks_dropped: u64,
    frames_extracted: u64,
    checksum_failures: u64,
    ensembles_decoded: u64,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub chunks_received: u64,
    pub chunks_dropped: u64,
    pub frames_extracted: u64,
    pub checksum_failures: u64,
    pub ensembles_decoded: u64,
}

impl CodecMetrics {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Counters::default()),
        }
    }

    pub fn record_chunk(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.chunks_received += 1;
        }
    }

    pub fn record_dropped_chunk(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.chunks_dropped += 1;
        }
    }

    pub fn record_frame(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.frames_extracted += 1;
        }
    }

    pub fn record_checksum_failure(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.checksum_failures += 1;
        }
    }

    pub fn record_ensemble(&self) {
        if let Ok(mut counters) = self.inner.lock() {
            counters.ensembles_decoded += 1;
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        if let Ok(counters) = self.inner.lock() {
            MetricsSnapshot {
                chunks_received: counters.chunks_received,
                chunks_dropped: counters.chunks_dropped,
                frames_extracted: counters.frames_extracted,
                checksum_failures: counters.checksum_failures,
                ensembles_decoded: counters.ensembles_decoded,
            }
        } else {
            MetricsSnapshot::default()
        }
    }
}

impl Default for CodecMetrics {
    fn default() -> Self {
        Self::new()
    }
}
