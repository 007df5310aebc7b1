//! Concurrency harness moving raw chunks in and decoded ensembles out.
//!
//! One dedicated worker thread exclusively owns the frame synchronizer and
//! every piece of decode state; per chunk it appends and then attempts
//! exactly one extract-verify-decode cycle. Ingress is a bounded queue that
//! drops on overflow instead of blocking the producer; egress is a
//! zero-capacity rendezvous, so an unconsumed ensemble back-propagates
//! pressure through the whole pipeline.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use log::{debug, warn};

use crate::codec::checksum::verify_frame;
use crate::codec::decoder::decode_ensemble;
use crate::codec::frame_sync::FrameSynchronizer;
use crate::ensemble::Ensemble;
use crate::prelude::{CodecConfig, CodecError, CodecResult};
use crate::telemetry::{CodecMetrics, MetricsSnapshot};

/// Consumer half: blocking pull of decoded ensembles.
pub struct EnsembleStream {
    receiver: Receiver<Ensemble>,
}

impl EnsembleStream {
    /// Block until the next ensemble is decoded; `None` once the codec has
    /// shut down and no further ensembles will arrive.
    pub fn next_ensemble(&self) -> Option<Ensemble> {
        self.receiver.recv().ok()
    }

    /// Iterate over decoded ensembles until shutdown.
    pub fn iter(&self) -> crossbeam_channel::Iter<'_, Ensemble> {
        self.receiver.iter()
    }
}

/// Producer half and worker owner. Independent streams get independent
/// codec instances; nothing is shared between them.
pub struct BinaryCodec {
    ingress: Sender<Vec<u8>>,
    worker: JoinHandle<()>,
    metrics: Arc<CodecMetrics>,
}

impl BinaryCodec {
    /// Spawn the decode worker and return the producer handle paired with
    /// the consumer stream.
    pub fn new(config: CodecConfig) -> CodecResult<(Self, EnsembleStream)> {
        if config.ingress_capacity == 0 {
            return Err(CodecError::InvalidConfig(
                "ingress capacity must be at least 1".into(),
            ));
        }

        let (ingress, chunks) = bounded::<Vec<u8>>(config.ingress_capacity);
        let (ensembles, receiver) = bounded::<Ensemble>(0);
        let metrics = Arc::new(CodecMetrics::new());

        let worker_metrics = metrics.clone();
        let worker = thread::spawn(move || run_worker(chunks, ensembles, worker_metrics));

        Ok((
            Self {
                ingress,
                worker,
                metrics,
            },
            EnsembleStream { receiver },
        ))
    }

    /// Submit a chunk of raw bytes. Never blocks: when the ingress queue is
    /// full the chunk is dropped, counted, and reported back.
    pub fn push(&self, chunk: Vec<u8>) -> CodecResult<()> {
        match self.ingress.try_send(chunk) {
            Ok(()) => {
                self.metrics.record_chunk();
                Ok(())
            }
            Err(TrySendError::Full(chunk)) => {
                self.metrics.record_dropped_chunk();
                warn!("ingress queue full, dropping chunk of {} bytes", chunk.len());
                Err(CodecError::QueueFull(chunk.len()))
            }
            Err(TrySendError::Disconnected(_)) => Err(CodecError::WorkerStopped),
        }
    }

    /// Current counters.
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Close ingress, let the worker drain whatever was already queued, and
    /// join it. Bytes of a partially buffered frame are discarded, never
    /// flushed. Returns the final counters.
    pub fn shutdown(self) -> MetricsSnapshot {
        drop(self.ingress);
        if self.worker.join().is_err() {
            warn!("codec worker panicked during shutdown");
        }
        self.metrics.snapshot()
    }
}

/// Worker loop: strictly sequential append / extract / verify / decode per
/// chunk. Ends cooperatively between chunks once ingress disconnects, or
/// immediately when the consumer goes away mid-handoff.
fn run_worker(chunks: Receiver<Vec<u8>>, ensembles: Sender<Ensemble>, metrics: Arc<CodecMetrics>) {
    let mut sync = FrameSynchronizer::new();

    for chunk in chunks.iter() {
        sync.append(&chunk);

        let frame = match sync.try_extract() {
            Some(frame) => frame,
            None => continue,
        };
        metrics.record_frame();

        if !verify_frame(&frame.bytes) {
            metrics.record_checksum_failure();
            debug!(
                "discarding ensemble {} ({} payload bytes): checksum mismatch",
                frame.ensemble_number, frame.payload_size
            );
            continue;
        }

        let ensemble = decode_ensemble(&frame.bytes);
        if ensembles.send(ensemble).is_err() {
            break;
        }
        metrics.record_ensemble();
    }
}
