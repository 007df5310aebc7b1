use anyhow::Context;
use log::{debug, info};
use rticore::codec::BinaryCodec;
use rticore::telemetry::MetricsSnapshot;
use serde::Serialize;
use std::thread;

use crate::workflow::config::ReplayConfig;

/// Summary of one replay run, printed as the process result.
#[derive(Debug, Serialize)]
pub struct ReplayResult {
    pub ensembles_decoded: u64,
    pub last_ensemble_number: u32,
    pub metrics: MetricsSnapshot,
}

/// Drives a byte stream through the codec and drains the decoded output.
pub struct Runner {
    config: ReplayConfig,
}

impl Runner {
    pub fn new(config: ReplayConfig) -> Self {
        Self { config }
    }

    /// Push `stream` through a fresh codec in `chunk_size` pieces while a
    /// consumer thread drains the decoded ensembles.
    pub fn execute(&self, stream: &[u8]) -> anyhow::Result<ReplayResult> {
        let (codec, ensembles) = BinaryCodec::new(self.config.to_codec_config())
            .context("starting codec")?;

        let consumer = thread::spawn(move || {
            let mut decoded = 0u64;
            let mut last_number = 0u32;
            for ensemble in ensembles.iter() {
                decoded += 1;
                if let Some(info) = ensemble.ensemble_data {
                    last_number = info.ensemble_number;
                    debug!(
                        "decoded ensemble {} ({} bins, {} beams)",
                        info.ensemble_number, info.num_bins, info.num_beams
                    );
                }
            }
            (decoded, last_number)
        });

        for chunk in stream.chunks(self.config.chunk_size.max(1)) {
            codec.push(chunk.to_vec())?;
        }

        let metrics = codec.shutdown();
        let (ensembles_decoded, last_ensemble_number) = consumer
            .join()
            .map_err(|_| anyhow::anyhow!("consumer thread panicked"))?;

        info!(
            "replay finished: {} ensembles decoded, {} checksum failures",
            ensembles_decoded, metrics.checksum_failures
        );

        Ok(ReplayResult {
            ensembles_decoded,
            last_ensemble_number,
            metrics,
        })
    }
}
