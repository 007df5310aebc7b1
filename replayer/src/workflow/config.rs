use anyhow::Context;
use rticore::prelude::CodecConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Number of synthetic ensembles to generate when no capture file is
    /// replayed.
    pub ensembles: usize,
    pub bins: usize,
    pub beams: usize,
    /// Bytes per chunk pushed into the codec.
    pub chunk_size: usize,
    pub ingress_capacity: usize,
    pub seed: u64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            ensembles: 10,
            bins: 30,
            beams: 4,
            chunk_size: 512,
            ingress_capacity: 1024,
            seed: 0,
        }
    }
}

impl ReplayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading replay config {}", path_ref.display()))?;
        let config: ReplayConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing replay config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_args(ensembles: usize, bins: usize, beams: usize, chunk_size: usize) -> Self {
        Self {
            ensembles,
            bins,
            beams,
            chunk_size,
            ..Self::default()
        }
    }

    pub fn to_codec_config(&self) -> CodecConfig {
        CodecConfig {
            ingress_capacity: self.ingress_capacity,
        }
    }
}
