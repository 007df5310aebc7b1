use serde::{Deserialize, Serialize};

/// Configuration for one codec instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Capacity of the bounded ingress queue; chunks pushed while the queue
    /// is full are dropped, never queued without bound.
    pub ingress_capacity: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            ingress_capacity: 1024,
        }
    }
}

/// Common error type for codec operations.
#[derive(thiserror::Error, Debug)]
pub enum CodecError {
    #[error("ingress queue full, dropped chunk of {0} bytes")]
    QueueFull(usize),
    #[error("codec worker is no longer running")]
    WorkerStopped,
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type CodecResult<T> = Result<T, CodecError>;
