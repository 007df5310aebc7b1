pub mod metrics;

pub use metrics::{CodecMetrics, MetricsSnapshot};
