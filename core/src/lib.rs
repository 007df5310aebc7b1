//! Core ensemble decoding for RTI acoustic Doppler current profilers.
//!
//! The modules turn a raw, possibly fragmented byte stream into structured
//! ensembles: frame synchronization on the repeating 0x80 sentinel, checksum
//! verification, and decoding of the self-describing data sets carried in
//! each frame.

pub mod codec;
pub mod ensemble;
pub mod prelude;
pub mod telemetry;

pub use codec::{BinaryCodec, EnsembleStream};
pub use prelude::{CodecConfig, CodecError, CodecResult};
