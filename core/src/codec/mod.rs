//! Frame synchronization, verification, and decode over the raw byte stream.

pub mod checksum;
pub mod decoder;
pub mod frame_sync;
pub mod pipeline;
pub mod stream_buffer;

#[cfg(test)]
pub(crate) mod testutil;

pub use checksum::{payload_checksum, verify_frame};
pub use decoder::decode_ensemble;
pub use frame_sync::{Frame, FrameSynchronizer};
pub use pipeline::{BinaryCodec, EnsembleStream};
pub use stream_buffer::StreamBuffer;

/// Byte repeated sixteen times to mark the start of a frame header.
pub const SENTINEL: u8 = 0x80;
/// Sentinel run length opening every frame header.
pub const SENTINEL_LEN: usize = 16;
/// Full frame header: sentinel run plus four u32 fields.
pub const HEADER_LEN: usize = 32;
/// Checksum trailer closing every frame.
pub const CHECKSUM_LEN: usize = 4;
