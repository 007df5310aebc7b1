//! Locating and extracting frames inside the byte stream.
//!
//! A frame header is 32 bytes:
//!
//!   Bytes  0 .. 15 = sixteen 0x80 sentinel bytes
//!   Bytes 16 .. 19 = ensemble number (u32 LE)
//!   Bytes 20 .. 23 = bitwise NOT of the ensemble number
//!   Bytes 24 .. 27 = payload size (u32 LE)
//!   Bytes 28 .. 31 = bitwise NOT of the payload size
//!
//! followed by `payload size` payload bytes and a 4-byte checksum trailer.

use byteorder::{ByteOrder, LittleEndian};

use crate::codec::stream_buffer::StreamBuffer;
use crate::codec::{CHECKSUM_LEN, HEADER_LEN, SENTINEL, SENTINEL_LEN};

const HEADER_FIELD_BYTES: usize = 16;

/// A fully buffered frame, header and trailer included. Integrity is not
/// yet verified at this point.
#[derive(Debug, Clone)]
pub struct Frame {
    pub ensemble_number: u32,
    pub payload_size: u32,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Copy)]
struct PendingHeader {
    ensemble_number: u32,
    payload_size: u32,
}

/// Per-stream frame locator. Owns the byte buffer and every piece of scan
/// state, so independent streams never share anything mutable.
#[derive(Debug, Default)]
pub struct FrameSynchronizer {
    buffer: StreamBuffer,
    sentinel_run: usize,
    field_bytes: [u8; HEADER_FIELD_BYTES],
    field_len: usize,
    pending: Option<PendingHeader>,
}

impl FrameSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk of raw bytes at the tail of the stream.
    pub fn append(&mut self, chunk: &[u8]) {
        self.buffer.append(chunk);
    }

    /// Bytes currently buffered (diagnostics only).
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Attempt to extract the next complete frame.
    ///
    /// Scan state survives a `None` return, so feeding the stream one byte
    /// at a time extracts the same frames as feeding it whole. A validated
    /// header is held until `payload_size + 4` bytes are buffered; header
    /// state always resets on extraction so the next call re-scans.
    pub fn try_extract(&mut self) -> Option<Frame> {
        if self.pending.is_none() {
            self.pending = self.locate_header();
        }
        let header = self.pending?;

        let body_len = header.payload_size as usize + CHECKSUM_LEN;
        let body = match self.buffer.take(body_len) {
            Some(body) => body,
            None => return None, // incomplete; keep the header pending
        };
        self.pending = None;
        self.buffer.compact();

        let mut bytes = Vec::with_capacity(HEADER_LEN + body_len);
        bytes.extend_from_slice(&[SENTINEL; SENTINEL_LEN]);
        bytes.extend_from_slice(&header.ensemble_number.to_le_bytes());
        bytes.extend_from_slice(&(!header.ensemble_number).to_le_bytes());
        bytes.extend_from_slice(&header.payload_size.to_le_bytes());
        bytes.extend_from_slice(&(!header.payload_size).to_le_bytes());
        bytes.extend_from_slice(&body);

        Some(Frame {
            ensemble_number: header.ensemble_number,
            payload_size: header.payload_size,
            bytes,
        })
    }

    /// Scan for a sentinel run and validate the four header fields behind
    /// it. Bytes rejected by the scan are discarded permanently; the 16
    /// field bytes are consumed whether or not validation succeeds.
    fn locate_header(&mut self) -> Option<PendingHeader> {
        loop {
            while self.sentinel_run < SENTINEL_LEN {
                let byte = self.buffer.read_byte()?;
                if byte == SENTINEL {
                    self.sentinel_run += 1;
                } else {
                    self.sentinel_run = 0;
                }
            }

            while self.field_len < HEADER_FIELD_BYTES {
                let byte = self.buffer.read_byte()?;
                self.field_bytes[self.field_len] = byte;
                self.field_len += 1;
            }

            self.sentinel_run = 0;
            self.field_len = 0;

            let ensemble_number = LittleEndian::read_u32(&self.field_bytes[0..4]);
            let inv_number = LittleEndian::read_u32(&self.field_bytes[4..8]);
            let payload_size = LittleEndian::read_u32(&self.field_bytes[8..12]);
            let inv_size = LittleEndian::read_u32(&self.field_bytes[12..16]);

            if ensemble_number == !inv_number && payload_size == !inv_size {
                return Some(PendingHeader {
                    ensemble_number,
                    payload_size,
                });
            }
            // Complement mismatch: the consumed header bytes stay discarded
            // and scanning resumes at the next buffered byte.
        }
    }
}
