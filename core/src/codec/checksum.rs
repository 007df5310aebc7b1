//! Frame integrity digest.
//!
//! The instrument documentation calls this a CRC, but it is not a standard
//! CRC-16 and no polynomial table reproduces it; the rotate/xor sequence
//! below is implemented bit-for-bit and must not be swapped for a library
//! routine.

use byteorder::{ByteOrder, LittleEndian};

use crate::codec::{CHECKSUM_LEN, HEADER_LEN};

/// Digest of a frame's payload region (bytes between header and trailer).
pub fn payload_checksum(payload: &[u8]) -> u16 {
    let mut crc: u16 = 0;

    for &byte in payload {
        crc = (crc >> 8) | (crc << 8);
        crc ^= u16::from(byte);
        crc ^= (crc & 0xFF) >> 4;
        crc ^= (crc << 8) << 4;
        crc ^= ((crc & 0xFF) << 4) << 1;
    }

    crc
}

/// Check a full frame (header + payload + trailer) against its trailer.
/// The stored value is a u32 with only the low 16 bits significant.
pub fn verify_frame(frame: &[u8]) -> bool {
    if frame.len() < HEADER_LEN + CHECKSUM_LEN {
        return false;
    }
    let payload = &frame[HEADER_LEN..frame.len() - CHECKSUM_LEN];
    let stored = LittleEndian::read_u32(&frame[frame.len() - CHECKSUM_LEN..]);
    u32::from(payload_checksum(payload)) == stored
}
