//! Wire-format builders shared by the codec tests.

use crate::codec::checksum::payload_checksum;
use crate::codec::{SENTINEL, SENTINEL_LEN};
use crate::ensemble::{DATA_TYPE_FLOAT, DATA_TYPE_INT};

/// Build one data set: fixed header, name written at the declared length,
/// then the element body verbatim.
pub fn raw_record(
    data_type: u32,
    num_elements: u32,
    element_multiplier: u32,
    name_len: u32,
    name: &[u8],
    body: &[u8],
) -> Vec<u8> {
    let mut record = Vec::new();
    record.extend_from_slice(&data_type.to_le_bytes());
    record.extend_from_slice(&num_elements.to_le_bytes());
    record.extend_from_slice(&element_multiplier.to_le_bytes());
    record.extend_from_slice(&0u32.to_le_bytes()); // image flag
    record.extend_from_slice(&name_len.to_le_bytes());
    record.extend_from_slice(&name[..(name_len as usize).min(name.len())]);
    record.extend_from_slice(body);
    record
}

/// Integer scalar record with an 8-byte name.
pub fn int_record(name: &[u8], elements: &[u32]) -> Vec<u8> {
    let body: Vec<u8> = elements.iter().flat_map(|e| e.to_le_bytes()).collect();
    raw_record(DATA_TYPE_INT, elements.len() as u32, 1, 8, name, &body)
}

/// Float scalar record with an 8-byte name.
pub fn float_record(name: &[u8], elements: &[f32]) -> Vec<u8> {
    let body: Vec<u8> = elements.iter().flat_map(|e| e.to_le_bytes()).collect();
    raw_record(DATA_TYPE_FLOAT, elements.len() as u32, 1, 8, name, &body)
}

/// Profile record from per-bin rows, serialized beam-major as on the wire.
pub fn matrix_record(name: &[u8], bins: &[&[f32]]) -> Vec<u8> {
    let bin_count = bins.len();
    let beam_count = bins.first().map_or(0, |row| row.len());
    let mut body = Vec::new();
    for beam in 0..beam_count {
        for row in bins {
            body.extend_from_slice(&row[beam].to_le_bytes());
        }
    }
    raw_record(
        DATA_TYPE_FLOAT,
        bin_count as u32,
        beam_count as u32,
        8,
        name,
        &body,
    )
}

/// Wrap a payload in a complete frame: sentinel run, complement-checked
/// header fields, payload, checksum trailer.
pub fn wrap_frame(ensemble_number: u32, payload: &[u8]) -> Vec<u8> {
    let payload_size = payload.len() as u32;
    let mut frame = Vec::with_capacity(32 + payload.len() + 4);
    frame.extend_from_slice(&[SENTINEL; SENTINEL_LEN]);
    frame.extend_from_slice(&ensemble_number.to_le_bytes());
    frame.extend_from_slice(&(!ensemble_number).to_le_bytes());
    frame.extend_from_slice(&payload_size.to_le_bytes());
    frame.extend_from_slice(&(!payload_size).to_le_bytes());
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&u32::from(payload_checksum(payload)).to_le_bytes());
    frame
}
