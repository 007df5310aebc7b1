//! Synthetic wire-stream generation.
//!
//! Builds byte streams in the instrument's frame format so the decoder can
//! be exercised offline: each frame carries an ensemble data set, an
//! ancillary data set, and earth-velocity/amplitude/correlation profiles
//! with seeded random readings.

use rand::{rngs::StdRng, Rng, SeedableRng};
use rticore::codec::checksum::payload_checksum;
use rticore::codec::{SENTINEL, SENTINEL_LEN};
use rticore::ensemble::{DATA_TYPE_FLOAT, DATA_TYPE_INT};

use crate::workflow::config::ReplayConfig;

const EARTH_VELOCITY_NAME: &[u8; 8] = b"E000003\0";
const AMPLITUDE_NAME: &[u8; 8] = b"E000004\0";
const CORRELATION_NAME: &[u8; 8] = b"E000005\0";
const ENSEMBLE_DATA_NAME: &[u8; 8] = b"E000008\0";
const ANCILLARY_NAME: &[u8; 8] = b"E000009\0";

/// Generate `config.ensembles` consecutive frames as one byte stream.
pub fn build_stream(config: &ReplayConfig) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut stream = Vec::new();
    for number in 1..=config.ensembles as u32 {
        stream.extend(build_frame(number, config.bins, config.beams, &mut rng));
    }
    stream
}

/// One complete frame: header, five data sets, checksum trailer.
pub fn build_frame(number: u32, bins: usize, beams: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut payload = ensemble_data_record(number, bins, beams);
    payload.extend(ancillary_record(rng));
    payload.extend(profile_record(EARTH_VELOCITY_NAME, bins, beams, rng));
    payload.extend(profile_record(AMPLITUDE_NAME, bins, beams, rng));
    payload.extend(profile_record(CORRELATION_NAME, bins, beams, rng));
    wrap_frame(number, &payload)
}

fn record_header(data_type: u32, elements: u32, multiplier: u32, name: &[u8; 8]) -> Vec<u8> {
    let mut header = Vec::with_capacity(28);
    header.extend_from_slice(&data_type.to_le_bytes());
    header.extend_from_slice(&elements.to_le_bytes());
    header.extend_from_slice(&multiplier.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes()); // image flag
    header.extend_from_slice(&(name.len() as u32).to_le_bytes());
    header.extend_from_slice(name);
    header
}

/// Integer record with counters, serial number, firmware, and subsystem
/// configuration (23 elements).
fn ensemble_data_record(number: u32, bins: usize, beams: usize) -> Vec<u8> {
    let mut elements = vec![number, bins as u32, beams as u32, 1, 1];
    elements.resize(13, 0);

    let serial = format!("013000000000000000000000000{number:05}");
    debug_assert_eq!(serial.len(), 32);
    for chunk in serial.as_bytes().chunks_exact(4) {
        elements.push(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }
    elements.push(u32::from_le_bytes([1, 4, 0, b'3'])); // firmware 1.4.0, subsystem '3'
    elements.push(u32::from_le_bytes([0, 0, 0, 0])); // subsystem config, CEPO index 0

    let mut record = record_header(DATA_TYPE_INT, elements.len() as u32, 1, ENSEMBLE_DATA_NAME);
    for element in elements {
        record.extend_from_slice(&element.to_le_bytes());
    }
    record
}

/// Float record with the thirteen environment readings.
fn ancillary_record(rng: &mut StdRng) -> Vec<u8> {
    let readings: [f32; 13] = [
        0.5,                          // first bin range
        1.0,                          // bin size
        0.0,                          // first ping time
        1.0,                          // last ping time
        rng.gen_range(0.0..360.0),    // heading
        rng.gen_range(-5.0..5.0),     // pitch
        rng.gen_range(-5.0..5.0),     // roll
        rng.gen_range(55.0..75.0),    // water temp
        rng.gen_range(60.0..90.0),    // system temp
        35.0,                         // salinity
        rng.gen_range(0.0..20_000.0), // pressure
        rng.gen_range(0.0..3.0),      // transducer depth
        rng.gen_range(1480.0..1520.0),// speed of sound
    ];

    let mut record = record_header(DATA_TYPE_FLOAT, readings.len() as u32, 1, ANCILLARY_NAME);
    for reading in readings {
        record.extend_from_slice(&reading.to_le_bytes());
    }
    record
}

/// Bins x beams profile record, serialized beam-major as on the wire.
fn profile_record(name: &[u8; 8], bins: usize, beams: usize, rng: &mut StdRng) -> Vec<u8> {
    let mut record = record_header(DATA_TYPE_FLOAT, bins as u32, beams as u32, name);
    for _beam in 0..beams {
        for _bin in 0..bins {
            let value: f32 = rng.gen_range(-2.0..2.0);
            record.extend_from_slice(&value.to_le_bytes());
        }
    }
    record
}

/// Frame the payload: sentinel run, complement-checked header fields, and
/// the checksum trailer.
fn wrap_frame(number: u32, payload: &[u8]) -> Vec<u8> {
    let payload_size = payload.len() as u32;
    let mut frame = Vec::with_capacity(32 + payload.len() + 4);
    frame.extend_from_slice(&[SENTINEL; SENTINEL_LEN]);
    frame.extend_from_slice(&number.to_le_bytes());
    frame.extend_from_slice(&(!number).to_le_bytes());
    frame.extend_from_slice(&payload_size.to_le_bytes());
    frame.extend_from_slice(&(!payload_size).to_le_bytes());
    frame.extend_from_slice(payload);
    frame.extend_from_slice(&u32::from(payload_checksum(payload)).to_le_bytes());
    frame
}
