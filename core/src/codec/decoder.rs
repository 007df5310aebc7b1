//! Walking a verified frame's data sets into an [`Ensemble`].

use crate::codec::{CHECKSUM_LEN, HEADER_LEN};
use crate::ensemble::base::HEADER_WITH_NAME_BYTES;
use crate::ensemble::{
    AmplitudeDataSet, AncillaryDataSet, BeamVelocityDataSet, CorrelationDataSet, DataSetHeader,
    DataSetId, EarthVelocityDataSet, Ensemble, EnsembleDataSet, InstrumentVelocityDataSet,
    MAX_DATA_SETS,
};

/// Decode the payload of a checksum-verified frame.
///
/// Walks at most [`MAX_DATA_SETS`] self-describing records. The cursor
/// always advances by each record's declared size; a record whose declared
/// size would read past the buffered payload is skipped at defaults without
/// aborting the rest of the frame. Identifiers outside the recognized
/// catalog are stepped over the same way.
pub fn decode_ensemble(frame: &[u8]) -> Ensemble {
    let mut ensemble = Ensemble::default();
    let payload_end = frame.len().saturating_sub(CHECKSUM_LEN);
    let mut cursor = HEADER_LEN;

    for _ in 0..MAX_DATA_SETS {
        if cursor + HEADER_WITH_NAME_BYTES > payload_end {
            break;
        }
        let header = match DataSetHeader::parse(&frame[cursor..payload_end]) {
            Some(header) => header,
            None => break,
        };
        let size = match header.data_set_size() {
            Some(size) => size,
            // Declared counts overflow; no cursor position after this
            // record is meaningful.
            None => break,
        };

        if let Some(end) = cursor.checked_add(size).filter(|end| *end <= payload_end) {
            let data = &frame[cursor..end];
            match header.id() {
                Some(DataSetId::EnsembleData) => {
                    ensemble.ensemble_data = Some(EnsembleDataSet::decode(header, data));
                }
                Some(DataSetId::Ancillary) => {
                    ensemble.ancillary_data = Some(AncillaryDataSet::decode(header, data));
                }
                Some(DataSetId::BeamVelocity) => {
                    ensemble.beam_velocity = Some(BeamVelocityDataSet::decode(header, data));
                }
                Some(DataSetId::InstrumentVelocity) => {
                    ensemble.instrument_velocity =
                        Some(InstrumentVelocityDataSet::decode(header, data));
                }
                Some(DataSetId::EarthVelocity) => {
                    ensemble.earth_velocity = Some(EarthVelocityDataSet::decode(header, data));
                }
                Some(DataSetId::Amplitude) => {
                    ensemble.amplitude = Some(AmplitudeDataSet::decode(header, data));
                }
                Some(DataSetId::Correlation) => {
                    ensemble.correlation = Some(CorrelationDataSet::decode(header, data));
                }
                // Recognized but carrying no decoder, or unknown: step over.
                Some(DataSetId::GoodBeam)
                | Some(DataSetId::GoodEarth)
                | Some(DataSetId::BottomTrack)
                | None => {}
            }
        }

        cursor = cursor.saturating_add(size);
        if cursor + CHECKSUM_LEN >= frame.len() {
            break;
        }
    }

    ensemble
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::testutil::{float_record, int_record, matrix_record, raw_record, wrap_frame};
    use crate::codec::verify_frame;
    use crate::ensemble::{DATA_TYPE_FLOAT, DATA_TYPE_INT};

    #[test]
    fn minimal_ensemble_data_frame_decodes_number_five() {
        // One integer record, name length 7, single element holding 5.
        let record = raw_record(DATA_TYPE_INT, 1, 1, 7, b"E000008", &5u32.to_le_bytes());
        let frame = wrap_frame(5, &record);

        assert!(verify_frame(&frame));
        let ensemble = decode_ensemble(&frame);

        let data = ensemble.ensemble_data.expect("ensemble data");
        assert_eq!(data.ensemble_number, 5);
        assert!(ensemble.ancillary_data.is_none());
        assert!(ensemble.beam_velocity.is_none());
        assert!(ensemble.earth_velocity.is_none());
        assert!(ensemble.amplitude.is_none());
        assert!(ensemble.correlation.is_none());
    }

    #[test]
    fn unknown_record_between_known_records_is_stepped_over() {
        let mut payload = int_record(b"E000008\0", &[11, 30, 4, 1, 1]);
        payload.extend(raw_record(DATA_TYPE_INT, 2, 1, 8, b"X999999\0", &[0xAB; 8]));
        payload.extend(matrix_record(b"E000004\0", &[&[1.5, 2.5][..], &[3.5, 4.5][..]]));
        let frame = wrap_frame(11, &payload);

        let ensemble = decode_ensemble(&frame);
        assert_eq!(ensemble.ensemble_data.expect("info").ensemble_number, 11);
        let amplitude = ensemble.amplitude.expect("amplitude");
        assert_eq!(amplitude.amplitude[[0, 0]], 1.5);
        assert_eq!(amplitude.amplitude[[1, 1]], 4.5);
    }

    #[test]
    fn oversized_record_is_skipped_without_losing_earlier_records() {
        let mut payload = int_record(b"E000008\0", &[21, 8, 4, 1, 1]);
        // Declares 1000 elements but carries none past the header.
        payload.extend(raw_record(DATA_TYPE_INT, 1000, 1, 8, b"E000009\0", &[]));
        let frame = wrap_frame(21, &payload);

        let ensemble = decode_ensemble(&frame);
        assert_eq!(ensemble.ensemble_data.expect("info").ensemble_number, 21);
        assert!(ensemble.ancillary_data.is_none());
    }

    #[test]
    fn overflowing_declared_counts_keep_earlier_records() {
        let mut payload = int_record(b"E000008\0", &[51]);
        // count * multiplier * width cannot fit a usize.
        payload.extend(raw_record(
            DATA_TYPE_FLOAT,
            0x8000_0000,
            0x8000_0000,
            8,
            b"E000004\0",
            &[],
        ));
        let frame = wrap_frame(51, &payload);

        assert!(verify_frame(&frame));
        let ensemble = decode_ensemble(&frame);
        assert_eq!(ensemble.ensemble_data.expect("info").ensemble_number, 51);
        assert!(ensemble.amplitude.is_none());
    }

    #[test]
    fn ancillary_floats_decode_through_the_frame_walk() {
        let mut payload = int_record(b"E000008\0", &[41, 30, 4, 1, 1]);
        payload.extend(float_record(
            b"E000009\0",
            &[
                0.5, 1.0, 0.0, 1.25, 123.5, -2.0, 1.5, 68.0, 70.5, 35.0, 10.0, 1.2, 1500.0,
            ],
        ));
        let frame = wrap_frame(41, &payload);

        let ensemble = decode_ensemble(&frame);
        let ancillary = ensemble.ancillary_data.expect("ancillary");
        assert_eq!(ancillary.first_bin_range, 0.5);
        assert_eq!(ancillary.heading, 123.5);
        assert_eq!(ancillary.pitch, -2.0);
        assert_eq!(ancillary.speed_of_sound, 1500.0);
    }

    #[test]
    fn bottom_track_is_recognized_but_not_decoded() {
        let mut payload = raw_record(DATA_TYPE_INT, 2, 1, 8, b"E000010\0", &[0x11; 8]);
        payload.extend(int_record(b"E000008\0", &[31]));
        let frame = wrap_frame(31, &payload);

        let ensemble = decode_ensemble(&frame);
        assert_eq!(ensemble.ensemble_data.expect("info").ensemble_number, 31);
        assert!(ensemble.beam_velocity.is_none());
    }

    #[test]
    fn record_walk_caps_at_maximum() {
        let mut payload = Vec::new();
        for _ in 0..MAX_DATA_SETS {
            payload.extend(raw_record(DATA_TYPE_INT, 1, 1, 8, b"X000000\0", &[0; 4]));
        }
        payload.extend(int_record(b"E000008\0", &[77]));
        let frame = wrap_frame(77, &payload);

        // The thirteenth record is past the walk limit.
        let ensemble = decode_ensemble(&frame);
        assert!(ensemble.ensemble_data.is_none());
    }
}
