//! Ensemble data set (`E000008`): integer state of the measurement cycle.

use serde::{Deserialize, Serialize};

use crate::ensemble::base::{read_element_bytes, read_u32_element, DataSetHeader};
use crate::ensemble::firmware::{Firmware, SubsystemConfiguration};
use crate::ensemble::serial::SerialNumber;

/// Element indices within the integer record.
const IDX_ENSEMBLE_NUMBER: usize = 0;
const IDX_NUM_BINS: usize = 1;
const IDX_NUM_BEAMS: usize = 2;
const IDX_DESIRED_PINGS: usize = 3;
const IDX_ACTUAL_PINGS: usize = 4;
const IDX_SERIAL: usize = 13;
const SERIAL_ELEMENTS: usize = 8;
const IDX_FIRMWARE: usize = 21;
const IDX_SUBSYSTEM_CONFIG: usize = 22;

/// Integer description of the ensemble: counters, geometry, and the
/// instrument identity trailing them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnsembleDataSet {
    pub header: DataSetHeader,
    pub ensemble_number: u32,
    pub num_bins: u32,
    pub num_beams: u32,
    pub desired_ping_count: u32,
    pub actual_ping_count: u32,
    pub serial_number: SerialNumber,
    pub firmware: Firmware,
    pub subsystem_config: SubsystemConfiguration,
}

impl EnsembleDataSet {
    /// Decode from the data set's full byte range (header included). Any
    /// element the record does not carry stays at its default.
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let mut set = Self {
            ensemble_number: read_u32_element(&header, data, IDX_ENSEMBLE_NUMBER).unwrap_or(0),
            num_bins: read_u32_element(&header, data, IDX_NUM_BINS).unwrap_or(0),
            num_beams: read_u32_element(&header, data, IDX_NUM_BEAMS).unwrap_or(0),
            desired_ping_count: read_u32_element(&header, data, IDX_DESIRED_PINGS).unwrap_or(0),
            actual_ping_count: read_u32_element(&header, data, IDX_ACTUAL_PINGS).unwrap_or(0),
            ..Self::default()
        };

        if header.num_elements as usize > IDX_FIRMWARE {
            if let Some(bytes) = read_element_bytes(&header, data, IDX_SERIAL, SERIAL_ELEMENTS) {
                set.serial_number = SerialNumber::decode(bytes);
            }
            if let Some(word) = read_element_bytes(&header, data, IDX_FIRMWARE, 1) {
                set.firmware = Firmware::decode(word);
            }
        }
        if header.num_elements as usize > IDX_SUBSYSTEM_CONFIG {
            if let Some(word) = read_element_bytes(&header, data, IDX_SUBSYSTEM_CONFIG, 1) {
                set.subsystem_config = SubsystemConfiguration::decode(word);
            }
        }

        set.header = header;
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::serial::Subsystem;
    use crate::ensemble::DATA_TYPE_INT;

    fn int_header(elements: u32) -> DataSetHeader {
        DataSetHeader {
            data_type: DATA_TYPE_INT,
            num_elements: elements,
            element_multiplier: 1,
            image: 0,
            name_len: 8,
            name: *b"E000008\0",
        }
    }

    fn record(elements: &[u32]) -> (DataSetHeader, Vec<u8>) {
        let header = int_header(elements.len() as u32);
        let mut data = vec![0u8; header.data_set_size().unwrap()];
        for (i, value) in elements.iter().enumerate() {
            let offset = header.element_offset(i);
            data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
        }
        (header, data)
    }

    #[test]
    fn decodes_counters_and_identity() {
        let mut elements = vec![17u32, 30, 4, 2, 2, 0, 0, 0, 0, 0, 0, 0, 0];
        let serial = b"01300000000000000000000000000042";
        for chunk in serial.chunks(4) {
            elements.push(u32::from_le_bytes(chunk.try_into().unwrap()));
        }
        elements.push(u32::from_le_bytes([1, 4, 6, b'3'])); // firmware
        elements.push(u32::from_le_bytes([0, 0, 0, 2])); // subsystem config

        let (header, data) = record(&elements);
        let set = EnsembleDataSet::decode(header, &data);

        assert_eq!(set.ensemble_number, 17);
        assert_eq!(set.num_bins, 30);
        assert_eq!(set.num_beams, 4);
        assert_eq!(set.desired_ping_count, 2);
        assert_eq!(set.actual_ping_count, 2);
        assert_eq!(set.serial_number.hardware, "01");
        assert_eq!(set.serial_number.subsystems, vec![Subsystem(b'3')]);
        assert_eq!(set.serial_number.serial_number, 42);
        assert_eq!(set.firmware.major, 1);
        assert_eq!(set.firmware.subsystem_code, b'3');
        assert_eq!(set.subsystem_config.cepo_index, 2);
    }

    #[test]
    fn single_element_record_leaves_rest_default() {
        let (header, data) = record(&[5]);
        let set = EnsembleDataSet::decode(header, &data);

        assert_eq!(set.ensemble_number, 5);
        assert_eq!(set.num_bins, 0);
        assert_eq!(set.num_beams, 0);
        assert_eq!(set.serial_number, SerialNumber::default());
        assert_eq!(set.firmware, Firmware::default());
    }

    #[test]
    fn identity_gated_on_element_count() {
        // 21 elements: counters present, serial/firmware/config absent.
        let (header, data) = record(&[9; 21]);
        let set = EnsembleDataSet::decode(header, &data);
        assert_eq!(set.ensemble_number, 9);
        assert_eq!(set.serial_number, SerialNumber::default());
        assert_eq!(set.firmware, Firmware::default());
        assert_eq!(set.subsystem_config, SubsystemConfiguration::default());
    }
}
