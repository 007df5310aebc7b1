use serde::{Deserialize, Serialize};

/// Firmware version word: major, minor, revision, subsystem code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Firmware {
    pub major: u8,
    pub minor: u8,
    pub revision: u8,
    pub subsystem_code: u8,
}

impl Firmware {
    pub fn decode(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::default();
        }
        Self {
            major: data[0],
            minor: data[1],
            revision: data[2],
            subsystem_code: data[3],
        }
    }
}

/// Subsystem configuration word; only the CEPO index (fourth byte) is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsystemConfiguration {
    pub cepo_index: u8,
}

impl SubsystemConfiguration {
    pub fn decode(data: &[u8]) -> Self {
        if data.len() < 4 {
            return Self::default();
        }
        Self {
            cepo_index: data[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn firmware_decodes_version_bytes() {
        let firmware = Firmware::decode(&[2, 11, 5, b'3']);
        assert_eq!(firmware.major, 2);
        assert_eq!(firmware.minor, 11);
        assert_eq!(firmware.revision, 5);
        assert_eq!(firmware.subsystem_code, b'3');
    }

    #[test]
    fn short_words_stay_default() {
        assert_eq!(Firmware::decode(&[1, 2]), Firmware::default());
        assert_eq!(
            SubsystemConfiguration::decode(&[9]),
            SubsystemConfiguration::default()
        );
    }

    #[test]
    fn subsystem_configuration_keeps_cepo_index() {
        assert_eq!(SubsystemConfiguration::decode(&[0, 0, 0, 2]).cepo_index, 2);
    }
}
