//! Instrument serial number parsing.
//!
//! The serial number travels as 32 ASCII characters:
//!
//!   chars  0 ..  1 = base hardware code
//!   chars  2 .. 16 = subsystem codes, one character per configured slot
//!   chars 17 .. 25 = spare
//!   chars 26 .. 31 = numeric serial number

use serde::{Deserialize, Serialize};

/// One subsystem configuration character from the serial number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subsystem(pub u8);

impl Subsystem {
    pub fn label(&self) -> &'static str {
        match self.0 {
            0x00 => "Empty",
            0x30 => "Spare",
            0x31 => "2MHz 4Beam 20 Degree Piston",
            0x32 => "1.2MHz 4Beam 20 Degree Piston",
            0x33 => "600kHz 4Beam 20 Degree Piston",
            0x34 => "300kHz 4Beam 20 Degree Piston",
            _ => "Unknown",
        }
    }
}

/// Decoded instrument serial number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerialNumber {
    pub hardware: String,
    pub subsystems: Vec<Subsystem>,
    pub spare: String,
    pub serial_number: u32,
}

impl SerialNumber {
    /// Parse a 32-byte ASCII serial number. Shorter input leaves the
    /// default value untouched.
    pub fn decode(data: &[u8]) -> Self {
        if data.len() < 32 {
            return Self::default();
        }

        let hardware = String::from_utf8_lossy(&data[0..2]).into_owned();
        let subsystems = data[2..17]
            .iter()
            .filter(|b| **b != 0 && **b != b'0' && **b != b' ')
            .map(|b| Subsystem(*b))
            .collect();
        let spare = String::from_utf8_lossy(&data[17..26]).into_owned();
        let serial_number = std::str::from_utf8(&data[26..32])
            .ok()
            .and_then(|s| s.trim_start_matches('0').parse().ok())
            .unwrap_or(0);

        Self {
            hardware,
            subsystems,
            spare,
            serial_number,
        }
    }
}
