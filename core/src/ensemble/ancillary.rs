//! Ancillary data set (`E000009`): float environment readings.

use serde::{Deserialize, Serialize};

use crate::ensemble::base::{read_f32_element, DataSetHeader};

/// Environmental state accompanying the profile data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AncillaryDataSet {
    pub header: DataSetHeader,
    /// First bin location in meters.
    pub first_bin_range: f32,
    /// Bin size in meters.
    pub bin_size: f32,
    /// First ping time in seconds.
    pub first_ping_time: f32,
    /// Last ping time in seconds.
    pub last_ping_time: f32,
    /// Heading in degrees.
    pub heading: f32,
    /// Pitch in degrees.
    pub pitch: f32,
    /// Roll in degrees.
    pub roll: f32,
    /// Water temperature in degrees Fahrenheit.
    pub water_temp: f32,
    /// System temperature in degrees Fahrenheit.
    pub system_temp: f32,
    /// Salinity in parts per thousand.
    pub salinity: f32,
    /// Pressure in Pascals.
    pub pressure: f32,
    /// Transducer depth in meters, used for speed of sound.
    pub transducer_depth: f32,
    /// Speed of sound in m/s.
    pub speed_of_sound: f32,
}

impl AncillaryDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let field = |index: usize| read_f32_element(&header, data, index).unwrap_or(0.0);

        Self {
            first_bin_range: field(0),
            bin_size: field(1),
            first_ping_time: field(2),
            last_ping_time: field(3),
            heading: field(4),
            pitch: field(5),
            roll: field(6),
            water_temp: field(7),
            system_temp: field(8),
            salinity: field(9),
            pressure: field(10),
            transducer_depth: field(11),
            speed_of_sound: field(12),
            header,
        }
    }
}
