//! Velocity profile data sets (`E000001`..`E000003`), bins x beams in m/s.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::ensemble::base::{read_matrix, DataSetHeader};
use crate::ensemble::BAD_VELOCITY;

/// Water velocity magnitude and direction derived for one bin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityVector {
    /// Magnitude of the water velocity in m/s.
    pub magnitude: f64,
    /// Direction in degrees, X axis toward north, in [0, 360).
    pub direction_x_north: f64,
    /// Direction in degrees, Y axis toward north, in [0, 360).
    pub direction_y_north: f64,
}

/// Sentinel for an underivable vector. Written as an f64 literal so that
/// consumers comparing against 88.88 match exactly; widening the f32 wire
/// sentinel would land on 88.87999725341797 instead.
const BAD_VECTOR: f64 = 88.88;

impl VelocityVector {
    fn bad() -> Self {
        Self {
            magnitude: BAD_VECTOR,
            direction_x_north: BAD_VECTOR,
            direction_y_north: BAD_VECTOR,
        }
    }
}

/// Velocities relative to the transducer beams.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BeamVelocityDataSet {
    pub header: DataSetHeader,
    pub velocities: Array2<f32>,
}

impl BeamVelocityDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let velocities = read_matrix(&header, data);
        Self { header, velocities }
    }
}

/// Velocities rotated into the instrument's X/Y/Z frame.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentVelocityDataSet {
    pub header: DataSetHeader,
    pub velocities: Array2<f32>,
}

impl InstrumentVelocityDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let velocities = read_matrix(&header, data);
        Self { header, velocities }
    }
}

/// Velocities rotated into earth coordinates (East, North, Vertical, error),
/// plus one derived magnitude/direction vector per bin.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EarthVelocityDataSet {
    pub header: DataSetHeader,
    pub velocities: Array2<f32>,
    pub vectors: Vec<VelocityVector>,
}

impl EarthVelocityDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let velocities = read_matrix(&header, data);
        let vectors = velocities
            .rows()
            .into_iter()
            .map(|bin| velocity_vector(bin.as_slice().unwrap_or(&[])))
            .collect();
        Self {
            header,
            velocities,
            vectors,
        }
    }
}

/// Derive the velocity vector for one bin from its East, North, and
/// Vertical components. Any bad component poisons the whole vector.
fn velocity_vector(bin: &[f32]) -> VelocityVector {
    if bin.len() < 3 {
        return VelocityVector::bad();
    }

    let (east, north, vertical) = (bin[0], bin[1], bin[2]);
    if east == BAD_VELOCITY || north == BAD_VELOCITY || vertical == BAD_VELOCITY {
        return VelocityVector::bad();
    }

    let (east, north, vertical) = (f64::from(east), f64::from(north), f64::from(vertical));
    let magnitude = (east.powi(2) + north.powi(2) + vertical.powi(2)).sqrt();

    let mut direction_x_north = east.atan2(north).to_degrees();
    if direction_x_north < 0.0 {
        direction_x_north += 360.0;
    }
    let mut direction_y_north = north.atan2(vertical).to_degrees();
    if direction_y_north < 0.0 {
        direction_y_north += 360.0;
    }

    VelocityVector {
        magnitude,
        direction_x_north,
        direction_y_north,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ensemble::{BYTES_IN_FLOAT, DATA_TYPE_FLOAT};

    fn earth_record(bins: &[[f32; 4]]) -> (DataSetHeader, Vec<u8>) {
        let header = DataSetHeader {
            data_type: DATA_TYPE_FLOAT,
            num_elements: bins.len() as u32,
            element_multiplier: 4,
            image: 0,
            name_len: 8,
            name: *b"E000003\0",
        };
        let mut data = vec![0u8; header.data_set_size().unwrap()];
        for (bin, values) in bins.iter().enumerate() {
            for (beam, value) in values.iter().enumerate() {
                let offset = header.header_size()
                    + beam * bins.len() * BYTES_IN_FLOAT
                    + bin * BYTES_IN_FLOAT;
                data[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
            }
        }
        (header, data)
    }

    #[test]
    fn earth_velocity_derives_vectors() {
        let (header, data) = earth_record(&[[3.0, 4.0, 0.0, 0.0]]);
        let set = EarthVelocityDataSet::decode(header, &data);

        assert_eq!(set.velocities[[0, 0]], 3.0);
        assert_eq!(set.velocities[[0, 1]], 4.0);
        let vector = set.vectors[0];
        assert!((vector.magnitude - 5.0).abs() < 1e-9);
        // atan2(3, 4) = 36.8699 degrees
        assert!((vector.direction_x_north - 36.869_897_645_844).abs() < 1e-6);
        // atan2(4, 0) = 90 degrees
        assert!((vector.direction_y_north - 90.0).abs() < 1e-9);
    }

    #[test]
    fn negative_bearings_normalize_into_full_circle() {
        let (header, data) = earth_record(&[[-1.0, 1.0, 0.5, 0.0]]);
        let set = EarthVelocityDataSet::decode(header, &data);
        let vector = set.vectors[0];
        // atan2(-1, 1) = -45 degrees -> 315
        assert!((vector.direction_x_north - 315.0).abs() < 1e-9);
        assert!(vector.direction_y_north >= 0.0 && vector.direction_y_north < 360.0);
    }

    #[test]
    fn bad_component_marks_whole_vector_bad() {
        let (header, data) = earth_record(&[[3.0, BAD_VELOCITY, 0.0, 0.0]]);
        let set = EarthVelocityDataSet::decode(header, &data);
        let vector = set.vectors[0];
        // The vector sentinel is exactly 88.88 in f64, not the widened f32.
        assert_eq!(vector.magnitude, 88.88f64);
        assert_eq!(vector.direction_x_north, 88.88f64);
        assert_eq!(vector.direction_y_north, 88.88f64);
    }

    #[test]
    fn fewer_than_three_beams_yields_bad_vectors() {
        let header = DataSetHeader {
            data_type: DATA_TYPE_FLOAT,
            num_elements: 2,
            element_multiplier: 2,
            image: 0,
            name_len: 8,
            name: *b"E000003\0",
        };
        let data = vec![0u8; header.data_set_size().unwrap()];
        let set = EarthVelocityDataSet::decode(header, &data);
        assert!(set.vectors.iter().all(|v| v.magnitude == 88.88f64));
    }

    #[test]
    fn truncated_matrix_decodes_as_zeros() {
        let header = DataSetHeader {
            data_type: DATA_TYPE_FLOAT,
            num_elements: 8,
            element_multiplier: 4,
            image: 0,
            name_len: 8,
            name: *b"E000001\0",
        };
        let data = vec![0u8; 40];
        let set = BeamVelocityDataSet::decode(header, &data);
        assert_eq!(set.velocities.dim(), (8, 4));
        assert!(set.velocities.iter().all(|v| *v == 0.0));
    }
}
