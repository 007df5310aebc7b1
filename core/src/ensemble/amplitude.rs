//! Amplitude data set (`E000004`): return signal strength in dB, bins x beams.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::ensemble::base::{read_matrix, DataSetHeader};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AmplitudeDataSet {
    pub header: DataSetHeader,
    pub amplitude: Array2<f32>,
}

impl AmplitudeDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let amplitude = read_matrix(&header, data);
        Self { header, amplitude }
    }
}
