//! Correlation data set (`E000005`): ping correlation per bin and beam.

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::ensemble::base::{read_matrix, DataSetHeader};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelationDataSet {
    pub header: DataSetHeader,
    pub correlation: Array2<f32>,
}

impl CorrelationDataSet {
    pub fn decode(header: DataSetHeader, data: &[u8]) -> Self {
        let correlation = read_matrix(&header, data);
        Self {
            header,
            correlation,
        }
    }
}
