//! Decoded data model for one measurement ensemble.

pub mod amplitude;
pub mod ancillary;
pub mod base;
pub mod correlation;
pub mod ensemble_data;
pub mod firmware;
pub mod serial;
pub mod velocity;

pub use amplitude::AmplitudeDataSet;
pub use ancillary::AncillaryDataSet;
pub use base::{DataSetHeader, DataSetId};
pub use correlation::CorrelationDataSet;
pub use ensemble_data::EnsembleDataSet;
pub use firmware::{Firmware, SubsystemConfiguration};
pub use serial::{SerialNumber, Subsystem};
pub use velocity::{
    BeamVelocityDataSet, EarthVelocityDataSet, InstrumentVelocityDataSet, VelocityVector,
};

use serde::{Deserialize, Serialize};

/// Maximum number of data sets walked in one frame.
pub const MAX_DATA_SETS: usize = 12;

pub const BYTES_IN_INT32: usize = 4;
pub const BYTES_IN_FLOAT: usize = 4;
pub const BYTES_IN_INT8: usize = 1;

/// Wire value marking an invalid or unavailable velocity reading.
pub const BAD_VELOCITY: f32 = 88.88;

/// Base data type tags carried in each data set header.
pub const DATA_TYPE_FLOAT: u32 = 10;
pub const DATA_TYPE_INT: u32 = 20;
pub const DATA_TYPE_BYTE: u32 = 50;

/// Container for all data sets decoded from a single frame.
///
/// Data sets absent from the frame stay `None`; a fresh `Ensemble` is built
/// per verified frame and handed to exactly one consumer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ensemble {
    pub ensemble_data: Option<EnsembleDataSet>,
    pub ancillary_data: Option<AncillaryDataSet>,
    pub beam_velocity: Option<BeamVelocityDataSet>,
    pub instrument_velocity: Option<InstrumentVelocityDataSet>,
    pub earth_velocity: Option<EarthVelocityDataSet>,
    pub amplitude: Option<AmplitudeDataSet>,
    pub correlation: Option<CorrelationDataSet>,
}
