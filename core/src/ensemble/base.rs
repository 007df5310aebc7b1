//! Shared header, identifier, and offset math for all data sets.
//!
//! Every data set begins with a 20-byte fixed header followed by its name:
//!
//!   Bytes  0 ..  3 = data type tag (u32 LE): 10 float, 20 int, 50 byte
//!   Bytes  4 ..  7 = element count (u32 LE) — bins for profile data
//!   Bytes  8 .. 11 = element multiplier (u32 LE) — beams for profile data
//!   Bytes 12 .. 15 = image flag (u32 LE)
//!   Bytes 16 .. 19 = name length (u32 LE)
//!   Bytes 20 .. 27 = name, always read as 8 ASCII bytes
//!
//! The declared name length drives all size and offset arithmetic; the name
//! itself is always read as a fixed 8 bytes and matched on its leading 7.

use byteorder::{ByteOrder, LittleEndian};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::ensemble::{BYTES_IN_FLOAT, BYTES_IN_INT32, BYTES_IN_INT8, DATA_TYPE_BYTE};

/// Fixed bytes in a data set header ahead of the name.
pub const FIXED_HEADER_BYTES: usize = 20;
/// Bytes needed to read a header plus its fixed 8-byte name.
pub const HEADER_WITH_NAME_BYTES: usize = FIXED_HEADER_BYTES + 8;

/// Recognized data set identifiers (leading 7 bytes of the 8-byte name).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSetId {
    BeamVelocity,
    InstrumentVelocity,
    EarthVelocity,
    Amplitude,
    Correlation,
    GoodBeam,
    GoodEarth,
    EnsembleData,
    Ancillary,
    BottomTrack,
}

impl DataSetId {
    /// Exact-match lookup on the leading 7 name bytes. Containment matching
    /// would let one code shadow another (`E000001` inside `E000010`), so
    /// anything that is not an exact code is unrecognized.
    pub fn from_name(name: &[u8]) -> Option<Self> {
        match name.get(..7)? {
            b"E000001" => Some(Self::BeamVelocity),
            b"E000002" => Some(Self::InstrumentVelocity),
            b"E000003" => Some(Self::EarthVelocity),
            b"E000004" => Some(Self::Amplitude),
            b"E000005" => Some(Self::Correlation),
            b"E000006" => Some(Self::GoodBeam),
            b"E000007" => Some(Self::GoodEarth),
            b"E000008" => Some(Self::EnsembleData),
            b"E000009" => Some(Self::Ancillary),
            b"E000010" => Some(Self::BottomTrack),
            _ => None,
        }
    }
}

/// Self-describing header common to every data set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSetHeader {
    pub data_type: u32,
    pub num_elements: u32,
    pub element_multiplier: u32,
    pub image: u32,
    pub name_len: u32,
    pub name: [u8; 8],
}

impl DataSetHeader {
    /// Parse a header from the start of `data`; `None` if fewer than 28
    /// bytes are available.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < HEADER_WITH_NAME_BYTES {
            return None;
        }
        let mut name = [0u8; 8];
        name.copy_from_slice(&data[20..28]);
        Some(Self {
            data_type: LittleEndian::read_u32(&data[0..4]),
            num_elements: LittleEndian::read_u32(&data[4..8]),
            element_multiplier: LittleEndian::read_u32(&data[8..12]),
            image: LittleEndian::read_u32(&data[12..16]),
            name_len: LittleEndian::read_u32(&data[16..20]),
            name,
        })
    }

    pub fn id(&self) -> Option<DataSetId> {
        DataSetId::from_name(&self.name)
    }

    pub fn name_str(&self) -> String {
        String::from_utf8_lossy(&self.name).into_owned()
    }

    /// Bytes per element for this data set's type tag. Unrecognized tags
    /// fall back to the float width.
    pub fn element_width(&self) -> usize {
        element_width(self.data_type)
    }

    /// Header size in bytes, driven by the declared name length.
    pub fn header_size(&self) -> usize {
        header_size(self.name_len)
    }

    /// Total declared size of the data set, header included. `None` when
    /// the declared counts overflow a usize; such a record can never fit in
    /// any payload and carries no usable size.
    pub fn data_set_size(&self) -> Option<usize> {
        (self.num_elements as usize)
            .checked_mul(self.element_multiplier as usize)
            .and_then(|cells| cells.checked_mul(self.element_width()))
            .and_then(|bytes| bytes.checked_add(self.header_size()))
    }

    /// Byte offset of scalar element `index` from the data set start.
    pub fn element_offset(&self, index: usize) -> usize {
        self.header_size() + index * self.element_width()
    }

    /// Byte offset of the profile value at `[bin][beam]`. Storage on the
    /// wire is beam-major, bin-minor.
    pub fn bin_beam_offset(&self, beam: usize, bin: usize) -> usize {
        self.header_size() + beam * self.num_elements as usize * BYTES_IN_FLOAT + bin * BYTES_IN_FLOAT
    }
}

pub fn element_width(data_type: u32) -> usize {
    if data_type == DATA_TYPE_BYTE {
        BYTES_IN_INT8
    } else {
        BYTES_IN_FLOAT
    }
}

pub fn header_size(name_len: u32) -> usize {
    name_len as usize + FIXED_HEADER_BYTES
}

/// Read scalar element `index` as a u32, or `None` when the record does not
/// carry it (element count or byte range too short).
pub(crate) fn read_u32_element(header: &DataSetHeader, data: &[u8], index: usize) -> Option<u32> {
    if index >= header.num_elements as usize {
        return None;
    }
    let offset = header.element_offset(index);
    let end = offset.checked_add(BYTES_IN_INT32)?;
    if end > data.len() {
        return None;
    }
    Some(LittleEndian::read_u32(&data[offset..end]))
}

/// Read scalar element `index` as an f32, with the same gating as
/// [`read_u32_element`].
pub(crate) fn read_f32_element(header: &DataSetHeader, data: &[u8], index: usize) -> Option<f32> {
    read_u32_element(header, data, index).map(f32::from_bits)
}

/// Read the raw bytes of `count` consecutive elements starting at `index`.
pub(crate) fn read_element_bytes<'a>(
    header: &DataSetHeader,
    data: &'a [u8],
    index: usize,
    count: usize,
) -> Option<&'a [u8]> {
    if index + count > header.num_elements as usize {
        return None;
    }
    let start = header.element_offset(index);
    let end = start.checked_add(count * header.element_width())?;
    if end > data.len() {
        return None;
    }
    Some(&data[start..end])
}

/// Decode a bins x beams matrix of f32 profile values. Wire order is
/// beam-major; the returned matrix is addressed `[bin, beam]`. A byte range
/// shorter than the full matrix yields an all-zero matrix, never a partial
/// fill.
pub(crate) fn read_matrix(header: &DataSetHeader, data: &[u8]) -> Array2<f32> {
    let bins = header.num_elements as usize;
    let beams = header.element_multiplier as usize;

    // Size math is checked before anything is allocated at the declared
    // dimensions; overflowing counts decode as an empty matrix.
    let needed = bins
        .checked_mul(beams)
        .and_then(|cells| cells.checked_mul(BYTES_IN_FLOAT))
        .and_then(|bytes| bytes.checked_add(header.header_size()));
    let needed = match needed {
        Some(needed) => needed,
        None => return Array2::zeros((0, 0)),
    };

    let mut matrix = Array2::zeros((bins, beams));
    if data.len() < needed {
        return matrix;
    }

    for beam in 0..beams {
        for bin in 0..bins {
            let offset = header.bin_beam_offset(beam, bin);
            matrix[[bin, beam]] = LittleEndian::read_f32(&data[offset..offset + BYTES_IN_FLOAT]);
        }
    }

    matrix
}
