//! The colored point layout consumed by decode.
//!
//! A `SampleRecord` is `#[repr(C)]` and `Pod`, so a raw buffer with a 6-byte
//! stride (as produced by point-cloud colorizers) can be viewed as records
//! without copying.

use bytemuck::{Pod, Zeroable};

use crate::error::CpsError;

/// Number of fields in a colored sample: `x, y, z, r, g, b`.
pub const SAMPLE_FIELDS: usize = 6;

/// One colored point. Only `r`, `g` and `b` are read by the codec; the
/// position fields are opaque passthrough data owned by the point-cloud producer.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct SampleRecord {
    pub x: u8,
    pub y: u8,
    pub z: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl SampleRecord {
    pub fn new(x: u8, y: u8, z: u8, r: u8, g: u8, b: u8) -> Self {
        Self { x, y, z, r, g, b }
    }

    /// A record with zeroed position fields.
    pub fn colored(r: u8, g: u8, b: u8) -> Self {
        Self::new(0, 0, 0, r, g, b)
    }

    pub fn rgb(&self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn fields(&self) -> [u8; SAMPLE_FIELDS] {
        [self.x, self.y, self.z, self.r, self.g, self.b]
    }

    /// Builds a record from a field slice, which must hold exactly six values.
    pub fn from_fields(fields: &[u8]) -> Result<Self, CpsError> {
        match *fields {
            [x, y, z, r, g, b] => Ok(Self::new(x, y, z, r, g, b)),
            _ => Err(CpsError::ShapeMismatch(format!(
                "sample record must have exactly {} fields, got {}",
                SAMPLE_FIELDS,
                fields.len()
            ))),
        }
    }

    /// Zero-copy view of a packed `[x, y, z, r, g, b, x, y, ...]` buffer.
    pub fn slice_from_bytes(raw: &[u8]) -> Result<&[SampleRecord], CpsError> {
        if raw.len() % SAMPLE_FIELDS != 0 {
            return Err(CpsError::ShapeMismatch(format!(
                "packed sample buffer of {} bytes is not a multiple of {} fields",
                raw.len(),
                SAMPLE_FIELDS
            )));
        }
        Ok(bytemuck::try_cast_slice(raw)?)
    }
}

impl From<[u8; SAMPLE_FIELDS]> for SampleRecord {
    fn from([x, y, z, r, g, b]: [u8; SAMPLE_FIELDS]) -> Self {
        Self::new(x, y, z, r, g, b)
    }
}
