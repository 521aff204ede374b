//! Colored point-cloud helpers for the decode path.
//!
//! A colorizer that projects an encoded image into 3D copies each pixel's color
//! into the `r, g, b` fields of a point. `simulate_point_cloud` stands in for that
//! stage: one record per pixel, row-major, with zeroed positions.

use ndarray::{Array2, ArrayView3, Axis};

use crate::error::CpsError;
use crate::types::bit_width::CHANNELS;
use crate::types::{SampleRecord, SAMPLE_FIELDS};

/// Builds one colored record per pixel of a planar `(3, H, W)` image.
pub fn simulate_point_cloud(image: ArrayView3<u8>) -> Result<Vec<SampleRecord>, CpsError> {
    if image.len_of(Axis(0)) != CHANNELS as usize {
        return Err(CpsError::ShapeMismatch(format!(
            "point cloud source must be (3, H, W), got {:?}",
            image.shape()
        )));
    }
    let red = image.index_axis(Axis(0), 0);
    let green = image.index_axis(Axis(0), 1);
    let blue = image.index_axis(Axis(0), 2);
    Ok(red
        .iter()
        .zip(green.iter())
        .zip(blue.iter())
        .map(|((&r, &g), &b)| SampleRecord::colored(r, g, b))
        .collect())
}

/// Lays records out as an `(N, 6)` matrix for `Codec::decode`.
pub fn sample_matrix(records: &[SampleRecord]) -> Array2<u8> {
    Array2::from_shape_fn((records.len(), SAMPLE_FIELDS), |(row, field)| {
        records[row].fields()[field]
    })
}

/// Serializes records into the packed 6-byte-stride layout.
pub fn records_to_bytes(records: &[SampleRecord]) -> &[u8] {
    bytemuck::cast_slice(records)
}
