//! Conversions between the interleaved `(H, W, 3)` layout cameras produce and
//! the planar `(3, H, W)` layout the codec works on.

use ndarray::{Array3, ArrayView3};

use crate::error::CpsError;
use crate::types::bit_width::CHANNELS;

/// Copies an interleaved RGB8 buffer into a planar `(3, H, W)` array.
pub fn interleaved_to_planar(bytes: &[u8], height: usize, width: usize) -> Result<Array3<u8>, CpsError> {
    let expected = height
        .checked_mul(width)
        .and_then(|pixels| pixels.checked_mul(CHANNELS as usize))
        .ok_or_else(|| CpsError::ShapeMismatch(format!("frame {}x{} is too large", height, width)))?;
    if bytes.len() != expected {
        return Err(CpsError::ShapeMismatch(format!(
            "interleaved frame {}x{}x{} needs {} bytes, got {}",
            height,
            width,
            CHANNELS,
            expected,
            bytes.len()
        )));
    }
    let hwc = ArrayView3::from_shape((height, width, CHANNELS as usize), bytes)?;
    Ok(hwc.permuted_axes([2, 0, 1]).as_standard_layout().into_owned())
}

/// Flattens a planar `(3, H, W)` image back into interleaved RGB8 bytes.
pub fn planar_to_interleaved(image: ArrayView3<u8>) -> Result<Vec<u8>, CpsError> {
    if image.shape()[0] != CHANNELS as usize {
        return Err(CpsError::ShapeMismatch(format!(
            "planar image must be (3, H, W), got {:?}",
            image.shape()
        )));
    }
    Ok(image.permuted_axes([1, 2, 0]).iter().copied().collect())
}
