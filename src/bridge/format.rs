// In: src/bridge/format.rs

//! Defines the structures exchanged with frame collaborators.

use ndarray::Array3;

use crate::bridge::layout;
use crate::error::CpsError;

/// Pixel encoding of every frame crossing the bridge: 8-bit RGB, interleaved.
pub const FRAME_ENCODING: &str = "rgb8";

/// An encoded image handed to a `FrameSink`, in the same interleaved layout the
/// frame arrived in, so it can be transported as an ordinary color image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedFrame {
    /// Position of this frame in the stream processed by one `FrameEncoder`.
    pub frame_index: u64,
    pub height: usize,
    pub width: usize,
    /// `height * width * 3` bytes, row-major, `R, G, B` per pixel.
    pub data: Vec<u8>,
}

impl EncodedFrame {
    pub fn pixel_count(&self) -> usize {
        self.height * self.width
    }

    /// The frame as a planar `(3, H, W)` image, ready for decoding or inspection.
    pub fn to_planar(&self) -> Result<Array3<u8>, CpsError> {
        layout::interleaved_to_planar(&self.data, self.height, self.width)
    }
}

/// Summary of one processed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub frame_index: u64,
    pub pixels: usize,
    /// `true` if the labels were decoded again and matched.
    pub verified: bool,
}
