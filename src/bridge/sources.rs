//! Ready-made collaborators: label sources and an in-memory frame sink.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bridge::format::EncodedFrame;
use crate::config::CpsConfig;
use crate::error::CpsError;
use crate::traits::{FrameSink, LabelSource};
use crate::types::BitWidth;

//==================================================================================
// 1. Label Sources
//==================================================================================

/// Draws uniformly distributed labels over the full capacity of a bit width.
///
/// Useful for exercising an encode/transport/decode chain end to end when no
/// classifier is attached.
#[derive(Debug, Clone)]
pub struct RandomLabelSource {
    rng: StdRng,
    max_label: u8,
}

impl RandomLabelSource {
    /// A source seeded from `seed`, or from OS entropy when `None`.
    pub fn new(width: BitWidth, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng,
            max_label: width.max_label(),
        }
    }

    /// A source sized to the configured bit width and seeded from `label_seed`.
    pub fn from_config(config: &CpsConfig) -> Result<Self, CpsError> {
        Ok(Self::new(config.validated_bit_width()?, config.label_seed))
    }
}

impl LabelSource for RandomLabelSource {
    fn labels_for(&mut self, height: usize, width: usize) -> Result<Array2<u8>, CpsError> {
        let max_label = self.max_label;
        let rng = &mut self.rng;
        Ok(Array2::from_shape_fn((height, width), |_| rng.random_range(0..=max_label)))
    }
}

/// Replays one fixed label grid for every frame, e.g. a cached classifier output.
#[derive(Debug, Clone)]
pub struct GridLabelSource {
    grid: Array2<u8>,
}

impl GridLabelSource {
    pub fn new(grid: Array2<u8>) -> Self {
        Self { grid }
    }
}

impl LabelSource for GridLabelSource {
    fn labels_for(&mut self, height: usize, width: usize) -> Result<Array2<u8>, CpsError> {
        if self.grid.dim() != (height, width) {
            return Err(CpsError::ShapeMismatch(format!(
                "label grid is {:?}, frame is {}x{}",
                self.grid.dim(),
                height,
                width
            )));
        }
        Ok(self.grid.clone())
    }
}

//==================================================================================
// 2. Frame Sinks
//==================================================================================

/// Keeps every published frame in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    frames: Vec<EncodedFrame>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[EncodedFrame] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<EncodedFrame> {
        self.frames
    }
}

impl FrameSink for MemorySink {
    fn publish(&mut self, frame: &EncodedFrame) -> Result<(), CpsError> {
        self.frames.push(frame.clone());
        Ok(())
    }
}
