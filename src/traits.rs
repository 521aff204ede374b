//! This module defines the narrow collaborator traits the frame pipeline talks to.
//!
//! The codec never depends on a transport. Whatever produces labels (a
//! classifier, a replay file, a random generator) implements `LabelSource`;
//! whatever carries encoded images onwards (a message bus publisher, a file
//! writer, a test buffer) implements `FrameSink`.

use ndarray::Array2;

use crate::bridge::format::EncodedFrame;
use crate::error::CpsError;

/// Supplies one label grid per frame.
pub trait LabelSource {
    /// Returns an `(height, width)` grid of labels for the next frame.
    fn labels_for(&mut self, height: usize, width: usize) -> Result<Array2<u8>, CpsError>;
}

/// Receives encoded frames.
pub trait FrameSink {
    fn publish(&mut self, frame: &EncodedFrame) -> Result<(), CpsError>;
}

impl<S: LabelSource + ?Sized> LabelSource for Box<S> {
    fn labels_for(&mut self, height: usize, width: usize) -> Result<Array2<u8>, CpsError> {
        (**self).labels_for(height, width)
    }
}

impl<K: FrameSink + ?Sized> FrameSink for Box<K> {
    fn publish(&mut self, frame: &EncodedFrame) -> Result<(), CpsError> {
        (**self).publish(frame)
    }
}
