// In: src/error.rs

//! This module defines the single, unified error type for the entire CPS library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CpsError {
    // =========================================================================
    // === Codec Contract Errors (all checked before any output is produced)
    // =========================================================================
    /// The codec was configured with a bit width that is not a positive integer.
    #[error("Invalid codec configuration: {0}")]
    Configuration(String),

    /// Image, label grid, or sample record dimensions do not satisfy the contract.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A label does not fit into the `class_bits` capacity of the codec.
    #[error("Label {value} is out of range for {class_bits} class bits (must be in [0, 2^{class_bits}))")]
    Range { value: i64, class_bits: u32 },

    /// A value cannot be represented in the codec's integer types (`u8` inputs,
    /// `u32` decoded labels).
    #[error("Value not representable: {0}")]
    Type(String),

    // =========================================================================
    // === Frame Pipeline Errors
    // =========================================================================
    #[error("Round-trip verification failed: {mismatches} of {total} labels differ")]
    VerificationFailed { mismatches: usize, total: usize },

    #[error("Label source failed: {0}")]
    SourceError(String),

    #[error("Frame sink failed: {0}")]
    SinkError(String),

    // =========================================================================
    // === External Error Wrappers (Using #[from] for automatic conversion)
    // =========================================================================
    /// An error originating from the Arrow library.
    #[error("Arrow operation failed: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// An error originating from the underlying I/O subsystem.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An error from the Serde JSON library, typically while loading a config.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// An error from a safe byte-casting operation failing.
    #[error("Byte slice casting error: {0}")]
    PodCast(String), // Manual `From` impl is needed as bytemuck::PodCastError doesn't impl Error
}

// =============================================================================
// === Manual `From` Implementations ===
// =============================================================================

impl From<bytemuck::PodCastError> for CpsError {
    fn from(err: bytemuck::PodCastError) -> Self {
        CpsError::PodCast(err.to_string())
    }
}

impl From<ndarray::ShapeError> for CpsError {
    fn from(err: ndarray::ShapeError) -> Self {
        CpsError::ShapeMismatch(err.to_string())
    }
}

#[cfg(feature = "python")]
impl From<CpsError> for pyo3::PyErr {
    fn from(err: CpsError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(err.to_string())
    }
}
