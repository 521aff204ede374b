//! This module defines the core, strongly-typed data representations shared by
//! the codec, the kernels and the bridge layer.
//!
//! It currently includes the `BitWidth` configuration newtype and the
//! `SampleRecord` colored-point layout consumed by decode.

pub mod bit_width;
pub mod sample_record;

// Re-export the main type(s) for easier access.
pub use bit_width::BitWidth;
pub use sample_record::{SampleRecord, SAMPLE_FIELDS};
