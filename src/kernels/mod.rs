//! This module contains the pure, stateless kernels the codec is built from.
//!
//! - `bit_partition`: splitting a label into per-channel fields and writing or
//!   reading those fields in the low bits of a channel.
//! - `convert`: exact conversion of wider or floating-point inputs into the
//!   `u8` representation the codec operates on.

pub mod bit_partition;
pub mod convert;
