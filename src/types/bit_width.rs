//! This module defines the canonical, validated representation of the per-channel
//! bit width used throughout the CPS codec.

use crate::error::CpsError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of color channels a label is spread across (R, G, B).
pub const CHANNELS: u32 = 3;

/// Number of bits in a single color channel.
pub const CHANNEL_DEPTH: u32 = u8::BITS;

/// The number of low-order bits of each channel that carry label data.
///
/// Validation enforces positivity and a `u32` upper bound. Widths above [`CHANNEL_DEPTH`] are
/// accepted; they simply hand the whole channel over to the label field.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "i64", into = "u32")]
pub struct BitWidth(u32);

impl BitWidth {
    /// Validates a raw bit width. Zero, negative and above-`u32::MAX` values are rejected.
    pub fn new(bits: i64) -> Result<Self, CpsError> {
        if bits <= 0 {
            return Err(CpsError::Configuration(format!(
                "bit width must be a positive integer, got {}",
                bits
            )));
        }
        u32::try_from(bits).map(Self).map_err(|_| {
            CpsError::Configuration(format!("bit width {} does not fit in 32 bits", bits))
        })
    }

    /// The configured width `n`.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Total label capacity in bits, `3n`.
    pub fn class_bits(self) -> u32 {
        self.0.saturating_mul(CHANNELS)
    }

    /// Bits of a single `u8` channel actually overwritten by encode.
    pub fn channel_bits(self) -> u32 {
        self.0.min(CHANNEL_DEPTH)
    }

    /// Returns `true` if `label` lies in `[0, 2^class_bits)`.
    pub fn accepts(self, label: u64) -> bool {
        let class_bits = self.class_bits();
        class_bits >= u64::BITS || label < (1u64 << class_bits)
    }

    /// The largest label a `u8` label grid can carry at this width.
    pub fn max_label(self) -> u8 {
        if self.class_bits() >= CHANNEL_DEPTH {
            u8::MAX
        } else {
            (1u8 << self.class_bits()) - 1
        }
    }
}

impl TryFrom<i64> for BitWidth {
    type Error = CpsError;

    fn try_from(bits: i64) -> Result<Self, Self::Error> {
        Self::new(bits)
    }
}

impl From<BitWidth> for u32 {
    fn from(width: BitWidth) -> u32 {
        width.0
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bit(s)/channel", self.0)
    }
}
