//! This module contains the pure, stateless kernels for converting caller data
//! into the `u8` representation the codec works on.
//!
//! Conversion is exact: a value is accepted only if it survives a round-trip
//! through `u8` unchanged. Nothing is rounded, clamped or wrapped. A float image
//! that has not been quantized yet, for example, is rejected with
//! `CpsError::Type` instead of being truncated.

use ndarray::{Array2, Array3, ArrayView2, ArrayView3};
use num_traits::{NumCast, ToPrimitive};
use std::fmt::Debug;

use crate::error::CpsError;
use crate::types::BitWidth;

//==================================================================================
// 1. Private Core Logic
//==================================================================================

/// Returns the value as `u8` if, and only if, it converts back to itself.
fn exact_u8<T>(value: T) -> Option<u8>
where
    T: ToPrimitive + NumCast + PartialEq + Copy,
{
    let quantized = value.to_u8()?;
    let restored: T = NumCast::from(quantized)?;
    (restored == value).then_some(quantized)
}

/// Picks the error kind for a label that is not an exact `u8`.
fn classify_rejected_label<T>(value: T, width: BitWidth) -> CpsError
where
    T: ToPrimitive + Copy + Debug,
{
    match (value.to_i64(), value.to_f64()) {
        (Some(integral), Some(float)) if float == integral as f64 => {
            let out_of_capacity =
                integral < 0 || u64::try_from(integral).map_or(true, |v| !width.accepts(v));
            if out_of_capacity {
                CpsError::Range {
                    value: integral,
                    class_bits: width.class_bits(),
                }
            } else {
                CpsError::Type(format!("label {} does not fit in u8", integral))
            }
        }
        _ => CpsError::Type(format!("label {:?} is not an integer", value)),
    }
}

//==================================================================================
// 2. Public API
//==================================================================================

/// Converts a `(3, H, W)` image of any numeric type into `u8` channels.
pub fn quantize_image<T>(image: ArrayView3<T>) -> Result<Array3<u8>, CpsError>
where
    T: ToPrimitive + NumCast + PartialEq + Copy + Debug,
{
    let values = image
        .iter()
        .map(|&v| {
            exact_u8(v).ok_or_else(|| {
                CpsError::Type(format!("pixel value {:?} is not an integer in [0, 255]", v))
            })
        })
        .collect::<Result<Vec<u8>, CpsError>>()?;
    Ok(Array3::from_shape_vec(image.raw_dim(), values)?)
}

/// Converts an `(H, W)` label grid of any numeric type into `u8` labels and
/// checks every label against the capacity of `width`.
///
/// Negative labels and labels at or above `2^class_bits` fail with
/// `CpsError::Range`; fractional, NaN, or otherwise non-`u8` values fail with
/// `CpsError::Type`.
pub fn quantize_labels<T>(labels: ArrayView2<T>, width: BitWidth) -> Result<Array2<u8>, CpsError>
where
    T: ToPrimitive + NumCast + PartialEq + Copy + Debug,
{
    let values = labels
        .iter()
        .map(|&v| match exact_u8(v) {
            Some(label) if width.accepts(<u64 as From<u8>>::from(label)) => Ok(label),
            Some(label) => Err(CpsError::Range {
                value: <i64 as From<u8>>::from(label),
                class_bits: width.class_bits(),
            }),
            None => Err(classify_rejected_label(v, width)),
        })
        .collect::<Result<Vec<u8>, CpsError>>()?;
    Ok(Array2::from_shape_vec(labels.raw_dim(), values)?)
}

//==================================================================================
// 3. Unit Tests
//==================================================================================
