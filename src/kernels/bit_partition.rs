//! This module contains the pure, stateless bit-partition helpers shared by
//! encode and decode.
//!
//! A label is cut into three `n`-bit fields, least-significant first:
//!
//! ```text
//!   label bits:  [ 2n .. 3n ) [ n .. 2n ) [ 0 .. n )
//!                      B           G          R
//! ```
//!
//! Every helper takes the raw width `n`. Widths of 8 or more saturate to the full
//! channel, so the helpers are total and panic-free for any `n`.

use crate::types::bit_width::CHANNEL_DEPTH;

/// Mask selecting the low `n` bits of a channel.
#[inline]
pub fn low_mask(n: u32) -> u8 {
    if n >= CHANNEL_DEPTH {
        u8::MAX
    } else {
        (1u8 << n) - 1
    }
}

/// Replaces the low `n` bits of `channel` with `field`. High bits are untouched.
#[inline]
pub fn embed_field(channel: u8, field: u8, n: u32) -> u8 {
    let mask = low_mask(n);
    (channel & !mask) | (field & mask)
}

/// Reads the low `n` bits of `channel`.
#[inline]
pub fn extract_field(channel: u8, n: u32) -> u8 {
    channel & low_mask(n)
}

/// Splits `label` into its `[R, G, B]` fields.
#[inline]
pub fn split_label(label: u8, n: u32) -> [u8; 3] {
    let mask = low_mask(n);
    let g_shift = n;
    let b_shift = n.saturating_mul(2);
    [
        label & mask,
        label.checked_shr(g_shift).unwrap_or(0) & mask,
        label.checked_shr(b_shift).unwrap_or(0) & mask,
    ]
}

/// Recombines `[R, G, B]` fields into a label: `b * 2^(2n) + g * 2^n + r`.
///
/// Returns `None` when a non-zero field would be shifted past the 32 bits of the
/// decoded label type, which can only happen for widths of 13 or more.
#[inline]
pub fn join_fields(fields: [u8; 3], n: u32) -> Option<u32> {
    let [r, g, b] = fields;
    Some(place(r, 0)? | place(g, n)? | place(b, n.saturating_mul(2))?)
}

fn place(field: u8, shift: u32) -> Option<u32> {
    let wide = u32::from(field);
    if wide == 0 {
        return Some(0);
    }
    if shift >= u32::BITS || wide.leading_zeros() < shift {
        return None;
    }
    Some(wide << shift)
}
