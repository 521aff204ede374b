// In: src/codec.rs

//! The channel-packed steganography codec.
//!
//! `Codec::encode` writes a per-pixel label into the low `n` bits of the R, G and
//! B channels of a `(3, H, W)` image; `Codec::decode` reads it back from any
//! colored sample whose color was copied from an encoded pixel. The two are
//! independent entry points and share nothing but the bit width.
//!
//! Aliasing: `encode` returns a fresh buffer and never touches its input.
//! `encode_in_place` overwrites the caller's buffer through an exclusive borrow;
//! a caller that shares pixels across threads must hand each thread its own copy.

use ndarray::{s, Array1, Array3, ArrayView2, ArrayView3, ArrayViewD, ArrayViewMut3, Ix2, Ix3, Zip};

use crate::error::CpsError;
use crate::kernels::bit_partition::{embed_field, extract_field, join_fields, split_label};
use crate::types::bit_width::CHANNELS;
use crate::types::{BitWidth, SampleRecord, SAMPLE_FIELDS};

/// Column of the red channel inside a sample record; green and blue follow it.
const RED_FIELD: usize = 3;

/// A stateless CPS encoder/decoder for one fixed bit width.
///
/// The codec is `Copy`, holds no buffers and is safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Codec {
    bit_width: BitWidth,
}

impl Codec {
    /// Creates a codec from a raw bit width. Fails with `CpsError::Configuration`
    /// if `bit_width` is not positive, or if it does not fit in a `u32`.
    pub fn new(bit_width: i64) -> Result<Self, CpsError> {
        Ok(Self::with_bit_width(BitWidth::new(bit_width)?))
    }

    pub fn with_bit_width(bit_width: BitWidth) -> Self {
        Self { bit_width }
    }

    pub fn bit_width(&self) -> BitWidth {
        self.bit_width
    }

    /// Total label capacity in bits (`3n`).
    pub fn class_bits(&self) -> u32 {
        self.bit_width.class_bits()
    }

    //==============================================================================
    // Encode
    //==============================================================================

    /// Encodes `labels` into a copy of `image` and returns the copy.
    pub fn encode(&self, image: ArrayView3<u8>, labels: ArrayView2<u8>) -> Result<Array3<u8>, CpsError> {
        self.validate_encode(image.shape(), labels)?;
        let mut encoded = image.to_owned();
        self.embed(encoded.view_mut(), labels);
        Ok(encoded)
    }

    /// Encodes `labels` directly into `image`.
    ///
    /// All checks run before the first write; on error the buffer is untouched.
    pub fn encode_in_place(&self, image: ArrayViewMut3<u8>, labels: ArrayView2<u8>) -> Result<(), CpsError> {
        self.validate_encode(image.shape(), labels)?;
        self.embed(image, labels);
        Ok(())
    }

    /// Encode entry point for arrays whose dimensionality is only known at runtime.
    pub fn encode_dyn(&self, image: ArrayViewD<u8>, labels: ArrayViewD<u8>) -> Result<Array3<u8>, CpsError> {
        if image.ndim() != 3 {
            return Err(CpsError::ShapeMismatch(format!(
                "image must be (3, H, W), got {} dimension(s) {:?}",
                image.ndim(),
                image.shape()
            )));
        }
        if labels.ndim() != 2 {
            return Err(CpsError::ShapeMismatch(format!(
                "label grid must be (H, W), got {} dimension(s) {:?}",
                labels.ndim(),
                labels.shape()
            )));
        }
        let image = image.into_dimensionality::<Ix3>()?;
        let labels = labels.into_dimensionality::<Ix2>()?;
        self.encode(image, labels)
    }

    fn validate_encode(&self, image_shape: &[usize], labels: ArrayView2<u8>) -> Result<(), CpsError> {
        if image_shape[0] != CHANNELS as usize {
            return Err(CpsError::ShapeMismatch(format!(
                "image must have exactly {} channels in shape (3, H, W), got {:?}",
                CHANNELS, image_shape
            )));
        }
        if &image_shape[1..] != labels.shape() {
            return Err(CpsError::ShapeMismatch(format!(
                "image spatial shape {:?} does not match label grid shape {:?}",
                &image_shape[1..],
                labels.shape()
            )));
        }
        if let Some(&label) = labels.iter().find(|&&l| !self.bit_width.accepts(u64::from(l))) {
            return Err(CpsError::Range {
                value: i64::from(label),
                class_bits: self.class_bits(),
            });
        }
        Ok(())
    }

    /// Writes the label fields. Shapes must already be validated.
    fn embed(&self, mut image: ArrayViewMut3<u8>, labels: ArrayView2<u8>) {
        let n = self.bit_width.get();
        log::debug!(
            "cps encode: {}x{} pixels, {}",
            labels.nrows(),
            labels.ncols(),
            self.bit_width
        );
        let (red, green, blue) = image.multi_slice_mut((s![0, .., ..], s![1, .., ..], s![2, .., ..]));
        Zip::from(red)
            .and(green)
            .and(blue)
            .and(labels)
            .for_each(|r, g, b, &label| {
                let [r_field, g_field, b_field] = split_label(label, n);
                *r = embed_field(*r, r_field, n);
                *g = embed_field(*g, g_field, n);
                *b = embed_field(*b, b_field, n);
            });
    }

    //==============================================================================
    // Decode
    //==============================================================================

    /// Decodes the label carried by a single `(r, g, b)` color.
    pub fn decode_rgb(&self, r: u8, g: u8, b: u8) -> Result<u32, CpsError> {
        let n = self.bit_width.get();
        let fields = [extract_field(r, n), extract_field(g, n), extract_field(b, n)];
        join_fields(fields, n).ok_or_else(|| {
            CpsError::Type(format!(
                "label decoded from ({}, {}, {}) at {} does not fit in u32",
                r, g, b, self.bit_width
            ))
        })
    }

    /// Decodes an `(N, 6)` array of `x, y, z, r, g, b` samples into `N` labels.
    pub fn decode(&self, samples: ArrayView2<u8>) -> Result<Array1<u32>, CpsError> {
        if samples.ncols() != SAMPLE_FIELDS {
            return Err(CpsError::ShapeMismatch(format!(
                "samples must have shape (N, {}), got {:?}",
                SAMPLE_FIELDS,
                samples.shape()
            )));
        }
        log::debug!("cps decode: {} samples, {}", samples.nrows(), self.bit_width);
        let colors = samples.slice(s![.., RED_FIELD..RED_FIELD + 3]);
        colors
            .outer_iter()
            .map(|rgb| self.decode_rgb(rgb[0], rgb[1], rgb[2]))
            .collect::<Result<Vec<u32>, CpsError>>()
            .map(Array1::from)
    }

    /// Decodes typed sample records.
    pub fn decode_records(&self, records: &[SampleRecord]) -> Result<Vec<u32>, CpsError> {
        log::debug!("cps decode: {} records, {}", records.len(), self.bit_width);
        records
            .iter()
            .map(|rec| self.decode_rgb(rec.r, rec.g, rec.b))
            .collect()
    }

    /// Decodes a packed `[x, y, z, r, g, b, ...]` byte buffer.
    pub fn decode_bytes(&self, raw: &[u8]) -> Result<Vec<u32>, CpsError> {
        self.decode_records(SampleRecord::slice_from_bytes(raw)?)
    }

    /// Decodes ragged rows, checking every row for exactly six fields before
    /// decoding any of them.
    pub fn decode_rows<R: AsRef<[u8]>>(&self, rows: &[R]) -> Result<Vec<u32>, CpsError> {
        let records = rows
            .iter()
            .map(|row| SampleRecord::from_fields(row.as_ref()))
            .collect::<Result<Vec<_>, CpsError>>()?;
        self.decode_records(&records)
    }
}

impl TryFrom<i64> for Codec {
    type Error = CpsError;

    fn try_from(bit_width: i64) -> Result<Self, Self::Error> {
        Self::new(bit_width)
    }
}
