//! Property-based tests for the CPS codec.
//!
//! Uses proptest to verify the round-trip, high-bit preservation, determinism
//! and range-rejection properties across random images and label grids.

use cps_codec::bridge::point_cloud::{sample_matrix, simulate_point_cloud};
use cps_codec::{Codec, CpsError};
use ndarray::{Array2, Array3};
use proptest::collection::vec;
use proptest::prelude::*;

/// A bit width in {1, 2} with a matching random image and in-range label grid.
fn frame_strategy() -> impl Strategy<Value = (i64, Array3<u8>, Array2<u8>)> {
    (1i64..=2, 1usize..12, 1usize..12).prop_flat_map(|(n, h, w)| {
        let capacity = 1u8 << (3 * n);
        (
            Just(n),
            vec(any::<u8>(), 3 * h * w),
            vec(0u8..capacity, h * w),
        )
            .prop_map(move |(n, pixels, labels)| {
                let image = Array3::from_shape_vec((3, h, w), pixels).unwrap();
                let labels = Array2::from_shape_vec((h, w), labels).unwrap();
                (n, image, labels)
            })
    })
}

proptest! {
    #[test]
    fn prop_round_trip_through_point_cloud((n, image, labels) in frame_strategy()) {
        let codec = Codec::new(n).unwrap();
        let encoded = codec.encode(image.view(), labels.view()).unwrap();
        let cloud = simulate_point_cloud(encoded.view()).unwrap();

        let decoded = codec.decode_records(&cloud).unwrap();
        let expected: Vec<u32> = labels.iter().map(|&l| u32::from(l)).collect();
        prop_assert_eq!(&decoded, &expected);

        // The (N, 6) matrix entry point agrees with the record path.
        let from_matrix = codec.decode(sample_matrix(&cloud).view()).unwrap();
        prop_assert_eq!(from_matrix.to_vec(), expected);
    }

    #[test]
    fn prop_high_bits_preserved((n, image, labels) in frame_strategy()) {
        let codec = Codec::new(n).unwrap();
        let encoded = codec.encode(image.view(), labels.view()).unwrap();
        let high = !((1u8 << n) - 1);
        for (before, after) in image.iter().zip(encoded.iter()) {
            prop_assert_eq!(before & high, after & high);
        }
    }

    #[test]
    fn prop_encode_is_deterministic((n, image, labels) in frame_strategy()) {
        let codec = Codec::new(n).unwrap();
        let first = codec.encode(image.view(), labels.view()).unwrap();
        let second = codec.encode(image.view(), labels.view()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_decode_ignores_position_fields(
        n in 1i64..=2,
        rgb in any::<[u8; 3]>(),
        a in any::<[u8; 3]>(),
        b in any::<[u8; 3]>(),
    ) {
        let codec = Codec::new(n).unwrap();
        let rows = vec![
            vec![a[0], a[1], a[2], rgb[0], rgb[1], rgb[2]],
            vec![b[0], b[1], b[2], rgb[0], rgb[1], rgb[2]],
        ];
        let labels = codec.decode_rows(&rows).unwrap();
        prop_assert_eq!(labels[0], labels[1]);
        prop_assert!(labels[0] < 1u32 << (3 * n));
    }

    #[test]
    fn prop_out_of_range_label_is_rejected(
        n in 1i64..=2,
        bad_offset in 0u8..64,
        position in 0usize..16,
    ) {
        let codec = Codec::new(n).unwrap();
        let capacity = 1u16 << (3 * n);
        let bad = (capacity + u16::from(bad_offset)).min(255) as u8;

        let image = Array3::<u8>::zeros((3, 4, 4));
        let mut labels = Array2::<u8>::zeros((4, 4));
        labels[[position / 4, position % 4]] = bad;

        let result = codec.encode(image.view(), labels.view());
        let is_range_error = matches!(
            result,
            Err(CpsError::Range { value, .. }) if value == i64::from(bad)
        );
        prop_assert!(is_range_error);
    }
}
