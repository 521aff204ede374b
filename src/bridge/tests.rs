use super::*;
use crate::codec::Codec;
use crate::config::CpsConfig;
use crate::error::CpsError;
use crate::traits::{FrameSink, LabelSource};
use ndarray::Array2;
use std::sync::Arc;

/// Helper to build an interleaved RGB8 frame with varied high bits.
fn make_frame(height: usize, width: usize) -> Vec<u8> {
    (0..height * width * 3)
        .map(|i| (i * 53 % 251) as u8)
        .collect()
}

/// A sink that always refuses frames, like a disconnected publisher.
struct ClosedSink;

impl FrameSink for ClosedSink {
    fn publish(&mut self, _frame: &EncodedFrame) -> Result<(), CpsError> {
        Err(CpsError::SinkError("publisher closed".to_string()))
    }
}

#[test]
fn test_frame_encoder_publishes_and_verifies() {
    let config = Arc::new(CpsConfig {
        label_seed: Some(3),
        ..Default::default()
    });
    let source = RandomLabelSource::from_config(&config).unwrap();
    let mut encoder = FrameEncoder::new(config, source, MemorySink::new()).unwrap();

    let frame = make_frame(6, 5);
    let first = encoder.process_frame(&frame, 6, 5).unwrap();
    let second = encoder.process_frame(&frame, 6, 5).unwrap();

    assert_eq!(first.frame_index, 0);
    assert_eq!(second.frame_index, 1);
    assert_eq!(first.pixels, 30);
    assert!(first.verified && second.verified);

    let frames = encoder.sink().frames();
    assert_eq!(frames.len(), 2);
    assert_eq!(frames[0].data.len(), frame.len());
    assert_eq!(frames[1].frame_index, 1);
}

#[test]
fn test_published_frame_carries_labels_and_keeps_high_bits() {
    let labels = Array2::from_shape_fn((4, 4), |(r, c)| ((r * 4 + c) % 64) as u8);
    let config = Arc::new(CpsConfig::default());
    let mut encoder =
        FrameEncoder::new(config, GridLabelSource::new(labels.clone()), MemorySink::new()).unwrap();

    let frame = make_frame(4, 4);
    encoder.process_frame(&frame, 4, 4).unwrap();
    let published = encoder.into_sink().into_frames().remove(0);

    for (before, after) in frame.iter().zip(published.data.iter()) {
        assert_eq!(before & !0b11, after & !0b11);
    }

    // Decode the published image as a colorizer would see it.
    let planar = published.to_planar().unwrap();
    let cloud = point_cloud::simulate_point_cloud(planar.view()).unwrap();
    let codec = Codec::new(2).unwrap();
    let decoded = codec.decode_records(&cloud).unwrap();
    let expected: Vec<u32> = labels.iter().map(|&l| u32::from(l)).collect();
    assert_eq!(decoded, expected);
}

#[test]
fn test_frame_encoder_decode_samples_path() {
    let config = Arc::new(CpsConfig {
        bit_width: 1,
        verify_round_trip: false,
        label_seed: Some(11),
    });
    let source = RandomLabelSource::from_config(&config).unwrap();
    let mut encoder = FrameEncoder::new(config, source, MemorySink::new()).unwrap();
    let report = encoder.process_frame(&make_frame(3, 3), 3, 3).unwrap();
    assert!(!report.verified);

    let planar = encoder.sink().frames()[0].to_planar().unwrap();
    let cloud = point_cloud::simulate_point_cloud(planar.view()).unwrap();
    let labels = encoder
        .decode_samples(point_cloud::records_to_bytes(&cloud))
        .unwrap();
    assert_eq!(labels.len(), 9);
    assert!(labels.iter().all(|&l| l < 8));

    // The same cloud shipped as an Arrow batch decodes identically.
    let batch = point_batch_from_records(&cloud).unwrap();
    let from_batch = decode_point_batch(encoder.codec(), &batch).unwrap();
    assert_eq!(from_batch.values().to_vec(), labels);
}

#[test]
fn test_frame_encoder_rejects_bad_inputs_without_publishing() {
    let config = Arc::new(CpsConfig::default());
    let labels = Array2::<u8>::from_elem((2, 2), 64); // above 2^6 - 1
    let mut encoder =
        FrameEncoder::new(config.clone(), GridLabelSource::new(labels), MemorySink::new()).unwrap();

    let result = encoder.process_frame(&make_frame(2, 2), 2, 2);
    assert!(matches!(result, Err(CpsError::Range { value: 64, class_bits: 6 })));

    let result = encoder.process_frame(&[0u8; 11], 2, 2);
    assert!(matches!(result, Err(CpsError::ShapeMismatch(_))));
    assert!(encoder.sink().frames().is_empty());
}

#[test]
fn test_frame_encoder_surfaces_sink_errors() {
    let config = Arc::new(CpsConfig::default());
    let source = RandomLabelSource::new(config.validated_bit_width().unwrap(), Some(1));
    let mut encoder = FrameEncoder::new(config, source, ClosedSink).unwrap();
    let result = encoder.process_frame(&make_frame(2, 2), 2, 2);
    assert!(matches!(result, Err(CpsError::SinkError(_))));
}

/// Refuses the first frame, then accepts everything.
#[derive(Default)]
struct FlakySink {
    refused_once: bool,
    accepted: MemorySink,
}

impl FrameSink for FlakySink {
    fn publish(&mut self, frame: &EncodedFrame) -> Result<(), CpsError> {
        if !self.refused_once {
            self.refused_once = true;
            return Err(CpsError::SinkError("publisher not ready".to_string()));
        }
        self.accepted.publish(frame)
    }
}

#[test]
fn test_rejected_publish_does_not_consume_frame_index() {
    let config = Arc::new(CpsConfig::default());
    let source = RandomLabelSource::from_config(&config).unwrap();
    let mut encoder = FrameEncoder::new(config, source, FlakySink::default()).unwrap();
    let frame = make_frame(2, 2);

    assert!(matches!(
        encoder.process_frame(&frame, 2, 2),
        Err(CpsError::SinkError(_))
    ));
    let report = encoder.process_frame(&frame, 2, 2).unwrap();
    assert_eq!(report.frame_index, 0);
    assert_eq!(encoder.sink().accepted.frames()[0].frame_index, 0);
}

#[test]
fn test_same_seeded_config_publishes_same_frames() {
    let config = Arc::new(CpsConfig {
        bit_width: 2,
        verify_round_trip: true,
        label_seed: Some(2024),
    });
    let frame = make_frame(5, 7);
    let run = |config: Arc<CpsConfig>| {
        let source = RandomLabelSource::from_config(&config).unwrap();
        let mut encoder = FrameEncoder::new(config, source, MemorySink::new()).unwrap();
        for _ in 0..3 {
            encoder.process_frame(&frame, 5, 7).unwrap();
        }
        encoder.into_sink().into_frames()
    };

    let first = run(config.clone());
    let second = run(config);
    assert_eq!(first.len(), 3);
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.frame_index, b.frame_index);
        assert_eq!(a.data, b.data);
    }
}

#[test]
fn test_frame_encoder_rejects_invalid_config() {
    let config = Arc::new(CpsConfig {
        bit_width: 0,
        ..Default::default()
    });
    let source: Box<dyn LabelSource> = Box::new(GridLabelSource::new(Array2::zeros((1, 1))));
    let result = FrameEncoder::new(config, source, MemorySink::new());
    assert!(matches!(result, Err(CpsError::Configuration(_))));
}
