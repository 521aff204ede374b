// In: src/bridge/frame_encoder.rs

//! The per-frame encode loop that sits between a camera and a transport.
//!
//! For every incoming interleaved frame the `FrameEncoder` fetches labels from
//! its `LabelSource`, encodes them, publishes the result to its `FrameSink` and,
//! if configured, proves the labels survive a point-cloud re-projection.

use std::sync::Arc;

use ndarray::{Array2, ArrayView3};

use crate::bridge::format::{EncodedFrame, FrameReport, FRAME_ENCODING};
use crate::bridge::{layout, point_cloud};
use crate::codec::Codec;
use crate::config::CpsConfig;
use crate::error::CpsError;
use crate::traits::{FrameSink, LabelSource};

pub struct FrameEncoder<S, K> {
    codec: Codec,
    config: Arc<CpsConfig>,
    source: S,
    sink: K,
    next_frame: u64,
}

impl<S: LabelSource, K: FrameSink> FrameEncoder<S, K> {
    /// Validates the configuration and wires up the collaborators.
    pub fn new(config: Arc<CpsConfig>, source: S, sink: K) -> Result<Self, CpsError> {
        let codec = config.codec()?;
        log::info!(
            "cps frame encoder ready: {}, {} class bits, verify_round_trip={}",
            codec.bit_width(),
            codec.class_bits(),
            config.verify_round_trip
        );
        Ok(Self {
            codec,
            config,
            source,
            sink,
            next_frame: 0,
        })
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn sink(&self) -> &K {
        &self.sink
    }

    pub fn into_sink(self) -> K {
        self.sink
    }

    /// Encodes one interleaved RGB8 frame and hands it to the sink.
    ///
    /// Nothing is published if the frame, the labels or the encode step fail.
    /// A verification failure is reported after the frame has been published.
    pub fn process_frame(&mut self, frame: &[u8], height: usize, width: usize) -> Result<FrameReport, CpsError> {
        let planar = layout::interleaved_to_planar(frame, height, width)?;
        let labels = self.source.labels_for(height, width)?;
        let encoded = self.codec.encode(planar.view(), labels.view())?;

        let frame_index = self.next_frame;
        let published = EncodedFrame {
            frame_index,
            height,
            width,
            data: layout::planar_to_interleaved(encoded.view())?,
        };
        self.sink.publish(&published)?;
        // A rejected frame does not consume an index.
        self.next_frame += 1;
        log::trace!(
            "cps frame {} published as {} ({} bytes)",
            frame_index,
            FRAME_ENCODING,
            published.data.len()
        );

        let verified = if self.config.verify_round_trip {
            self.verify(frame_index, encoded.view(), &labels)?;
            true
        } else {
            false
        };

        log::info!(
            "cps frame {}: {}x{} encoded, verified={}",
            frame_index,
            height,
            width,
            verified
        );
        Ok(FrameReport {
            frame_index,
            pixels: height * width,
            verified,
        })
    }

    /// Decodes a packed colored sample stream into its label stream.
    pub fn decode_samples(&self, raw: &[u8]) -> Result<Vec<u32>, CpsError> {
        self.codec.decode_bytes(raw)
    }

    /// Re-projects `encoded` into a point cloud, decodes it and compares with `labels`.
    fn verify(&self, frame_index: u64, encoded: ArrayView3<u8>, labels: &Array2<u8>) -> Result<(), CpsError> {
        let cloud = point_cloud::simulate_point_cloud(encoded)?;
        let decoded = self.codec.decode_records(&cloud)?;
        let mismatches = decoded
            .iter()
            .zip(labels.iter())
            .filter(|&(&got, &want)| got != u32::from(want))
            .count();
        if mismatches > 0 {
            log::error!(
                "cps frame {}: {} of {} labels did not survive the round trip",
                frame_index,
                mismatches,
                decoded.len()
            );
            return Err(CpsError::VerificationFailed {
                mismatches,
                total: decoded.len(),
            });
        }
        Ok(())
    }
}
