// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` connects the pure `Codec` to the data shapes its collaborators use.
// The codec works on planar `(3, H, W)` arrays and typed sample records; cameras
// deliver interleaved `(H, W, 3)` frames and point-cloud producers deliver packed
// records or Arrow record batches.
//
// Data Flow (Encode):
//
//   1. [FrameEncoder::process_frame]   -> Receives an interleaved RGB8 frame
//         |
//         `-> a. `layout` converts it to a planar `Array3<u8>`
//         `-> b. the `LabelSource` supplies a matching `Array2<u8>`
//         `-> c. `Codec::encode` produces the encoded planar image
//         `-> d. `layout` converts back and the `FrameSink` receives an `EncodedFrame`
//         `-> e. (optional) `point_cloud` simulates the colored cloud and the
//                labels are decoded again and compared
//
// Data Flow (Decode):
//
//   1. [Packed bytes | RecordBatch]   -> `point_cloud` / `arrow_impl` views the
//                                        samples without copying where possible
//   2. [Codec::decode_*]               -> Returns one `u32` label per sample, in order
//
// ====================================================================================
pub mod arrow_impl;
pub mod format;
pub mod frame_encoder;
pub mod layout;
pub mod point_cloud;
pub mod sources;

pub use arrow_impl::{decode_point_batch, point_batch_from_records};
pub use format::{EncodedFrame, FrameReport};
pub use frame_encoder::FrameEncoder;
pub use sources::{GridLabelSource, MemorySink, RandomLabelSource};

#[cfg(test)]
mod tests;
