//! Foreign function interfaces. Only compiled with the `python` feature.

pub mod python;

pub use python::{decode_point_batch_py, enable_verbose_logging_py, PyCodec};
