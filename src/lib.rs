//! This file is the root of the `cps_codec` Rust crate.
//!
//! Channel-packed steganography: a per-pixel label is split across the low bits
//! of an RGB pixel's three channels and later recovered from the colors alone,
//! e.g. after the image has been projected into a colored point cloud.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of our library (`codec`, `kernels`,
//!     `bridge`, etc.) and re-exporting the main entry points.
//! 2.  Defining the `#[pymodule]` entry point when the `python` feature is on.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod codec;
pub mod config;
pub mod error;
pub mod kernels;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(feature = "python")]
mod ffi;

pub use codec::Codec;
pub use config::CpsConfig;
pub use error::CpsError;
pub use types::{BitWidth, SampleRecord};

//==================================================================================
// 2. Python Module Definition
//==================================================================================
#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The `cps_codec` Python module.
#[cfg(feature = "python")]
#[pymodule]
fn cps_codec(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::PyCodec>()?;
    m.add_function(wrap_pyfunction!(ffi::decode_point_batch_py, m)?)?;

    // --- Expose the custom error type ---
    m.add("CpsError", m.py().get_type_bound::<pyo3::exceptions::PyValueError>())?;

    // --- Expose version string as a module attribute ---
    m.add("__version__", VERSION)?;

    // --- Turn on logging ---
    m.add_function(wrap_pyfunction!(ffi::enable_verbose_logging_py, m)?)?;

    Ok(())
}
