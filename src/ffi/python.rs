// In: src/ffi/python.rs

use arrow::array::{Array, RecordBatch};
use arrow::pyarrow::{FromPyArrow, ToPyArrow};
use ndarray::{ArrayView2, ArrayView3};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::bridge;
use crate::codec::Codec;
use crate::error::CpsError;
use crate::types::bit_width::CHANNELS;
use crate::utils;

//==================================================================================
// I. Codec Class
//==================================================================================

/// Python handle on a `Codec`. Buffers cross the boundary as `bytes`.
#[pyclass(name = "Codec", module = "cps_codec", frozen)]
pub struct PyCodec {
    inner: Codec,
}

#[pymethods]
impl PyCodec {
    #[new]
    #[pyo3(signature = (bit_width = 2))]
    fn new(bit_width: i64) -> PyResult<Self> {
        Ok(Self {
            inner: Codec::new(bit_width)?,
        })
    }

    #[getter]
    fn bit_width(&self) -> u32 {
        self.inner.bit_width().get()
    }

    #[getter]
    fn class_bits(&self) -> u32 {
        self.inner.class_bits()
    }

    /// Encodes a planar `(3, height, width)` image with an `(height, width)` label grid.
    /// Returns the encoded image in the same planar layout; the input is not modified.
    fn encode(&self, py: Python<'_>, image: &[u8], labels: &[u8], height: usize, width: usize) -> PyResult<PyObject> {
        let codec = self.inner;
        let encoded = py.allow_threads(move || -> Result<Vec<u8>, CpsError> {
            let image = ArrayView3::from_shape((CHANNELS as usize, height, width), image)?;
            let labels = ArrayView2::from_shape((height, width), labels)?;
            let encoded = codec.encode(image, labels)?;
            Ok(encoded.iter().copied().collect())
        })?;
        Ok(PyBytes::new_bound(py, &encoded).into())
    }

    /// Decodes packed `x, y, z, r, g, b` records. Returns little-endian `u32` labels.
    fn decode(&self, py: Python<'_>, points: &[u8]) -> PyResult<PyObject> {
        let codec = self.inner;
        let labels = py.allow_threads(move || codec.decode_bytes(points))?;
        let bytes: Vec<u8> = labels.iter().flat_map(|label| label.to_le_bytes()).collect();
        Ok(PyBytes::new_bound(py, &bytes).into())
    }

    fn __repr__(&self) -> String {
        format!("Codec(bit_width={})", self.inner.bit_width().get())
    }
}

//==================================================================================
// II. Stateless Functions
//==================================================================================

/// Decodes a `pyarrow.RecordBatch` of colored points into a `pyarrow.UInt32Array`.
#[pyfunction]
#[pyo3(name = "decode_point_batch")]
pub fn decode_point_batch_py(py: Python<'_>, codec: &PyCodec, batch: &Bound<'_, PyAny>) -> PyResult<PyObject> {
    let batch = RecordBatch::from_pyarrow_bound(batch)?;
    let inner = codec.inner;
    let labels = py.allow_threads(move || bridge::decode_point_batch(&inner, &batch))?;
    labels.into_data().to_pyarrow(py)
}

#[pyfunction]
#[pyo3(name = "enable_verbose_logging", signature = (log_file = None))]
pub fn enable_verbose_logging_py(log_file: Option<String>) -> PyResult<()> {
    Ok(utils::enable_verbose_logging(log_file.as_deref())?)
}
