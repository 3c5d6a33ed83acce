//! utils — Python input conversion for the extension module.
//!
//! Arrays arriving from Python may be NumPy arrays (typed), or plain floats
//! and nested sequences (untyped). These helpers report the runtime dtype of
//! an input so the bindings can run [`common_dtype`](crate::tensor::common_dtype),
//! and convert inputs into owned `ndarray` arrays of the chosen element type.
#[cfg(feature = "python-bindings")]
use ndarray::ArrayD;

#[cfg(feature = "python-bindings")]
use numpy::{
    PyArrayDescrMethods,   // .kind(), .itemsize()
    PyUntypedArray,
    PyUntypedArrayMethods, // .dtype()
    PyReadonlyArrayDyn,
};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::tensor::{DType, Real};

/// Runtime dtype of a Python input, or `None` when it carries no dtype.
///
/// NumPy arrays and scalars map to [`DType`]; Python floats, ints, and
/// sequences are untyped.
///
/// # Errors
/// `TypeError` for NumPy inputs whose element type has no [`DType`] tag.
#[cfg(feature = "python-bindings")]
pub fn detect_dtype<'py>(raw: &Bound<'py, PyAny>) -> PyResult<Option<DType>> {
    let Ok(array) = raw.downcast::<PyUntypedArray>() else {
        return Ok(None);
    };
    let descr = array.dtype();
    let dtype = match (descr.kind(), descr.itemsize()) {
        (b'f', 4) => DType::Float32,
        (b'f', 8) => DType::Float64,
        (b'i', 4) => DType::Int32,
        (b'i', 8) => DType::Int64,
        (kind, size) => {
            return Err(PyTypeError::new_err(format!(
                "unsupported array element type (kind '{}', {size} bytes)",
                kind as char
            )));
        }
    };
    Ok(Some(dtype))
}

/// Convert any array-like into an owned array of element type `F`.
///
/// Goes through `numpy.asarray(raw, dtype=F)`, so nested lists, scalars, and
/// arrays of other float widths are accepted.
#[cfg(feature = "python-bindings")]
pub fn extract_array<'py, F>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<ArrayD<F>>
where
    F: Real + numpy::Element,
{
    let converted = py.import("numpy")?.call_method1("asarray", (raw, F::DTYPE.name()))?;
    let array: PyReadonlyArrayDyn<F> = converted.extract().map_err(|_| {
        PyTypeError::new_err("expected a numpy.ndarray, float, or nested sequence of floats")
    })?;
    Ok(array.as_array().to_owned())
}
