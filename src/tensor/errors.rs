//! tensor::errors — shape and dtype failures raised by the array layer.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by the small array
//! runtime in [`crate::tensor`]: static/dynamic broadcasting, parameter
//! assignment, dtype promotion, and reshaping of sampled arrays.
//!
//! Key behaviors
//! -------------
//! - Every fallible helper in `tensor` returns [`TensorResult<T>`] rather
//!   than panicking, including broadcasts that `ndarray` itself would panic
//!   on.
//! - Shapes are carried as their `Display` form so the error stays `Clone`
//!   and `PartialEq` regardless of whether the shape was static or concrete.
//!
//! Conventions
//! -----------
//! - Distribution-level code wraps these values in
//!   [`DistError::Tensor`](crate::distributions::errors::DistError::Tensor)
//!   via `?`; callers rarely match on [`TensorError`] directly.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Result alias for array-layer operations that may produce [`TensorError`].
pub type TensorResult<T> = Result<T, TensorError>;

/// Errors produced by shape inference, broadcasting, and dtype promotion.
#[derive(Debug, Clone, PartialEq)]
pub enum TensorError {
    /// Two shapes cannot be broadcast against each other.
    IncompatibleShapes { lhs: String, rhs: String },

    /// A value assigned to a variable does not fit its declared shape.
    ShapeMismatch { expected: String, actual: String },

    /// Two typed inputs carry different dtypes.
    IncompatibleDTypes { first: String, second: String },

    /// The promoted dtype is not a floating-point type.
    NonFloatingDType { dtype: String },

    /// An array could not be reshaped to the requested shape.
    Reshape { from: String, to: String },

    /// The element count of a shape does not fit in `usize`.
    ShapeOverflow { shape: String },
}

impl std::error::Error for TensorError {}

impl std::fmt::Display for TensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TensorError::IncompatibleShapes { lhs, rhs } => {
                write!(f, "Incompatible shapes for broadcasting: {lhs} and {rhs}")
            }
            TensorError::ShapeMismatch { expected, actual } => {
                write!(f, "Shape mismatch: expected a value compatible with {expected}, got {actual}")
            }
            TensorError::IncompatibleDTypes { first, second } => {
                write!(f, "Inputs have incompatible dtypes: {first} and {second}")
            }
            TensorError::NonFloatingDType { dtype } => {
                write!(f, "Expected a floating-point dtype, got {dtype}")
            }
            TensorError::Reshape { from, to } => {
                write!(f, "Cannot reshape array of shape {from} into shape {to}")
            }
            TensorError::ShapeOverflow { shape } => {
                write!(f, "Number of elements in shape {shape} overflows usize")
            }
        }
    }
}

/// Convert a [`TensorError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<TensorError> for PyErr {
    fn from(err: TensorError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
