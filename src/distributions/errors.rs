//! distributions::errors — failures raised by distribution construction and use.
//!
//! Purpose
//! -------
//! Define [`DistError`], the error type returned by every fallible
//! distribution operation, and the [`DistResult`] alias.
//!
//! Key behaviors
//! -------------
//! - Parameter-shape conflicts known from static metadata fail construction
//!   ([`DistError::IncompatibleParamShapes`]), naming both shapes.
//! - Non-positive scales found while validation is enabled fail the calling
//!   operation ([`DistError::InvalidScale`]), reporting the first offending
//!   element.
//! - Array-layer failures (runtime broadcasting, reshapes, dtype promotion)
//!   are wrapped in [`DistError::Tensor`] so `?` works across layers.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing here is recoverable inside the library: errors are returned
//!   synchronously to the caller that triggered them.
//! - With validation disabled, invalid parameters produce `NaN`/`-∞` values
//!   rather than errors; only structural failures (shape conflicts) remain.
//!
//! Conventions
//! -----------
//! - Messages phrase the violated constraint in terms of argument names
//!   (`loc`, `scale`) so they read well from Python as well as Rust.
//! - With the `python-bindings` feature, errors convert to `ValueError`.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use crate::tensor::errors::TensorError;

/// Result alias for distribution operations that may produce [`DistError`].
pub type DistResult<T> = Result<T, DistError>;

/// Unified error type for distribution construction, validation, and evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum DistError {
    // ---- Construction ----
    /// `loc` and `scale` have statically known, broadcast-incompatible shapes.
    IncompatibleParamShapes { loc_shape: String, scale_shape: String },

    // ---- Validation ----
    /// `scale` has a non-positive (or NaN) element while validation is enabled.
    InvalidScale { index: Vec<usize>, value: f64 },

    // ---- Statistics ----
    /// A statistic is undefined for some batch member and NaN reporting is off.
    UndefinedStatistic { statistic: &'static str },

    // ---- Array layer ----
    /// Wrapper for shape, dtype, and reshape failures from [`crate::tensor`].
    Tensor(TensorError),
}

impl std::error::Error for DistError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DistError::Tensor(err) => Some(err),
            _ => None,
        }
    }
}

impl std::fmt::Display for DistError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistError::IncompatibleParamShapes { loc_shape, scale_shape } => {
                write!(
                    f,
                    "Arguments `loc` and `scale` must have compatible shapes; \
                     loc.shape={loc_shape}, scale.shape={scale_shape}."
                )
            }
            DistError::InvalidScale { index, value } => {
                write!(f, "Argument `scale` must be positive; got {value} at index {index:?}.")
            }
            DistError::UndefinedStatistic { statistic } => {
                write!(
                    f,
                    "Statistic `{statistic}` is undefined for at least one batch member \
                     and allow_nan_stats is false."
                )
            }
            DistError::Tensor(err) => write!(f, "{err}"),
        }
    }
}

impl From<TensorError> for DistError {
    fn from(err: TensorError) -> DistError {
        DistError::Tensor(err)
    }
}

/// Convert a [`DistError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<DistError> for PyErr {
    fn from(err: DistError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
