//! distributions::validation — reusable parameter checks.
//!
//! Purpose
//! -------
//! Centralize the checks distributions run on their parameters so each
//! distribution's validation hook reduces to choosing *when* to call them.
//!
//! Key behaviors
//! -------------
//! - [`check_param_shapes`] broadcasts two static parameter shapes and turns a
//!   conflict into [`DistError::IncompatibleParamShapes`]. It reads no data.
//! - [`assert_positive`] scans an array and reports the first element that is
//!   not strictly positive (NaN included) as [`DistError::InvalidScale`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Unknown static shape information never fails [`check_param_shapes`];
//!   conflicts then surface when the parameters are broadcast at runtime.
//!
//! Conventions
//! -----------
//! - Indices in errors are multi-dimensional, row-major, 0-based.
use ndarray::ArrayD;

use crate::{
    distributions::errors::{DistError, DistResult},
    tensor::{Real, TensorShape, broadcast_static_shape},
};

/// Static batch shape of two parameters, or a construction error naming both.
///
/// # Errors
/// [`DistError::IncompatibleParamShapes`] if both shapes are known and conflict.
pub fn check_param_shapes(loc: &TensorShape, scale: &TensorShape) -> DistResult<TensorShape> {
    broadcast_static_shape(loc, scale).map_err(|_| DistError::IncompatibleParamShapes {
        loc_shape: loc.to_string(),
        scale_shape: scale.to_string(),
    })
}

/// Require every element of `scale` to be strictly positive.
///
/// # Errors
/// [`DistError::InvalidScale`] with the first offending index and value.
pub fn assert_positive<F: Real>(scale: &ArrayD<F>) -> DistResult<()> {
    let offending = scale.iter().enumerate().find(|(_, v)| !(**v > F::zero()));
    match offending {
        None => Ok(()),
        Some((flat, value)) => Err(DistError::InvalidScale {
            index: unravel_index(flat, scale.shape()),
            value: value.to_f64_lossy(),
        }),
    }
}

// ---- Helper Methods ----

fn unravel_index(mut flat: usize, shape: &[usize]) -> Vec<usize> {
    let mut index = vec![0; shape.len()];
    for (axis, &dim) in shape.iter().enumerate().rev() {
        if dim > 0 {
            index[axis] = flat % dim;
            flat /= dim;
        }
    }
    index
}
