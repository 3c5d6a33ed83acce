//! tensor::dtype — element types and floating-point promotion.
//!
//! Distribution parameters are stored as `ArrayD<F>` where `F` implements
//! [`Real`] (`f32` or `f64`). At typed boundaries (e.g. Python inputs whose
//! element type is only known at runtime) [`common_dtype`] picks the element
//! type a distribution should be built with.
use ndarray::ScalarOperand;
use num_traits::{Float, FloatConst};
use rand::Rng;
use rand_distr::StandardNormal;

use crate::tensor::errors::{TensorError, TensorResult};

/// Runtime tag for array element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Float32,
    Float64,
    Int32,
    Int64,
}

impl DType {
    pub fn is_floating(self) -> bool {
        matches!(self, DType::Float32 | DType::Float64)
    }

    pub fn name(self) -> &'static str {
        match self {
            DType::Float32 => "float32",
            DType::Float64 => "float64",
            DType::Int32 => "int32",
            DType::Int64 => "int64",
        }
    }
}

impl std::fmt::Display for DType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Floating-point element type usable as a distribution dtype.
pub trait Real:
    Float + FloatConst + ScalarOperand + std::fmt::Debug + std::fmt::Display + Send + Sync + 'static
{
    /// Runtime tag for this type.
    const DTYPE: DType;

    /// Lossy conversion from an `f64` constant.
    fn from_f64(value: f64) -> Self;

    /// Widening conversion used for diagnostics.
    fn to_f64_lossy(self) -> f64;

    /// Draw a single standard-normal variate.
    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl Real for f32 {
    const DTYPE: DType = DType::Float32;

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn to_f64_lossy(self) -> f64 {
        f64::from(self)
    }

    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl Real for f64 {
    const DTYPE: DType = DType::Float64;

    fn from_f64(value: f64) -> Self {
        value
    }

    fn to_f64_lossy(self) -> f64 {
        self
    }

    fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

/// Dtype used when no input carries one: single precision.
pub const DEFAULT_FLOAT_DTYPE: DType = DType::Float32;

/// Infer the common floating dtype of several inputs.
///
/// Parameters
/// ----------
/// - `candidates`: `&[Option<DType>]`
///   One entry per input. `None` means the input carries no dtype of its own
///   (e.g. a bare Python float or list) and adapts to the others.
/// - `hint`: `DType`
///   Used when no candidate is typed.
///
/// Returns
/// -------
/// `TensorResult<DType>`
///   The shared dtype of all typed inputs, or `hint` if none is typed.
///
/// Errors
/// ------
/// - [`TensorError::IncompatibleDTypes`] if two typed inputs disagree.
/// - [`TensorError::NonFloatingDType`] if the resulting dtype is not floating.
pub fn common_dtype(candidates: &[Option<DType>], hint: DType) -> TensorResult<DType> {
    let mut found: Option<DType> = None;
    for dtype in candidates.iter().flatten() {
        match found {
            None => found = Some(*dtype),
            Some(prev) if prev == *dtype => {}
            Some(prev) => {
                return Err(TensorError::IncompatibleDTypes {
                    first: prev.to_string(),
                    second: dtype.to_string(),
                });
            }
        }
    }
    let dtype = found.unwrap_or(hint);
    if !dtype.is_floating() {
        return Err(TensorError::NonFloatingDType { dtype: dtype.to_string() });
    }
    Ok(dtype)
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - `common_dtype` with untyped, agreeing, disagreeing, and integer inputs.
    // - The `Real::DTYPE` tags for `f32` and `f64`.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Untyped inputs fall back to the hint.
    //
    // Given
    // -----
    // - Two `None` candidates, hint = Float32.
    //
    // Expect
    // ------
    // - `Ok(Float32)`.
    fn common_dtype_without_typed_inputs_uses_hint() {
        assert_eq!(common_dtype(&[None, None], DType::Float32), Ok(DType::Float32));
    }

    #[test]
    // Purpose
    // -------
    // A single typed input decides the dtype for untyped ones.
    //
    // Given
    // -----
    // - [Some(Float64), None], hint = Float32.
    //
    // Expect
    // ------
    // - `Ok(Float64)`.
    fn common_dtype_with_one_typed_input_adopts_it() {
        assert_eq!(common_dtype(&[Some(DType::Float64), None], DType::Float32), Ok(DType::Float64));
    }

    #[test]
    // Purpose
    // -------
    // Disagreeing typed inputs are rejected.
    //
    // Given
    // -----
    // - [Some(Float32), Some(Float64)].
    //
    // Expect
    // ------
    // - `IncompatibleDTypes` naming both.
    fn common_dtype_with_mismatched_inputs_returns_error() {
        let err = common_dtype(&[Some(DType::Float32), Some(DType::Float64)], DType::Float32)
            .unwrap_err();
        assert_eq!(
            err,
            TensorError::IncompatibleDTypes { first: "float32".into(), second: "float64".into() }
        );
    }

    #[test]
    // Purpose
    // -------
    // Integer dtypes cannot parameterize a continuous distribution.
    //
    // Given
    // -----
    // - [Some(Int32), Some(Int32)].
    //
    // Expect
    // ------
    // - `NonFloatingDType { dtype: "int32" }`.
    fn common_dtype_with_integer_inputs_returns_error() {
        let err = common_dtype(&[Some(DType::Int32), Some(DType::Int32)], DType::Float32)
            .unwrap_err();
        assert_eq!(err, TensorError::NonFloatingDType { dtype: "int32".into() });
    }

    #[test]
    // Purpose
    // -------
    // Untyped inputs resolve to single precision under the default hint.
    //
    // Given
    // -----
    // - Two untyped candidates and `DEFAULT_FLOAT_DTYPE`.
    //
    // Expect
    // ------
    // - `Float32`.
    fn untyped_inputs_default_to_single_precision() {
        assert_eq!(DEFAULT_FLOAT_DTYPE, DType::Float32);
        assert_eq!(common_dtype(&[None, None], DEFAULT_FLOAT_DTYPE), Ok(DType::Float32));
    }

    #[test]
    fn real_dtype_tags_match_primitive_types() {
        assert_eq!(<f32 as Real>::DTYPE, DType::Float32);
        assert_eq!(<f64 as Real>::DTYPE, DType::Float64);
    }
}
