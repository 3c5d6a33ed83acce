//! distributions::traits — the contract shared by batched distributions.
//!
//! Purpose
//! -------
//! Define [`Distribution`], the narrow, stable interface through which
//! generic orchestration code (likelihood builders, samplers, bindings)
//! drives any batched distribution: shape queries, density, sampling,
//! moments, and the parameter validation hook.
//!
//! Key behaviors
//! -------------
//! - Implementors provide the distribution-specific pieces (`log_prob`,
//!   `sample`, `mean`, `stddev`, shapes, validation); derived queries such as
//!   `prob`, `variance`, `sample_shaped`, and the scalar-shape predicates
//!   have default implementations.
//! - Every method that consumes parameters runs the validation hook with
//!   `is_init = false` first, so deferred parameters are re-checked on use.
//!
//! Invariants & assumptions
//! ------------------------
//! - Results of `log_prob(x)` have the broadcast shape of `x` and the batch
//!   shape (event shape is appended for non-scalar events).
//! - `sample(n, seed)` returns shape `[n] + batch_shape + event_shape` and
//!   consumes sub-seeds from `seed` in a fixed, documented order.
//! - Batch shapes are recomputed from the current parameters on every call
//!   rather than cached, because deferred parameters may change shape.
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray::ArrayD<F>`; static shapes are [`TensorShape`].
use ndarray::ArrayD;

use crate::{
    distributions::errors::DistResult,
    random::SeedStream,
    tensor::{
        DType, Real, TensorShape,
        ops::reshape,
        shape::{checked_num_elements, pad_shape},
    },
};

/// How gradients can flow through samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReparameterizationType {
    /// Samples are a differentiable function of the parameters and raw noise.
    FullyReparameterized,
    /// Samples are not differentiable with respect to the parameters.
    NotReparameterized,
}

/// Interface for batched, broadcastable distributions over `ArrayD<F>`.
pub trait Distribution<F: Real> {
    /// Diagnostic name.
    fn name(&self) -> &str;

    /// Element type of parameters, samples, and densities.
    fn dtype(&self) -> DType {
        F::DTYPE
    }

    fn reparameterization_type(&self) -> ReparameterizationType;

    fn validate_args(&self) -> bool;

    fn allow_nan_stats(&self) -> bool;

    /// Batch shape from static parameter metadata; may be partially known.
    fn batch_shape(&self) -> DistResult<TensorShape>;

    /// Batch shape from the parameters' current runtime shapes.
    fn batch_shape_at_runtime(&self) -> DistResult<Vec<usize>>;

    /// Shape of a single draw from one batch member.
    fn event_shape(&self) -> TensorShape {
        TensorShape::scalar()
    }

    fn event_shape_at_runtime(&self) -> Vec<usize> {
        Vec::new()
    }

    /// `true` when the batch is a single distribution.
    fn is_scalar_batch(&self) -> DistResult<bool> {
        Ok(self.batch_shape_at_runtime()?.is_empty())
    }

    fn is_scalar_event(&self) -> bool {
        self.event_shape_at_runtime().is_empty()
    }

    /// Log density at `x`, broadcast against the batch shape.
    fn log_prob(&self, x: &ArrayD<F>) -> DistResult<ArrayD<F>>;

    /// Density at `x`.
    fn prob(&self, x: &ArrayD<F>) -> DistResult<ArrayD<F>> {
        Ok(self.log_prob(x)?.mapv(F::exp))
    }

    /// `n` draws with shape `[n] + batch_shape + event_shape`.
    fn sample(&self, n: usize, seed: &mut SeedStream) -> DistResult<ArrayD<F>>;

    /// Draws with shape `sample_shape + batch_shape + event_shape`.
    fn sample_shaped(&self, sample_shape: &[usize], seed: &mut SeedStream) -> DistResult<ArrayD<F>> {
        let n = checked_num_elements(sample_shape)?;
        let flat = self.sample(n, seed)?;
        let trailing = &flat.shape()[1..];
        let target = pad_shape(sample_shape, trailing, &[]);
        Ok(reshape(flat, &target)?)
    }

    fn mean(&self) -> DistResult<ArrayD<F>>;

    fn stddev(&self) -> DistResult<ArrayD<F>>;

    fn variance(&self) -> DistResult<ArrayD<F>> {
        Ok(self.stddev()?.mapv(|s| s * s))
    }

    /// Validation hook.
    ///
    /// Called once with `is_init = true` at construction and with
    /// `is_init = false` before every use of the parameters.
    fn parameter_control_dependencies(&self, is_init: bool) -> DistResult<()>;
}
