//! tensor::ops — elementwise kernels over broadcast views.
//!
//! `ndarray`'s arithmetic operators panic on incompatible shapes; these
//! helpers compute the broadcast shape first and surface conflicts as
//! [`TensorError::IncompatibleShapes`] instead.
use ndarray::{ArrayD, ArrayViewD, Axis, IxDyn, Zip};

use crate::tensor::{
    dtype::Real,
    errors::{TensorError, TensorResult},
    shape::{broadcast_dynamic_shape, format_dims},
};

/// Read-only view of `a` stretched to `shape`.
pub fn broadcast_to<'a, F>(a: &'a ArrayD<F>, shape: &[usize]) -> TensorResult<ArrayViewD<'a, F>> {
    a.broadcast(shape).ok_or_else(|| TensorError::IncompatibleShapes {
        lhs: format_dims(a.shape()),
        rhs: format_dims(shape),
    })
}

/// Apply `f` elementwise over the broadcast of `a` and `b`.
pub fn zip_with<F, G>(a: &ArrayD<F>, b: &ArrayD<F>, mut f: G) -> TensorResult<ArrayD<F>>
where
    F: Real,
    G: FnMut(F, F) -> F,
{
    let shape = broadcast_dynamic_shape(a.shape(), b.shape())?;
    let av = broadcast_to(a, &shape)?;
    let bv = broadcast_to(b, &shape)?;
    Ok(Zip::from(av).and(bv).map_collect(|&x, &y| f(x, y)))
}

/// Apply `f` elementwise over the broadcast of `a`, `b`, and `c`.
pub fn zip3_with<F, G>(
    a: &ArrayD<F>, b: &ArrayD<F>, c: &ArrayD<F>, mut f: G,
) -> TensorResult<ArrayD<F>>
where
    F: Real,
    G: FnMut(F, F, F) -> F,
{
    let shape = broadcast_dynamic_shape(a.shape(), b.shape())?;
    let shape = broadcast_dynamic_shape(&shape, c.shape())?;
    let av = broadcast_to(a, &shape)?;
    let bv = broadcast_to(b, &shape)?;
    let cv = broadcast_to(c, &shape)?;
    Ok(Zip::from(av).and(bv).and(cv).map_collect(|&x, &y, &z| f(x, y, z)))
}

/// Array of ones with `a`'s shape.
pub fn ones_like<F: Real>(a: &ArrayD<F>) -> ArrayD<F> {
    ArrayD::from_elem(a.raw_dim(), F::one())
}

/// Euclidean norm over the trailing axis, which is dropped from the result.
///
/// A rank-0 input is its own single-element axis, so its norm is `|a|`.
pub fn norm_last_axis<F: Real>(a: &ArrayD<F>) -> ArrayD<F> {
    if a.ndim() == 0 {
        return a.mapv(F::abs);
    }
    let last = Axis(a.ndim() - 1);
    a.map_axis(last, |lane| lane.iter().fold(F::zero(), |acc, &v| acc + v * v).sqrt())
}

/// Reshape `a` (row-major) into `shape`.
///
/// # Errors
/// [`TensorError::Reshape`] if the element counts differ.
pub fn reshape<F: Real>(a: ArrayD<F>, shape: &[usize]) -> TensorResult<ArrayD<F>> {
    let from = format_dims(a.shape());
    let a = if a.is_standard_layout() { a } else { a.as_standard_layout().into_owned() };
    a.into_shape_with_order(IxDyn(shape))
        .map_err(|_| TensorError::Reshape { from, to: format_dims(shape) })
}
