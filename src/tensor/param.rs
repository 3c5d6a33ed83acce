//! tensor::param — distribution parameters that are either fixed or deferred.
//!
//! Purpose
//! -------
//! Model a distribution parameter as a sum type: a materialized array that
//! never changes after construction, or a reference to a deferred source that
//! is re-evaluated each time the parameter is consumed (a mutable
//! [`Variable`], or a [`Computed`] closure over other state).
//!
//! Key behaviors
//! -------------
//! - [`Param::is_materialized`] tells validation code whether a value checked
//!   once at construction can be trusted forever, or must be re-checked on
//!   every access.
//! - [`Param::resolve`] borrows materialized arrays and evaluates deferred
//!   ones; callers resolve once per operation and reuse the result.
//! - [`Param::static_shape`] exposes what is known about the shape without
//!   evaluating anything.
//!
//! Invariants & assumptions
//! ------------------------
//! - A deferred source's runtime value always satisfies its declared static
//!   shape: [`Variable::assign`] enforces this on write, [`Computed`] on
//!   every evaluation.
//! - Binding a parameter never copies a deferred source: the parameter holds
//!   an `Arc` to the same state the caller mutates.
use std::borrow::Cow;
use std::sync::{Arc, PoisonError, RwLock};

use ndarray::{Array, ArrayD, Dimension};

use crate::tensor::{
    dtype::Real,
    errors::{TensorError, TensorResult},
    shape::{TensorShape, format_dims},
};

/// A value that is produced on demand rather than stored.
pub trait DeferredSource<F>: Send + Sync {
    /// Produce the current value.
    ///
    /// # Errors
    /// [`TensorError::ShapeMismatch`] if the value breaks [`Self::static_shape`].
    fn evaluate(&self) -> TensorResult<ArrayD<F>>;

    /// Shape information known without evaluating.
    fn static_shape(&self) -> TensorShape;
}

/// A distribution parameter: fixed array or deferred source.
#[derive(Clone)]
pub enum Param<F> {
    /// Fixed value, known at construction.
    Materialized(ArrayD<F>),
    /// Value re-evaluated on every access.
    Deferred(Arc<dyn DeferredSource<F>>),
}

impl<F: Real> Param<F> {
    /// Wrap any deferred source.
    pub fn deferred<S>(source: S) -> Self
    where
        S: DeferredSource<F> + 'static,
    {
        Param::Deferred(Arc::new(source))
    }

    pub fn is_materialized(&self) -> bool {
        matches!(self, Param::Materialized(_))
    }

    pub fn is_deferred(&self) -> bool {
        !self.is_materialized()
    }

    /// Current value: borrowed when materialized, evaluated when deferred.
    pub fn resolve(&self) -> TensorResult<Cow<'_, ArrayD<F>>> {
        match self {
            Param::Materialized(value) => Ok(Cow::Borrowed(value)),
            Param::Deferred(source) => Ok(Cow::Owned(source.evaluate()?)),
        }
    }

    /// Shape known without evaluating a deferred source.
    pub fn static_shape(&self) -> TensorShape {
        match self {
            Param::Materialized(value) => TensorShape::from_dims(value.shape()),
            Param::Deferred(source) => source.static_shape(),
        }
    }

    /// Concrete shape of the current value (evaluates deferred sources).
    pub fn runtime_shape(&self) -> TensorResult<Vec<usize>> {
        Ok(self.resolve()?.shape().to_vec())
    }
}

impl<F> std::fmt::Debug for Param<F>
where
    F: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Materialized(value) => f.debug_tuple("Materialized").field(value).finish(),
            Param::Deferred(source) => f
                .debug_struct("Deferred")
                .field("static_shape", &source.static_shape().to_string())
                .finish(),
        }
    }
}

macro_rules! impl_scalar_param {
    ($($t:ty),*) => {$(
        impl From<$t> for Param<$t> {
            fn from(value: $t) -> Self {
                Param::Materialized(ndarray::arr0(value).into_dyn())
            }
        }
    )*};
}

impl_scalar_param!(f32, f64);

impl<F: Real, D: Dimension> From<Array<F, D>> for Param<F> {
    fn from(value: Array<F, D>) -> Self {
        Param::Materialized(value.into_dyn())
    }
}

impl<F: Real> From<Vec<F>> for Param<F> {
    fn from(value: Vec<F>) -> Self {
        Param::Materialized(Array::from_vec(value).into_dyn())
    }
}

impl<F: Real> From<&[F]> for Param<F> {
    fn from(value: &[F]) -> Self {
        Param::Materialized(Array::from_vec(value.to_vec()).into_dyn())
    }
}

impl<F: Real> From<Variable<F>> for Param<F> {
    fn from(value: Variable<F>) -> Self {
        Param::deferred(value)
    }
}

impl<F: Real> From<Computed<F>> for Param<F> {
    fn from(value: Computed<F>) -> Self {
        Param::deferred(value)
    }
}

/// Shared, mutable array. Clones are handles to the same storage.
///
/// A variable declares a static shape at creation: fully known by default,
/// or unknown via [`Variable::with_unknown_shape`]. Assignments must respect
/// the declared shape.
#[derive(Debug, Clone)]
pub struct Variable<F> {
    value: Arc<RwLock<ArrayD<F>>>,
    shape: TensorShape,
}

impl<F: Real> Variable<F> {
    /// Variable whose static shape is the initial value's shape.
    pub fn new<D: Dimension>(initial: Array<F, D>) -> Self {
        let initial = initial.into_dyn();
        let shape = TensorShape::from_dims(initial.shape());
        Variable { value: Arc::new(RwLock::new(initial)), shape }
    }

    /// Variable whose shape may change on assignment.
    pub fn with_unknown_shape<D: Dimension>(initial: Array<F, D>) -> Self {
        Variable { value: Arc::new(RwLock::new(initial.into_dyn())), shape: TensorShape::unknown() }
    }

    /// Variable with an explicitly declared (possibly partial) static shape.
    ///
    /// # Errors
    /// [`TensorError::ShapeMismatch`] if `initial` does not satisfy `shape`.
    pub fn with_static_shape<D: Dimension>(
        initial: Array<F, D>, shape: TensorShape,
    ) -> TensorResult<Self> {
        let initial = initial.into_dyn();
        check_assignable(&shape, initial.shape())?;
        Ok(Variable { value: Arc::new(RwLock::new(initial)), shape })
    }

    /// Replace the stored value.
    ///
    /// # Errors
    /// [`TensorError::ShapeMismatch`] if `value` does not satisfy the declared shape.
    pub fn assign<D: Dimension>(&self, value: Array<F, D>) -> TensorResult<()> {
        let value = value.into_dyn();
        check_assignable(&self.shape, value.shape())?;
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value;
        Ok(())
    }

    /// Snapshot of the current value.
    pub fn value(&self) -> ArrayD<F> {
        self.value.read().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl<F: Real> DeferredSource<F> for Variable<F> {
    fn evaluate(&self) -> TensorResult<ArrayD<F>> {
        Ok(self.value())
    }

    fn static_shape(&self) -> TensorShape {
        self.shape.clone()
    }
}

/// Value computed by a closure on each access, e.g. a transform of other state.
#[derive(Clone)]
pub struct Computed<F> {
    compute: Arc<dyn Fn() -> ArrayD<F> + Send + Sync>,
    shape: TensorShape,
}

impl<F: Real> Computed<F> {
    /// The closure's output is checked against `shape` on every evaluation.
    pub fn new<C>(shape: TensorShape, compute: C) -> Self
    where
        C: Fn() -> ArrayD<F> + Send + Sync + 'static,
    {
        Computed { compute: Arc::new(compute), shape }
    }
}

impl<F: Real> DeferredSource<F> for Computed<F> {
    fn evaluate(&self) -> TensorResult<ArrayD<F>> {
        let value = (self.compute)();
        check_assignable(&self.shape, value.shape())?;
        Ok(value)
    }

    fn static_shape(&self) -> TensorShape {
        self.shape.clone()
    }
}

impl<F> std::fmt::Debug for Computed<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Computed").field("shape", &self.shape.to_string()).finish()
    }
}

// ---- Helper Methods ----

fn check_assignable(shape: &TensorShape, actual: &[usize]) -> TensorResult<()> {
    if shape.is_compatible_with(actual) {
        Ok(())
    } else {
        Err(TensorError::ShapeMismatch { expected: shape.to_string(), actual: format_dims(actual) })
    }
}
