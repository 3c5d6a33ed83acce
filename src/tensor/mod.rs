//! tensor — the narrow array layer distributions are written against.
//!
//! Purpose
//! -------
//! Adapt `ndarray`'s dynamic-rank arrays to what batched distributions need:
//! static and runtime shape inference with trailing-axis broadcasting,
//! dtype promotion, parameters that may be fixed or deferred, and a handful
//! of broadcasting elementwise kernels.
//!
//! Key behaviors
//! -------------
//! - [`shape`]: [`TensorShape`] (possibly partially known) and the static /
//!   dynamic broadcasting rules.
//! - [`dtype`]: the [`Real`] element trait (`f32`, `f64`) and
//!   [`common_dtype`] for runtime-typed inputs.
//! - [`param`]: [`Param`] = materialized array or deferred source
//!   ([`Variable`], [`Computed`]).
//! - [`ops`]: broadcasting kernels that report shape conflicts as errors.
//!
//! Conventions
//! -----------
//! - Arrays are `ndarray::ArrayD<F>` in row-major order.
//! - No logging or I/O happens here; failures are [`TensorError`] values.
pub mod dtype;
pub mod errors;
pub mod ops;
pub mod param;
pub mod shape;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::dtype::{DEFAULT_FLOAT_DTYPE, DType, Real, common_dtype};
pub use self::errors::{TensorError, TensorResult};
pub use self::param::{Computed, DeferredSource, Param, Variable};
pub use self::shape::{TensorShape, broadcast_dynamic_shape, broadcast_static_shape};
