//! distributions — batched probability distributions over `ndarray` arrays.
//!
//! Purpose
//! -------
//! Provide distribution objects whose parameters are arrays that broadcast
//! against each other, so one object represents a whole batch of
//! independent distributions. Each supports density evaluation,
//! reproducible sampling, and closed-form moments.
//!
//! Key behaviors
//! -------------
//! - [`traits::Distribution`] is the shared interface; [`DoublesidedMaxwell`]
//!   is the concrete location-scale family implemented here.
//! - [`options::DistOptions`] carries construction-time configuration
//!   (validation, NaN statistics, name, logger).
//! - [`validation`] holds the reusable parameter checks; [`errors`] the
//!   unified [`DistError`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Parameters are stored as [`Param`](crate::tensor::Param): materialized
//!   arrays are validated once at construction, deferred sources on every
//!   use when validation is enabled.
//!
//! Downstream usage
//! ----------------
//! - Rust callers import from this module directly; the Python extension
//!   wraps [`DoublesidedMaxwell`] for `f32` and `f64`.
pub mod doublesided_maxwell;
pub mod errors;
pub mod options;
pub mod traits;
pub mod validation;

pub use doublesided_maxwell::{DoublesidedMaxwell, LocScale, MaxwellParameters};
pub use errors::{DistError, DistResult};
pub use options::DistOptions;
pub use traits::{Distribution, ReparameterizationType};
