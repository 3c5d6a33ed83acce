//! random — seed streams and array samplers used by reparameterized sampling.
//!
//! Purpose
//! -------
//! Supply the random-variate source distributions consume: a stateful
//! [`SeedStream`] that yields deterministic sub-seeds, and samplers that turn
//! one sub-seed into an array of standard-normal or Rademacher draws.
//!
//! Conventions
//! -----------
//! - Draw order matters: each sampler call should consume exactly one
//!   sub-seed, requested in a fixed, documented order by the caller.
pub mod samplers;
pub mod seed_stream;

pub use self::samplers::{rademacher, standard_normal};
pub use self::seed_stream::SeedStream;
