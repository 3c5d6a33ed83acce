//! random::samplers — array-shaped draws keyed by a single sub-seed.
//!
//! Each sampler seeds a fresh `ChaCha8Rng` from the sub-seed it is given and
//! fills the requested shape in row-major order, so a draw depends only on
//! `(shape, sub_seed)`.
use ndarray::{ArrayD, IxDyn};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::tensor::Real;

/// Array of independent N(0, 1) variates.
pub fn standard_normal<F: Real>(shape: &[usize], seed: u64) -> ArrayD<F> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ArrayD::from_shape_simple_fn(IxDyn(shape), || F::standard_normal(&mut rng))
}

/// Array of independent Rademacher variates: `+1` or `-1` with equal probability.
pub fn rademacher<F: Real>(shape: &[usize], seed: u64) -> ArrayD<F> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    ArrayD::from_shape_simple_fn(IxDyn(shape), || {
        if rng.random::<bool>() { F::one() } else { -F::one() }
    })
}
