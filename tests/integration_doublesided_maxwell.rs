//! Integration tests for the double-sided Maxwell distribution.
//!
//! Purpose
//! -------
//! - Validate the distribution end to end through the public crate surface:
//!   construction from the different parameter kinds, density evaluation,
//!   sampling, and moments.
//! - Check statistical properties on large samples rather than toy inputs.
//!
//! Coverage
//! --------
//! - `distributions::DoublesidedMaxwell`:
//!   - Density normalization and symmetry via numerical integration.
//!   - 10⁶-draw sample moments against the closed-form mean and stddev.
//!   - Histogram agreement between samples and the density.
//!   - Shape semantics for batched parameters, `sample_shaped`, and deferred
//!     parameters with partially known shapes.
//! - `random::SeedStream`:
//!   - Reproducibility and seed sensitivity of sampling.
//!
//! Exclusions
//! ----------
//! - Fine-grained checks of shapes, samplers, and validation helpers, which
//!   are covered by unit tests.
//! - Python bindings, which are tested from Python.
use approx::{assert_abs_diff_eq, assert_relative_eq};
use ndarray::{Array1, ArrayD, IxDyn, array};
use rust_probability::{
    distributions::{DistError, DistOptions, Distribution, DoublesidedMaxwell},
    random::SeedStream,
    tensor::{Computed, TensorShape, Variable},
};
use statrs::statistics::Statistics;

/// Purpose
/// -------
/// Integrate the density of `dist` over `[lo, hi]` with the trapezoid rule.
///
/// Invariants
/// ----------
/// - `dist` must have a scalar batch.
fn integrate_density(dist: &DoublesidedMaxwell<f64>, lo: f64, hi: f64, steps: usize) -> f64 {
    let grid = Array1::linspace(lo, hi, steps + 1).into_dyn();
    let density = dist.prob(&grid).unwrap();
    let h = (hi - lo) / steps as f64;
    let interior: f64 = density.iter().skip(1).take(steps - 1).sum();
    h * (interior + 0.5 * (density[[0]] + density[[steps]]))
}

#[test]
// Purpose
// -------
// The density integrates to one and puts half its mass on each side of loc.
//
// Given
// -----
// - loc = 1.5, scale = 0.7; trapezoid rule on [loc - 15σ, loc + 15σ].
//
// Expect
// ------
// - Total mass ≈ 1 (1e-6); mass left of loc ≈ 0.5 (1e-6).
fn density_is_normalized_and_symmetric() {
    // Arrange
    let dist = DoublesidedMaxwell::new(1.5_f64, 0.7_f64, DistOptions::validated()).unwrap();
    let (lo, hi) = (1.5 - 15.0 * 0.7, 1.5 + 15.0 * 0.7);

    // Act
    let total = integrate_density(&dist, lo, hi, 200_000);
    let left = integrate_density(&dist, lo, 1.5, 100_000);

    // Assert
    assert_abs_diff_eq!(total, 1.0, epsilon = 1e-6);
    assert_abs_diff_eq!(left, 0.5, epsilon = 1e-6);
}

#[test]
// Purpose
// -------
// log_prob is symmetric about loc across a batch.
//
// Given
// -----
// - loc [0, 3], scale [1, 2]; offsets d ∈ {0.1, 1, 4}.
//
// Expect
// ------
// - log_prob(loc + d) == log_prob(loc - d) to 1e-12.
fn log_prob_is_symmetric_about_loc() {
    // Arrange
    let dist = DoublesidedMaxwell::new(vec![0.0_f64, 3.0], vec![1.0, 2.0], DistOptions::default())
        .unwrap();

    for d in [0.1, 1.0, 4.0] {
        // Act
        let right = dist.log_prob(&array![d, 3.0 + d].into_dyn()).unwrap();
        let left = dist.log_prob(&array![-d, 3.0 - d].into_dyn()).unwrap();

        // Assert
        for (r, l) in right.iter().zip(left.iter()) {
            assert_relative_eq!(*r, *l, max_relative = 1e-12);
        }
    }
}

#[test]
// Purpose
// -------
// Large-sample moments of the standard distribution match the closed forms.
//
// Given
// -----
// - loc = 0, scale = 1; 10⁶ draws with seed 20240917.
//
// Expect
// ------
// - Sample mean ≈ 0 (0.01); sample stddev ≈ √3 (0.01).
fn standard_sample_moments_match_closed_form() {
    // Arrange
    let dist = DoublesidedMaxwell::<f64>::standard();

    // Act
    let draws = dist.sample_seeded(1_000_000, 20240917).unwrap();
    let values: Vec<f64> = draws.iter().copied().collect();

    // Assert
    assert_eq!(draws.shape(), &[1_000_000]);
    assert_abs_diff_eq!(values.iter().mean(), 0.0, epsilon = 0.01);
    assert_abs_diff_eq!(values.iter().std_dev(), 3.0_f64.sqrt(), epsilon = 0.01);
}

#[test]
// Purpose
// -------
// Batched sample moments track each member's loc and √3·scale.
//
// Given
// -----
// - loc [1, 2], scale [11, 22]; 200_000 draws.
//
// Expect
// ------
// - Per-column mean within 0.02·√3·scale of loc; per-column stddev
//   within 1% of √3·scale; mean()/stddev() give the closed forms.
fn batched_sample_moments_track_parameters() {
    // Arrange
    let dist = DoublesidedMaxwell::new(vec![1.0_f64, 2.0], vec![11.0, 22.0], DistOptions::validated())
        .unwrap();
    let sqrt3 = 3.0_f64.sqrt();

    // Act
    let draws = dist.sample(200_000, &mut SeedStream::new(7, "batched")).unwrap();
    let mean = dist.mean().unwrap();
    let stddev = dist.stddev().unwrap();

    // Assert
    assert_eq!(draws.shape(), &[200_000, 2]);
    for (j, (loc, scale)) in [(1.0, 11.0), (2.0, 22.0)].into_iter().enumerate() {
        let column: Vec<f64> = draws.index_axis(ndarray::Axis(1), j).iter().copied().collect();
        assert_abs_diff_eq!(column.iter().mean(), loc, epsilon = 0.02 * scale * sqrt3);
        assert_relative_eq!(column.iter().std_dev(), sqrt3 * scale, max_relative = 0.01);
        assert_eq!(mean[[j]], loc);
        assert_relative_eq!(stddev[[j]], sqrt3 * scale, max_relative = 1e-15);
    }
}

#[test]
// Purpose
// -------
// The empirical distribution of samples matches the density.
//
// Given
// -----
// - Standard distribution; 400_000 draws binned on [-5, 5] with width 0.5.
//
// Expect
// ------
// - Every bin frequency is within 0.005 of the integrated density mass.
fn sample_histogram_matches_density() {
    // Arrange
    let dist = DoublesidedMaxwell::<f64>::standard();
    let n = 400_000;
    let width = 0.5;

    // Act
    let draws = dist.sample_seeded(n, 99).unwrap();

    // Assert
    for bin in 0..20 {
        let lo = -5.0 + bin as f64 * width;
        let hi = lo + width;
        let observed = draws.iter().filter(|&&v| v >= lo && v < hi).count() as f64 / n as f64;
        let expected = integrate_density(&dist, lo, hi, 1_000);
        assert_abs_diff_eq!(observed, expected, epsilon = 0.005);
    }
}

#[test]
// Purpose
// -------
// Sampling is reproducible for equal seeds and sensitive to the seed.
//
// Given
// -----
// - loc [0, 1, 2], scale 2; seeds 1 and 2 through `sample_seeded` and
//   through fresh `SeedStream`s.
//
// Expect
// ------
// - Equal seeds give equal draws; different seeds give different draws.
fn sampling_is_reproducible_per_seed() {
    // Arrange
    let dist = DoublesidedMaxwell::new(vec![0.0_f64, 1.0, 2.0], 2.0_f64, DistOptions::default())
        .unwrap();

    // Act
    let a = dist.sample_seeded(50, 1).unwrap();
    let b = dist.sample_seeded(50, 1).unwrap();
    let c = dist.sample_seeded(50, 2).unwrap();
    let d = dist.sample(50, &mut SeedStream::new(1, "caller")).unwrap();
    let e = dist.sample(50, &mut SeedStream::new(1, "caller")).unwrap();

    // Assert
    assert_eq!(a.shape(), &[50, 3]);
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(d, e);
}

#[test]
// Purpose
// -------
// Draws from broadcast parameters follow `sample_shape + batch_shape`.
//
// Given
// -----
// - loc shape [2, 1], scale shape [3]; sample_shape [4, 5].
//
// Expect
// ------
// - batch shape [2, 3]; samples [4, 5, 2, 3]; log_prob of the samples is
//   finite everywhere with shape [4, 5, 2, 3].
fn broadcast_parameters_shape_samples_and_densities() {
    // Arrange
    let loc = array![[0.0_f64], [10.0]];
    let scale = array![1.0_f64, 2.0, 3.0];
    let dist = DoublesidedMaxwell::new(loc, scale, DistOptions::validated()).unwrap();

    // Act
    let draws = dist.sample_shaped(&[4, 5], &mut SeedStream::new(3, "shaped")).unwrap();
    let lp = dist.log_prob(&draws).unwrap();

    // Assert
    assert_eq!(dist.batch_shape().unwrap(), TensorShape::from_dims(&[2, 3]));
    assert_eq!(dist.batch_shape_at_runtime().unwrap(), vec![2, 3]);
    assert_eq!(draws.shape(), &[4, 5, 2, 3]);
    assert_eq!(lp.shape(), &[4, 5, 2, 3]);
    assert!(lp.iter().all(|v| v.is_finite()));
}

#[test]
// Purpose
// -------
// Deferred parameters are re-read on every use, including shape changes.
//
// Given
// -----
// - loc: unknown-shape variable, initially scalar 0.
// - scale: computed source with static shape [?] returning [1, 2].
//
// Expect
// ------
// - Static batch shape [?] before evaluation; runtime [2].
// - After assigning loc = [[5], [6], [7]], runtime batch [3, 2] and the
//   mean follows the new loc.
fn deferred_parameters_are_reread_on_every_use() {
    // Arrange
    let loc = Variable::with_unknown_shape(ndarray::arr0(0.0_f64));
    let scale = Computed::new(TensorShape::with_unknown_dims(vec![None]), || {
        ArrayD::from_shape_vec(IxDyn(&[2]), vec![1.0_f64, 2.0]).unwrap()
    });
    let dist = DoublesidedMaxwell::new(loc.clone(), scale, DistOptions::validated()).unwrap();

    // Act
    let static_before = dist.batch_shape().unwrap();
    let runtime_before = dist.batch_shape_at_runtime().unwrap();
    loc.assign(array![[5.0], [6.0], [7.0]]).unwrap();
    let runtime_after = dist.batch_shape_at_runtime().unwrap();
    let mean_after = dist.mean().unwrap();

    // Assert
    assert_eq!(static_before.rank(), None);
    assert_eq!(runtime_before, vec![2]);
    assert_eq!(runtime_after, vec![3, 2]);
    assert_eq!(mean_after, array![[5.0, 5.0], [6.0, 6.0], [7.0, 7.0]].into_dyn());
}

#[test]
// Purpose
// -------
// Construction-time shape and scale errors surface through the public API.
//
// Given
// -----
// - loc [2 elements] with scale [3 elements].
// - scale [1, 0] with validation.
//
// Expect
// ------
// - `IncompatibleParamShapes`; `InvalidScale` at index [1] with value 0.
fn construction_errors_surface_through_public_api() {
    let shapes = DoublesidedMaxwell::new(vec![0.0_f64, 0.0], vec![1.0, 1.0, 1.0], DistOptions::default());
    let scale = DoublesidedMaxwell::new(0.0_f64, vec![1.0, 0.0], DistOptions::validated());

    assert!(matches!(shapes, Err(DistError::IncompatibleParamShapes { .. })));
    assert_eq!(scale.unwrap_err(), DistError::InvalidScale { index: vec![1], value: 0.0 });
}
