//! rust_probability — batched probability distributions with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the distributions to Python via the `_rust_probability` extension module.
//! When the `python-bindings` feature is enabled, this module defines the
//! Python-facing classes and submodules used by the `rust_probability`
//! package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`tensor`, `random`, `distributions`) as
//!   the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for the
//!   `_rust_probability` Python extension.
//! - Register the `distributions` submodule under `rust_probability` so that
//!   dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this file
//!   performs only FFI glue, dtype selection, and error mapping.
//! - Python inputs are converted to a single floating dtype chosen by
//!   [`tensor::common_dtype`]; untyped inputs (floats, lists) default to
//!   `float32`.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_rust_probability.<submodule>`.
//! - Errors from core Rust code are propagated as [`distributions::DistError`]
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Testing notes
//! -------------
//! - Core behavior is covered by unit tests in the inner modules and by
//!   `tests/integration_doublesided_maxwell.rs`.

pub mod distributions;
pub mod observability;
pub mod random;
pub mod tensor;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::ArrayD;

#[cfg(feature = "python-bindings")]
use numpy::IntoPyArray;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    distributions::{
        DistOptions, DistResult, Distribution, doublesided_maxwell::SAMPLE_SALT,
        DoublesidedMaxwell as MaxwellCore,
    },
    random::SeedStream,
    tensor::{DEFAULT_FLOAT_DTYPE, DType, Real, common_dtype},
    utils::{detect_dtype, extract_array},
};

#[cfg(feature = "python-bindings")]
enum MaxwellInner {
    F32(MaxwellCore<f32>),
    F64(MaxwellCore<f64>),
}

/// DoublesidedMaxwell — Python-facing wrapper for [`MaxwellCore`].
///
/// Purpose
/// -------
/// Expose the batched double-sided Maxwell distribution to Python, returning
/// NumPy arrays of the distribution's dtype.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `DoublesidedMaxwell(loc, scale, validate_args=False, allow_nan_stats=True, name=None)`:
/// - `loc`, `scale`: array-like
///   Broadcast-compatible location and scale. NumPy inputs fix the dtype;
///   plain floats and lists adapt to it.
///
/// Notes
/// -----
/// - `sample(n, seed=None)` draws from OS entropy when `seed` is `None`;
///   a fixed `seed` reproduces draws exactly.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "DoublesidedMaxwell", module = "rust_probability.distributions", unsendable)]
pub struct PyDoublesidedMaxwell {
    inner: MaxwellInner,
}

#[cfg(feature = "python-bindings")]
fn to_numpy<'py, F>(py: Python<'py>, out: DistResult<ArrayD<F>>) -> PyResult<PyObject>
where
    F: Real + numpy::Element,
{
    Ok(out?.into_pyarray(py).into_any().unbind())
}

#[cfg(feature = "python-bindings")]
fn build_core<'py, F>(
    py: Python<'py>, loc: &Bound<'py, PyAny>, scale: &Bound<'py, PyAny>, options: DistOptions,
) -> PyResult<MaxwellCore<F>>
where
    F: Real + numpy::Element,
{
    let loc = extract_array::<F>(py, loc)?;
    let scale = extract_array::<F>(py, scale)?;
    Ok(MaxwellCore::new(loc, scale, options)?)
}

#[cfg(feature = "python-bindings")]
fn sample_core<F: Real>(
    core: &MaxwellCore<F>, n: usize, seed: Option<u64>,
) -> DistResult<ArrayD<F>> {
    match seed {
        Some(seed) => core.sample_seeded(n, seed),
        None => core.sample(n, &mut SeedStream::from_entropy(SAMPLE_SALT)),
    }
}

/// Evaluate `$body` against whichever precision `$self` holds, as NumPy.
#[cfg(feature = "python-bindings")]
macro_rules! with_core {
    ($self:expr, $py:expr, |$core:ident, $x:ident <- $raw:ident| $body:expr) => {
        match &$self.inner {
            MaxwellInner::F32($core) => {
                let $x = extract_array::<f32>($py, $raw)?;
                to_numpy($py, $body)
            }
            MaxwellInner::F64($core) => {
                let $x = extract_array::<f64>($py, $raw)?;
                to_numpy($py, $body)
            }
        }
    };
    ($self:expr, $py:expr, |$core:ident| $body:expr) => {
        match &$self.inner {
            MaxwellInner::F32($core) => to_numpy($py, $body),
            MaxwellInner::F64($core) => to_numpy($py, $body),
        }
    };
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyDoublesidedMaxwell {
    #[new]
    #[pyo3(
        signature = (loc, scale, validate_args = false, allow_nan_stats = true, name = None),
        text_signature = "(loc, scale, /, validate_args=False, allow_nan_stats=True, name=None)"
    )]
    pub fn new<'py>(
        py: Python<'py>, loc: &Bound<'py, PyAny>, scale: &Bound<'py, PyAny>, validate_args: bool,
        allow_nan_stats: bool, name: Option<String>,
    ) -> PyResult<Self> {
        let dtype = common_dtype(&[detect_dtype(loc)?, detect_dtype(scale)?], DEFAULT_FLOAT_DTYPE)?;
        let mut options = DistOptions::new(validate_args, allow_nan_stats);
        if let Some(name) = name {
            options = options.with_name(name);
        }
        let inner = match dtype {
            DType::Float32 => MaxwellInner::F32(build_core(py, loc, scale, options)?),
            _ => MaxwellInner::F64(build_core(py, loc, scale, options)?),
        };
        Ok(PyDoublesidedMaxwell { inner })
    }

    /// Current value of `loc`.
    #[getter]
    pub fn loc<'py>(&self, py: Python<'py>) -> PyResult<PyObject> {
        with_core!(self, py, |core| Ok(core.loc().resolve()?.into_owned()))
    }

    /// Current value of `scale`.
    #[getter]
    pub fn scale<'py>(&self, py: Python<'py>) -> PyResult<PyObject> {
        with_core!(self, py, |core| Ok(core.scale().resolve()?.into_owned()))
    }

    pub fn log_prob<'py>(&self, py: Python<'py>, x: &Bound<'py, PyAny>) -> PyResult<PyObject> {
        with_core!(self, py, |core, x <- x| core.log_prob(&x))
    }

    pub fn prob<'py>(&self, py: Python<'py>, x: &Bound<'py, PyAny>) -> PyResult<PyObject> {
        with_core!(self, py, |core, x <- x| core.prob(&x))
    }

    #[pyo3(signature = (n, seed = None), text_signature = "(n, /, seed=None)")]
    pub fn sample<'py>(&self, py: Python<'py>, n: usize, seed: Option<u64>) -> PyResult<PyObject> {
        with_core!(self, py, |core| sample_core(core, n, seed))
    }

    pub fn mean<'py>(&self, py: Python<'py>) -> PyResult<PyObject> {
        with_core!(self, py, |core| core.mean())
    }

    pub fn stddev<'py>(&self, py: Python<'py>) -> PyResult<PyObject> {
        with_core!(self, py, |core| core.stddev())
    }

    pub fn variance<'py>(&self, py: Python<'py>) -> PyResult<PyObject> {
        with_core!(self, py, |core| core.variance())
    }

    /// Runtime batch shape as a tuple-like list.
    #[getter]
    pub fn batch_shape(&self) -> PyResult<Vec<usize>> {
        let shape = match &self.inner {
            MaxwellInner::F32(core) => core.batch_shape_at_runtime(),
            MaxwellInner::F64(core) => core.batch_shape_at_runtime(),
        }?;
        Ok(shape)
    }

    /// Always `[]`: draws are scalar.
    #[getter]
    pub fn event_shape(&self) -> Vec<usize> {
        match &self.inner {
            MaxwellInner::F32(core) => core.event_shape_at_runtime(),
            MaxwellInner::F64(core) => core.event_shape_at_runtime(),
        }
    }

    #[getter]
    pub fn dtype(&self) -> &'static str {
        match &self.inner {
            MaxwellInner::F32(core) => core.dtype().name(),
            MaxwellInner::F64(core) => core.dtype().name(),
        }
    }

    #[getter]
    pub fn name(&self) -> String {
        match &self.inner {
            MaxwellInner::F32(core) => core.name().to_string(),
            MaxwellInner::F64(core) => core.name().to_string(),
        }
    }
}

/// _rust_probability — PyO3 module initializer for the Python extension.
///
/// Creates the `distributions` submodule, attaches it to the parent module,
/// and registers it in `sys.modules` so it is importable via its dotted path.
///
/// Errors
/// ------
/// - `PyErr`
///   If creating the submodule or manipulating `sys.modules` fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_probability<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let distributions_mod = PyModule::new(_py, "distributions")?;
    distributions(_py, m, &distributions_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_probability.distributions", distributions_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn distributions<'py>(
    _py: Python, rust_probability: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<PyDoublesidedMaxwell>()?;
    rust_probability.add_submodule(m)?;
    Ok(())
}
