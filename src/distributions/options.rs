//! distributions::options — construction-time configuration for distributions.
//!
//! Purpose
//! -------
//! Collect the knobs every distribution accepts at construction in one
//! plain data carrier: argument validation, NaN reporting for undefined
//! statistics, a diagnostic name, and the logger used for diagnostics.
//!
//! Key behaviors
//! -------------
//! - [`DistOptions::default`] is the fast, unchecked configuration:
//!   `validate_args = false`, `allow_nan_stats = true`, a discard logger.
//! - Convenience setters ([`DistOptions::validated`],
//!   [`DistOptions::with_name`], [`DistOptions::with_logger`]) adjust single
//!   fields without spelling out the rest.
//!
//! Invariants & assumptions
//! ------------------------
//! - Options are fixed once a distribution is built; changing them means
//!   building a new distribution.
//! - `validate_args` selects between two legitimate modes: checked (errors
//!   on invalid parameters) and unchecked (invalid parameters silently yield
//!   `NaN`/`-∞`).
//!
//! Conventions
//! -----------
//! - This module never validates anything itself; it only records intent.
use slog::Logger;

use crate::observability::discard_logger;

/// Construction-time options shared by all distributions.
///
/// Fields
/// ------
/// - `validate_args`: `bool`
///   When `true`, parameters are checked (e.g. `scale > 0`) when consumed.
///   When `false`, invalid inputs may silently render incorrect outputs.
/// - `allow_nan_stats`: `bool`
///   When `true`, undefined statistics are reported as `NaN`; when `false`,
///   they raise [`DistError::UndefinedStatistic`](crate::distributions::errors::DistError::UndefinedStatistic).
/// - `name`: `Option<String>`
///   Diagnostic label; `None` lets the distribution use its own default.
/// - `logger`: [`Logger`]
///   Destination for construction, validation, and sampling diagnostics.
#[derive(Debug, Clone)]
pub struct DistOptions {
    pub validate_args: bool,
    pub allow_nan_stats: bool,
    pub name: Option<String>,
    pub logger: Logger,
}

impl DistOptions {
    /// Options with explicit flags, default name, and a discard logger.
    pub fn new(validate_args: bool, allow_nan_stats: bool) -> DistOptions {
        DistOptions { validate_args, allow_nan_stats, name: None, logger: discard_logger() }
    }

    /// Default options with argument validation switched on.
    pub fn validated() -> DistOptions {
        DistOptions { validate_args: true, ..DistOptions::default() }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> DistOptions {
        self.name = Some(name.into());
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> DistOptions {
        self.logger = logger;
        self
    }

    pub fn with_allow_nan_stats(mut self, allow_nan_stats: bool) -> DistOptions {
        self.allow_nan_stats = allow_nan_stats;
        self
    }
}

impl Default for DistOptions {
    fn default() -> Self {
        DistOptions::new(false, true)
    }
}
