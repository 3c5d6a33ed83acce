//! observability — `slog` loggers for distribution diagnostics.
//!
//! Distributions carry a [`slog::Logger`] in their options. The default
//! discards everything, so logging costs nothing unless a caller installs a
//! real drain. With the `obs_slog` feature, [`term_logger`] builds an async
//! terminal logger suitable for interactive debugging.
use slog::{Logger, o};

/// Logger that drops every record.
pub fn discard_logger() -> Logger {
    Logger::root(slog::Discard, o!())
}

/// Async terminal logger (stderr, full format).
#[cfg(feature = "obs_slog")]
pub fn term_logger() -> Logger {
    use slog::Drain;

    let decorator = slog_term::TermDecorator::new().stderr().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();
    Logger::root(drain, o!("crate" => env!("CARGO_PKG_NAME")))
}
