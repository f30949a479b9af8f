//! # logmigrate
//!
//! Batch migration of legacy `LOG.<level>(...)` call-sites into tagged,
//! structured log calls.
//!
//! The input is an indentation-encoded export of call-sites. Each line's
//! leading whitespace decides what it holds:
//!
//! | Depth | Field |
//! |---|---|
//! | 0, 4, 8 | markers (ignored) |
//! | 12 | package token, resolved to a directory of the source tree |
//! | 16 | namespace (dotted package or absolute path) |
//! | 20 | source file name |
//! | 28 | log call, paired with the `(line: column) text` annotation before it |
//!
//! Every call-site becomes a [`LogCallRecord`](core::LogCallRecord) holding the
//! file path, position, original call and a replacement of the form
//! `LOG.<MESSAGE>(<ARGUMENT>).tag("<module>").<level>();`.
//! Records go to a [`RecordSink`](core::RecordSink); source files are never
//! modified by this crate.

pub mod config;
pub mod core;
pub mod error;
pub mod formatters;

pub use config::MigrationConfig;
pub use error::{MigrationError, Result};

/// Install the global tracing subscriber. `RUST_LOG` takes precedence over the
/// default `logmigrate=info` (or `debug` when `verbose`).
pub fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "logmigrate=debug"
    } else {
        "logmigrate=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
