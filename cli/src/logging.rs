//! # Structured Logging
//!
//! Initializes the `tracing` subscriber with a pretty or JSON formatter and
//! `RUST_LOG`-style filtering.
//!
//! All log output goes to stderr. Stdout carries only the JSON result of
//! the command, so `sigil sign ... | jq .signature` works.

use clap::ValueEnum;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable, colored output.
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Build the filter: `RUST_LOG` when set, otherwise `default_level`.
///
/// An unparsable `default_level` falls back to `warn`.
pub fn build_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Initialize the global tracing subscriber.
///
/// Call once, early in `main()`. A second call leaves the first subscriber
/// in place.
///
/// # Environment
///
/// `RUST_LOG` overrides `default_level`, e.g.:
///
/// ```text
/// RUST_LOG=sigil_protocol=trace,sigil=debug
/// ```
pub fn init_logging(default_level: &str, format: LogFormat) {
    let env_filter = build_filter(default_level);
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match format {
        LogFormat::Pretty => registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(?format, "logging initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_default_level_falls_back() {
        // Must not panic.
        let _ = build_filter("this is [not a filter");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging("warn", LogFormat::Json);
        init_logging("warn", LogFormat::Pretty);
    }
}
