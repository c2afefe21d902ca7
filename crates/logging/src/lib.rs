#![warn(missing_docs)]

//! Shared logging helpers, CLI argument definitions, and tracing utilities for the shellcore workspace.
//!
//! - [`fmt`]: Render tracing events to logfmt strings
//! - [`capture`]: Record rendered events in memory for inspection in tests
//! - CLI argument parsing for log level configuration

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

pub mod capture;
pub mod fmt;

/// Logging controls for CLI apps.
#[derive(Debug, Clone, Default, Args)]
pub struct LogArgs {
    /// Set global log level to trace (our crates only)
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (our crates only)
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for our crates (error|warn|info|debug|trace)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive (overrides other flags)
    /// e.g. "config=debug,layout=trace"
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl LogArgs {
    /// The filter spec these arguments select.
    pub fn spec(&self) -> String {
        compute_spec(
            self.trace,
            self.debug,
            self.log_level.as_deref(),
            self.log_filter.as_deref(),
        )
    }

    /// An `EnvFilter` built from [`Self::spec`].
    pub fn env_filter(&self) -> EnvFilter {
        env_filter_from_spec(&self.spec())
    }
}

/// List of crate targets that constitute "our" logs.
pub fn our_crates() -> &'static [&'static str] {
    &[
        // Apps
        "shellctl",
        // Core crates
        "store",
        "config",
        "layout",
        "session",
        // Utilities
        "logging",
    ]
}

/// Build a filter directive string that sets the same `level` for all of our crates.
pub fn level_spec_for(level: &str) -> String {
    let lvl = level.to_ascii_lowercase();
    our_crates()
        .iter()
        .map(|t| format!("{}={}", t, lvl))
        .collect::<Vec<_>>()
        .join(",")
}

/// Compute the final filter spec string with precedence:
/// - `log_filter`
/// - `trace`/`debug`/`log_level` (crate-scoped)
/// - `RUST_LOG` env
/// - default to crate-scoped `info`
pub fn compute_spec(
    trace: bool,
    debug: bool,
    log_level: Option<&str>,
    log_filter: Option<&str>,
) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    env::var("RUST_LOG").unwrap_or_else(|_| level_spec_for("info"))
}

/// Create an `EnvFilter` from a spec string.
pub fn env_filter_from_spec(spec: &str) -> EnvFilter {
    EnvFilter::new(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_beats_level_flags() {
        assert_eq!(
            compute_spec(false, false, Some("warn"), Some("store=trace")),
            "store=trace"
        );
    }

    #[test]
    fn level_scopes_to_our_crates() {
        let spec = compute_spec(false, true, None, None);
        for krate in our_crates() {
            assert!(spec.contains(&format!("{krate}=debug")));
        }
        assert_eq!(level_spec_for("WARN"), level_spec_for("warn"));
    }

    #[test]
    fn args_build_spec() {
        let args = LogArgs {
            trace: true,
            ..LogArgs::default()
        };
        assert!(args.spec().starts_with("shellctl=trace"));
    }
}
