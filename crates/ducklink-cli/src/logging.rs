//! Diagnostic logging for the `ducklink` tool.
//!
//! Logs go to stderr so stdout carries only command output.  The filter is
//! taken from `RUST_LOG` when set, otherwise from the `--log-level` flag or the
//! config file, otherwise `info`.

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Picks the level directive: the flag if given, the configured one otherwise.
pub fn resolve_level(flag: Option<LogLevel>, configured: &str) -> String {
    match flag {
        Some(level) => level.as_str().to_string(),
        None => configured.to_string(),
    }
}

/// Builds the filter for `level`, falling back to `info` if it does not parse.
///
/// `RUST_LOG` is not consulted here; see [`init_logging`].
pub fn filter_for(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Installs the global subscriber.  Later calls are ignored.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter_for(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
