//! Logging setup for binaries built on connstr.
//!
//! The library only emits `tracing` events; nothing is printed unless a
//! subscriber is installed. With the `tracing-subscriber` feature enabled,
//! [`init`] installs one configured from the environment:
//!
//! - `CONNSTR_DEBUG=true|1|yes` - enable debug logging
//! - `CONNSTR_LOG_LEVEL=trace|debug|info|warn|error` - set the level
//! - `CONNSTR_LOG_FORMAT=json|pretty|compact` - output format (default: json)
//!
//! ```rust,no_run
//! connstr_parse::logging::init();
//! ```
//!
//! Parse events never carry values, only keywords, lengths and offsets, so
//! trace output is safe to collect from strings holding credentials.

use std::env;
use std::sync::Once;

static INIT: Once = Once::new();

const DEBUG_VAR: &str = "CONNSTR_DEBUG";
const LEVEL_VAR: &str = "CONNSTR_LOG_LEVEL";
const FORMAT_VAR: &str = "CONNSTR_LOG_FORMAT";

/// Check if `CONNSTR_DEBUG` asks for debug logging.
#[inline]
pub fn is_debug_enabled() -> bool {
    env::var(DEBUG_VAR).is_ok_and(|v| debug_flag(&v))
}

/// The configured log level. Defaults to `debug` when `CONNSTR_DEBUG` is
/// set, otherwise `warn`.
pub fn get_log_level() -> &'static str {
    resolve_level(env::var(LEVEL_VAR).ok().as_deref(), is_debug_enabled())
}

/// The configured output format.
pub fn get_log_format() -> &'static str {
    resolve_format(env::var(FORMAT_VAR).ok().as_deref())
}

/// Install the global subscriber from the environment.
///
/// Does nothing unless `CONNSTR_DEBUG` or `CONNSTR_LOG_LEVEL` is set. Only
/// the first call has an effect.
pub fn init() {
    if !is_debug_enabled() && env::var(LEVEL_VAR).is_err() {
        return;
    }
    init_with(get_log_level(), get_log_format());
}

/// Install the global subscriber with an explicit level and format,
/// ignoring the environment.
pub fn init_with(level: &str, format: &str) {
    let level = resolve_level(Some(level), false);
    let format = resolve_format(Some(format));

    INIT.call_once(|| {
        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let filter = EnvFilter::try_new(format!(
                "connstr={level},connstr_parse={level},connstr_cli={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));
            let registry = tracing_subscriber::registry().with(filter);

            // Stdout carries command output; logs go to stderr.
            match format {
                "json" => registry
                    .with(fmt::layer().json().with_writer(std::io::stderr))
                    .init(),
                "compact" => registry
                    .with(fmt::layer().compact().with_writer(std::io::stderr))
                    .init(),
                _ => registry
                    .with(fmt::layer().pretty().with_writer(std::io::stderr))
                    .init(),
            }

            tracing::info!(level = level, format = format, "connstr logging initialized");
        }

        #[cfg(not(feature = "tracing-subscriber"))]
        {
            let _ = (level, format);
        }
    });
}

fn debug_flag(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn resolve_level(level: Option<&str>, debug: bool) -> &'static str {
    match level.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ if debug => "debug",
        _ => "warn",
    }
}

fn resolve_format(format: Option<&str>) -> &'static str {
    match format.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}
