//! Process-wide structured logging for the dashboard.
//!
//! A sink and a clock are installed once at startup (browser console or
//! stderr, see `infrastructure::services`). Until then every record is
//! dropped and timestamps come from a counter, so library code and tests
//! never need a setup step.

use std::fmt;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::EnumString;

/// Severity, ordered from chattiest to most severe
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, EnumString, Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[display(fmt = "DEBUG")]
    Debug,
    #[default]
    #[display(fmt = " INFO")]
    Info,
    #[display(fmt = " WARN")]
    Warn,
    #[display(fmt = "ERROR")]
    Error,
}

/// Layer of the crate a record comes from, tagged with its source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Milliseconds from the installed [`Clock`]
    pub timestamp_ms: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

/// Destination for log records
pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Checked before the message is formatted
    fn enabled(&self, _level: LogLevel) -> bool {
        true
    }
}

/// Millisecond wall clock used to stamp records
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;
}

static LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static CLOCK: OnceLock<Box<dyn Clock>> = OnceLock::new();

/// Install the process-wide sink. Returns `false` if one was already set.
pub fn install_logger(logger: Box<dyn Logger>) -> bool {
    LOGGER.set(logger).is_ok()
}

/// Install the process-wide clock. Returns `false` if one was already set.
pub fn install_clock(clock: Box<dyn Clock>) -> bool {
    CLOCK.set(clock).is_ok()
}

pub fn now_ms() -> u64 {
    match CLOCK.get() {
        Some(clock) => clock.now_ms(),
        None => {
            static SEQUENCE: AtomicU64 = AtomicU64::new(0);
            SEQUENCE.fetch_add(1, Ordering::Relaxed)
        }
    }
}

/// Hand one record to the installed sink. Used by the `log_*!` macros.
pub fn log(level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    let Some(logger) = LOGGER.get() else { return };
    if !logger.enabled(level) {
        return;
    }
    logger.log(LogEntry { timestamp_ms: now_ms(), level, component, message: args.to_string() });
}

/// Debug records are compiled out of release builds.
#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        if cfg!(debug_assertions) {
            $crate::domain::logging::log(
                $crate::domain::logging::LogLevel::Debug,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log(
            $crate::domain::logging::LogLevel::Info,
            $component,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log(
            $crate::domain::logging::LogLevel::Warn,
            $component,
            format_args!($($arg)*),
        )
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::log(
            $crate::domain::logging::LogLevel::Error,
            $component,
            format_args!($($arg)*),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_and_level_render_fixed_width_tags() {
        assert_eq!(LogComponent::Application("SyncController").to_string(), "APP:SyncController");
        assert_eq!(LogLevel::Info.to_string(), " INFO");
        assert!(LogLevel::Warn > LogLevel::Debug);
    }

    #[test]
    fn level_parses_from_config_text() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("DEBUG".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert!("trace".parse::<LogLevel>().is_err());
        assert_eq!(serde_json::from_str::<LogLevel>("\"error\"").unwrap(), LogLevel::Error);
    }

    #[test]
    fn fallback_clock_never_goes_backwards() {
        let a = now_ms();
        let b = now_ms();
        assert!(b >= a);
    }
}
