//! Process-wide logging settings and replaceable hooks.
//!
//! These are read on every written line and are expected to be set once
//! during start-up, before concurrent logging begins.

use std::fmt;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::correlation::{attached_trace_id, random_trace_id, Context};
use crate::encode::line::{is_valid_timestamp_format, DEFAULT_TIMESTAMP_FORMAT};

/// Runs after a Fatal line has been written.
pub type FatalHook = Arc<dyn Fn() + Send + Sync>;
/// Reads the trace id for a context.
pub type TraceIdAccessor = Arc<dyn Fn(&Context) -> String + Send + Sync>;
/// Produces a new trace id.
pub type TraceIdGenerator = Arc<dyn Fn() -> String + Send + Sync>;
/// Supplies line timestamps.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Default key of the trace id field.
pub const DEFAULT_TRACE_FIELD: &str = "trace";

#[derive(Clone)]
pub struct Settings {
    /// chrono strftime format for the `timestamp` field, rendered in UTC.
    pub timestamp_format: String,
    /// Key of the trace id field.
    pub trace_field: String,
    pub fatal_hook: FatalHook,
    pub trace_id_accessor: TraceIdAccessor,
    pub trace_id_generator: TraceIdGenerator,
    pub clock: Clock,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            trace_field: DEFAULT_TRACE_FIELD.to_string(),
            fatal_hook: Arc::new(exit_process),
            trace_id_accessor: Arc::new(attached_trace_id),
            trace_id_generator: Arc::new(random_trace_id),
            clock: Arc::new(Utc::now),
        }
    }
}

fn exit_process() {
    std::process::exit(1)
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("timestamp_format", &self.timestamp_format)
            .field("trace_field", &self.trace_field)
            .finish_non_exhaustive()
    }
}

/// Rejected settings values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid timestamp format: {0:?}")]
    TimestampFormat(String),
    #[error("invalid trace field name: {0:?}")]
    TraceField(String),
}

impl Settings {
    pub(crate) fn check_timestamp_format(format: &str) -> Result<(), SettingsError> {
        if format.is_empty() || !is_valid_timestamp_format(format) {
            return Err(SettingsError::TimestampFormat(format.to_string()));
        }
        Ok(())
    }

    pub(crate) fn check_trace_field(name: &str) -> Result<(), SettingsError> {
        if name.is_empty() || name.contains(|c: char| c == '"' || c == '=' || c.is_whitespace()) {
            return Err(SettingsError::TraceField(name.to_string()));
        }
        Ok(())
    }
}

fn cell() -> &'static ArcSwap<Settings> {
    static SETTINGS: OnceLock<ArcSwap<Settings>> = OnceLock::new();
    SETTINGS.get_or_init(|| ArcSwap::from_pointee(Settings::default()))
}

/// Snapshot of the current settings.
pub fn current() -> Arc<Settings> {
    cell().load_full()
}

/// Copy the current settings, apply `f`, and install the result.
pub(crate) fn update<F>(f: F)
where
    F: FnOnce(&mut Settings),
{
    let mut next = Settings::clone(&cell().load());
    f(&mut next);
    cell().store(Arc::new(next));
}

pub(crate) fn reset() {
    cell().store(Arc::new(Settings::default()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_name_checks() {
        assert!(Settings::check_trace_field("trace").is_ok());
        assert!(Settings::check_trace_field("request_id").is_ok());
        assert!(Settings::check_trace_field("").is_err());
        assert!(Settings::check_trace_field("a b").is_err());
        assert!(Settings::check_trace_field("a\"b").is_err());
    }

    #[test]
    fn test_timestamp_format_checks() {
        assert!(Settings::check_timestamp_format("%+").is_ok());
        assert!(Settings::check_timestamp_format("").is_err());
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.trace_field, "trace");
        assert_eq!(s.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!((s.trace_id_generator)().len(), crate::correlation::TRACE_ID_WIDTH);
    }
}
