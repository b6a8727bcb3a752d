//! Shared utilities for integration tests.

use std::sync::{Mutex, MutexGuard, PoisonError};

use qlog::{Logger, MemorySink, OutputFormat, OutputMask, Value};

static SERIAL: Mutex<()> = Mutex::new(());

/// Serialize tests that change process-wide settings or the default logger,
/// and start each one from the defaults.
#[allow(dead_code)]
pub fn serial() -> MutexGuard<'static, ()> {
    let guard = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
    qlog::reset_settings();
    qlog::replace_default(Logger::default());
    guard
}

/// A logger writing into a fresh in-memory buffer.
#[allow(dead_code)]
pub fn capture(mask: OutputMask, format: OutputFormat, labels: &[Value<'_>]) -> (Logger, MemorySink) {
    let memory = MemorySink::new();
    let logger = Logger::new(mask, format, labels).with_sink(memory.sink());
    (logger, memory)
}

/// Parse one JSON line, panicking with the line on failure.
#[allow(dead_code)]
pub fn parse_json(line: &str) -> serde_json::Value {
    serde_json::from_str(line).unwrap_or_else(|e| panic!("invalid JSON line {line:?}: {e}"))
}

/// The raw text after `key=` in a logfmt line, up to the next space.
#[allow(dead_code)]
pub fn logfmt_field<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let needle = format!(" {key}=");
    let start = line.find(&needle)? + needle.len();
    let rest = &line[start..];
    Some(rest.split(' ').next().unwrap_or(rest))
}
