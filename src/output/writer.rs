//! Serialized line commits.

use std::io;
use std::sync::{Mutex, PoisonError};

use crate::output::sink::Sink;

/// Held for the duration of every sink write in the process.
static WRITE_LOCK: Mutex<()> = Mutex::new(());

/// Append the line terminator and write `line` to `sink` in one call.
///
/// All callers, across all loggers and sinks, take the same lock, so two
/// lines never interleave. Errors from the sink are returned untouched.
pub fn commit(sink: &Sink, mut line: String) -> io::Result<()> {
    line.push('\n');

    let _guard = WRITE_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    sink.write_line(line.as_bytes())
}
