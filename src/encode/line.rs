//! Full log line assembly.
//!
//! Field order is fixed: trace, severity, timestamp, error (when present),
//! common labels, call-site labels, message.

use std::error::Error;
use std::fmt::Write;

use chrono::{DateTime, Utc};

use crate::encode::format::{push_escaped, push_quoted, Escaped, OutputFormat};
use crate::encode::labels::write_labels;
use crate::encode::value::Value;
use crate::level::Severity;

/// RFC 3339 in UTC with nanosecond precision.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9fZ";

/// Everything that goes into one line.
pub(crate) struct LineParts<'a, 'v> {
    pub trace_field: &'a str,
    pub trace_id: &'a str,
    pub severity: Severity,
    pub timestamp: DateTime<Utc>,
    pub timestamp_format: &'a str,
    pub error: Option<&'a dyn Error>,
    pub common_labels: &'a str,
    pub labels: &'a [Value<'v>],
    /// Written after `labels` as a separate sequence, so an odd-length
    /// `labels` cannot shift its pairs.
    pub forced_labels: &'a [Value<'v>],
    pub message: &'a str,
}

/// Render a complete line without the trailing terminator.
pub(crate) fn build_line(format: OutputFormat, parts: &LineParts<'_, '_>) -> String {
    let d = format.delimiters();
    let mut buf = String::with_capacity(256 + parts.common_labels.len() + parts.message.len());

    buf.push_str(d.open_line);
    push_escaped(&mut buf, parts.trace_field);
    buf.push_str(d.close_field);
    push_quoted(&mut buf, parts.trace_id);

    buf.push_str(d.open_field);
    buf.push_str("severity");
    buf.push_str(d.close_field);
    push_quoted(&mut buf, parts.severity.as_str());

    buf.push_str(d.open_field);
    buf.push_str("timestamp");
    buf.push_str(d.close_field);
    buf.push('"');
    write_timestamp(&mut buf, parts.timestamp, parts.timestamp_format);
    buf.push('"');

    if let Some(err) = parts.error {
        buf.push_str(d.open_field);
        buf.push_str("error");
        buf.push_str(d.close_field);
        push_quoted(&mut buf, &err.to_string());
    }

    buf.push_str(parts.common_labels);
    write_labels(&mut buf, format, parts.labels);
    write_labels(&mut buf, format, parts.forced_labels);

    buf.push_str(d.open_field);
    buf.push_str("message");
    buf.push_str(d.close_field);
    push_quoted(&mut buf, parts.message);
    buf.push_str(d.close_line);

    buf
}

/// Literal text in a custom format is escaped like any quoted field.
fn write_timestamp(buf: &mut String, timestamp: DateTime<Utc>, format: &str) {
    let start = buf.len();
    if write!(Escaped(buf), "{}", timestamp.format(format)).is_err() {
        buf.truncate(start);
        let _ = write!(buf, "{}", timestamp.format(DEFAULT_TIMESTAMP_FORMAT));
    }
}

/// True when chrono can render `format` without error.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    use chrono::format::{Item, StrftimeItems};

    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}
