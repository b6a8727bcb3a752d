//! Label sequence rendering.

use crate::encode::format::{push_quoted, OutputFormat};
use crate::encode::value::Value;

/// Value paired with a trailing key that has no value of its own.
pub const MISSING: &str = "#missing#";

/// Append every key/value pair of `labels` to `buf` as fields of `format`.
///
/// Pairs are written in order and never deduplicated. An odd-length
/// sequence gets [`MISSING`] as the value of its last key.
pub fn write_labels(buf: &mut String, format: OutputFormat, labels: &[Value<'_>]) {
    let delimiters = format.delimiters();

    for pair in labels.chunks(2) {
        buf.push_str(delimiters.open_field);
        pair[0].write_key(buf);
        buf.push_str(delimiters.close_field);

        match pair.get(1) {
            Some(value) => value.write_value(buf),
            None => push_quoted(buf, MISSING),
        }
    }
}

/// Render `labels` into a standalone fragment, as stored by a `Logger`.
pub fn render_labels(format: OutputFormat, labels: &[Value<'_>]) -> String {
    let mut buf = String::with_capacity(labels.len() * 16);
    write_labels(&mut buf, format, labels);
    buf
}
