//! Output formats and their delimiters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Line encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{ "key": value, ... }`
    #[default]
    Json,
    /// `key=value key=value`
    LogFmt,
}

impl OutputFormat {
    /// `true` selects JSON, `false` selects logfmt.
    pub const fn from_json_flag(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::LogFmt
        }
    }

    pub(crate) const fn delimiters(self) -> Delimiters {
        match self {
            OutputFormat::Json => Delimiters {
                open_line: "{ \"",
                close_line: " }",
                open_field: ", \"",
                close_field: "\": ",
            },
            OutputFormat::LogFmt => Delimiters {
                open_line: "",
                close_line: "",
                open_field: " ",
                close_field: "=",
            },
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::LogFmt => f.write_str("logfmt"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "logfmt" => Ok(OutputFormat::LogFmt),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Separator strings for one format.
///
/// A field is `open_field + key + close_field + value`. The first field of a
/// line is preceded by `open_line` instead of `open_field`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Delimiters {
    pub open_line: &'static str,
    pub close_line: &'static str,
    pub open_field: &'static str,
    pub close_field: &'static str,
}

/// Append `s` to `buf` so it can sit between double quotes on a single line.
pub(crate) fn push_escaped(buf: &mut String, s: &str) {
    if !s.contains(|c: char| c == '"' || c == '\\' || c.is_control()) {
        buf.push_str(s);
        return;
    }

    for c in s.chars() {
        match c {
            '"' => buf.push_str("\\\""),
            '\\' => buf.push_str("\\\\"),
            '\n' => buf.push_str("\\n"),
            '\r' => buf.push_str("\\r"),
            '\t' => buf.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write;
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            c => buf.push(c),
        }
    }
}

/// Append `s` wrapped in double quotes.
/// `fmt::Write` adapter that applies [`push_escaped`] to everything written
/// through it, so `Display` and `Debug` output stays on one line.
pub(crate) struct Escaped<'a>(pub &'a mut String);

impl std::fmt::Write for Escaped<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        push_escaped(self.0, s);
        Ok(())
    }
}

pub(crate) fn push_quoted(buf: &mut String, s: &str) {
    buf.push('"');
    push_escaped(buf, s);
    buf.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_quotes() {
        let mut buf = String::new();
        push_quoted(&mut buf, r#"say "hi""#);
        assert_eq!(buf, r#""say \"hi\"""#);
    }

    #[test]
    fn test_escape_keeps_line_single() {
        let mut buf = String::new();
        push_escaped(&mut buf, "a\nb\\c\u{1}");
        assert_eq!(buf, "a\\nb\\\\c\\u0001");
        assert!(!buf.contains('\n'));
    }

    #[test]
    fn test_escaped_writer() {
        use std::fmt::Write;

        let mut buf = String::new();
        let _ = write!(Escaped(&mut buf), "{}|{:?}", "x\ny", "q\"");
        assert_eq!(buf, r#"x\ny|\"q\\\"\""#);
    }

    #[test]
    fn test_format_parse() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("logfmt".parse::<OutputFormat>().unwrap(), OutputFormat::LogFmt);
        assert!("xml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::from_json_flag(false), OutputFormat::LogFmt);
    }
}
