//! Log severities.

use std::fmt;
use std::str::FromStr;

use crate::level::mask::OutputMask;

/// Importance of a log line, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The process cannot continue. The termination hook runs after the write.
    Fatal,
    /// A primary task failed, such as an http request or a queued task handler.
    Error,
    /// A task ran sub-optimally but did not fail, e.g. a retried downstream call.
    Warning,
    /// Expected but important events such as start-up or shut-down.
    Notice,
    /// High level detail about internal activity.
    Info,
    /// IO detail, such as the content of requests received or generated.
    /// Rendered as `DEBUG` with a `trace=true` label.
    Trace,
    /// Low level detail such as config data or variable states.
    Debug,
}

impl Severity {
    /// Every severity, most severe first.
    pub const ALL: [Severity; 7] = [
        Severity::Fatal,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Trace,
        Severity::Debug,
    ];

    /// The mask bit that enables this severity.
    pub const fn flag(self) -> OutputMask {
        match self {
            Severity::Fatal => OutputMask::FATAL,
            Severity::Error => OutputMask::ERROR,
            Severity::Warning => OutputMask::WARNING,
            Severity::Notice => OutputMask::NOTICE,
            Severity::Info => OutputMask::INFO,
            Severity::Trace => OutputMask::TRACE,
            Severity::Debug => OutputMask::DEBUG,
        }
    }

    /// The value written to the `severity` field.
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Fatal => "FATAL",
            Severity::Error => "ERROR",
            Severity::Warning => "WARNING",
            Severity::Notice => "NOTICE",
            Severity::Info => "INFO",
            Severity::Trace | Severity::Debug => "DEBUG",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a severity name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fatal" => Ok(Severity::Fatal),
            "error" => Ok(Severity::Error),
            "warning" | "warn" => Ok(Severity::Warning),
            "notice" => Ok(Severity::Notice),
            "info" => Ok(Severity::Info),
            "trace" => Ok(Severity::Trace),
            "debug" => Ok(Severity::Debug),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}
