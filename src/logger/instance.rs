//! The Logger type and its severity methods.

use std::error::Error;
use std::sync::Arc;

use crate::correlation::Context;
use crate::encode::line::{build_line, LineParts};
use crate::encode::{render_labels, OutputFormat, Value};
use crate::labels;
use crate::level::{OutputMask, Severity};
use crate::logger::settings;
use crate::output::{commit, Sink};

/// A logging configuration: verbosity mask, output format, pre-rendered
/// common labels and a sink.
///
/// Loggers are immutable. [`Logger::with_labels`] and friends return new
/// Loggers and leave the receiver untouched.
///
/// Labels are a flat sequence of keys and values, usually built with
/// [`labels!`](crate::labels). Values wrapped in [`lazy`](crate::lazy) are
/// only evaluated when the line is actually written:
///
/// ```
/// use qlog::{labels, lazy, Context, Logger, MemorySink, OutputFormat, OutputMask};
///
/// let memory = MemorySink::new();
/// let log = Logger::new(OutputMask::IMPORTANT, OutputFormat::Json, &labels!["app", "demo"])
///     .with_sink(memory.sink());
/// let ctx = qlog::context_from(&Context::background(), "");
///
/// log.debug(&ctx, "not written", &labels!["state", lazy(|| expensive())]);
/// log.notice(&ctx, "written", &labels!["port", 8080]);
/// assert_eq!(memory.lines().len(), 1);
/// # fn expensive() -> String { unreachable!() }
/// ```
///
/// A label sequence of odd length gets `"#missing#"` as its last value.
#[derive(Clone, Debug)]
pub struct Logger {
    mask: OutputMask,
    format: OutputFormat,
    common_labels: Arc<str>,
    sink: Sink,
}

impl Logger {
    /// Create a Logger writing to stderr with the given verbosity, format
    /// and labels included in every line.
    pub fn new(mask: OutputMask, format: OutputFormat, labels: &[Value<'_>]) -> Self {
        Self {
            mask,
            format,
            common_labels: render_labels(format, labels).into(),
            sink: Sink::stderr(),
        }
    }

    /// A Logger with this Logger's labels followed by `labels`.
    ///
    /// Use for a library or section of logic whose lines should carry
    /// identifying labels.
    pub fn with_labels(&self, labels: &[Value<'_>]) -> Logger {
        let mut common = String::with_capacity(self.common_labels.len() + labels.len() * 16);
        common.push_str(&self.common_labels);
        crate::encode::write_labels(&mut common, self.format, labels);

        Logger {
            common_labels: common.into(),
            sink: self.sink.clone(),
            ..*self
        }
    }

    /// A Logger writing to `sink` instead.
    pub fn with_sink(&self, sink: Sink) -> Logger {
        Logger {
            sink,
            common_labels: self.common_labels.clone(),
            ..*self
        }
    }

    /// A Logger with a different verbosity.
    pub fn with_mask(&self, mask: OutputMask) -> Logger {
        Logger {
            mask,
            common_labels: self.common_labels.clone(),
            sink: self.sink.clone(),
            ..*self
        }
    }

    pub fn mask(&self) -> OutputMask {
        self.mask
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn sink(&self) -> &Sink {
        &self.sink
    }

    /// The pre-rendered common label fragment.
    pub fn common_labels(&self) -> &str {
        &self.common_labels
    }

    /// True when lines of `severity` are written.
    #[inline]
    pub fn enabled(&self, severity: Severity) -> bool {
        self.mask.enables(severity)
    }

    /// Write a fatal line, then run the fatal hook (by default the process
    /// exits with status 1).
    pub fn fatal(&self, ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Fatal, message, err, labels);
    }

    /// Write an error line. Reserved for events that make a primary task
    /// fail, such as an http request or a queued task handler.
    pub fn error(&self, ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Error, message, err, labels);
    }

    /// Write a warning line. Reserved for events that make a task run
    /// sub-optimally without failing, such as a retried downstream call.
    pub fn warning(&self, ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Warning, message, err, labels);
    }

    /// Write a notice line, for expected but important events such as
    /// start-up or shut-down.
    pub fn notice(&self, ctx: &Context, message: &str, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Notice, message, None, labels);
    }

    /// Write an info line, for high level detail such as a completed request.
    pub fn info(&self, ctx: &Context, message: &str, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Info, message, None, labels);
    }

    /// Write a debug line with a trailing `trace=true` label, for IO detail
    /// such as the content of requests received or generated.
    pub fn trace(&self, ctx: &Context, message: &str, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Trace, message, None, labels);
    }

    /// Write a debug line, for low level detail such as config data or
    /// variable states.
    pub fn debug(&self, ctx: &Context, message: &str, labels: &[Value<'_>]) {
        self.log(ctx, Severity::Debug, message, None, labels);
    }

    /// Write a line of any severity.
    ///
    /// Returns immediately, without touching `labels`, when the mask does
    /// not enable `severity`.
    pub fn log(
        &self,
        ctx: &Context,
        severity: Severity,
        message: &str,
        err: Option<&dyn Error>,
        labels: &[Value<'_>],
    ) {
        if !self.enabled(severity) {
            return;
        }

        let settings = settings::current();
        let trace_label = labels!["trace", true];
        let forced: &[Value<'_>] = if severity == Severity::Trace { &trace_label } else { &[] };

        let trace_id = (settings.trace_id_accessor)(ctx);
        let line = build_line(
            self.format,
            &LineParts {
                trace_field: &settings.trace_field,
                trace_id: &trace_id,
                severity,
                timestamp: (settings.clock)(),
                timestamp_format: &settings.timestamp_format,
                error: err,
                common_labels: &self.common_labels,
                labels,
                forced_labels: forced,
                message,
            },
        );

        // The sink owns failure handling; a failed write is not retried.
        let _ = commit(&self.sink, line);

        if severity == Severity::Fatal {
            (settings.fatal_hook)();
        }
    }
}

impl Default for Logger {
    /// Everything except trace, JSON, stderr, no labels.
    fn default() -> Self {
        Logger::new(OutputMask::ALL, OutputFormat::Json, &[])
    }
}
