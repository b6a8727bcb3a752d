//! Forward `tracing` events through a qlog Logger.
//!
//! Levels map onto severities (ERROR→Error, WARN→Warning, INFO→Info,
//! DEBUG→Debug, TRACE→Trace). The `message` field becomes the line's
//! message; every other field becomes a label after a `target` label. The
//! trace id comes from the task's current context (see
//! [`correlation::scope`](crate::correlation::scope)).

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context as LayerContext, Layer};

use crate::correlation::current;
use crate::encode::Value;
use crate::level::Severity;
use crate::logger::{default_logger, Logger};

/// A `tracing_subscriber` layer writing events with a qlog Logger.
#[derive(Debug, Clone, Default)]
pub struct QlogLayer {
    logger: Option<Logger>,
}

impl QlogLayer {
    /// Write through the process-wide default Logger, as configured at the
    /// time of each event.
    pub fn new() -> Self {
        Self::default()
    }

    /// Write through `logger`.
    pub fn with_logger(logger: Logger) -> Self {
        Self {
            logger: Some(logger),
        }
    }
}

/// Map a `tracing` level onto a severity.
pub fn severity_for(level: &Level) -> Severity {
    match *level {
        Level::ERROR => Severity::Error,
        Level::WARN => Severity::Warning,
        Level::INFO => Severity::Info,
        Level::DEBUG => Severity::Debug,
        Level::TRACE => Severity::Trace,
    }
}

enum FieldValue {
    Str(String),
    Int(i64),
    Uint(u64),
    Bool(bool),
    Float(f64),
}

#[derive(Default)]
struct FieldCollector {
    message: String,
    fields: Vec<(&'static str, FieldValue)>,
}

impl Visit for FieldCollector {
    fn record_f64(&mut self, field: &Field, value: f64) {
        self.fields.push((field.name(), FieldValue::Float(value)));
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields.push((field.name(), FieldValue::Int(value)));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields.push((field.name(), FieldValue::Uint(value)));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields.push((field.name(), FieldValue::Bool(value)));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push((field.name(), FieldValue::Str(value.to_string())));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.fields.push((field.name(), FieldValue::Str(format!("{value:?}"))));
        }
    }
}

impl<S> Layer<S> for QlogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: LayerContext<'_, S>) {
        let metadata = event.metadata();
        let severity = severity_for(metadata.level());

        let default;
        let logger = match &self.logger {
            Some(logger) => logger,
            None => {
                default = default_logger();
                &*default
            }
        };
        if !logger.enabled(severity) {
            return;
        }

        let mut collector = FieldCollector::default();
        event.record(&mut collector);

        let mut labels = Vec::with_capacity(2 + collector.fields.len() * 2);
        labels.push(Value::from("target"));
        labels.push(Value::from(metadata.target()));
        for (name, value) in &collector.fields {
            labels.push(Value::from(*name));
            labels.push(match value {
                FieldValue::Str(s) => Value::from(s),
                FieldValue::Int(v) => Value::Int(*v),
                FieldValue::Uint(v) => Value::Uint(*v),
                FieldValue::Bool(v) => Value::Bool(*v),
                FieldValue::Float(v) => Value::F64(*v),
            });
        }

        logger.log(&current(), severity, &collector.message, None, &labels);
    }
}
