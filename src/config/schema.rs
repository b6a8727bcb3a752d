//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::encode::line::DEFAULT_TIMESTAMP_FORMAT;
use crate::encode::{OutputFormat, Value};
use crate::logger::settings::DEFAULT_TRACE_FIELD;

/// Root logging configuration.
///
/// ```toml
/// mask = "detail"
/// format = "logfmt"
/// sink = "stdout"
/// trace_ids = "uuid"
///
/// [[labels]]
/// key = "service"
/// value = "billing"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LogConfig {
    /// Which severities are written.
    pub mask: MaskConfig,

    /// Line encoding.
    pub format: OutputFormat,

    /// Where lines go.
    pub sink: SinkConfig,

    /// Labels included in every line of the default logger, in order.
    pub labels: Vec<LabelConfig>,

    /// chrono strftime format of the timestamp field (UTC).
    pub timestamp_format: String,

    /// Key of the trace id field.
    pub trace_field: String,

    /// How fresh trace ids are generated.
    pub trace_ids: TraceIdScheme,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mask: MaskConfig::Named("all".to_string()),
            format: OutputFormat::Json,
            sink: SinkConfig::Stderr,
            labels: Vec::new(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            trace_field: DEFAULT_TRACE_FIELD.to_string(),
            trace_ids: TraceIdScheme::Random,
        }
    }
}

/// A mask given as raw bits or as text (`"detail"`, `"error|warning"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum MaskConfig {
    Bits(u8),
    Named(String),
}

/// Output destination.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkConfig {
    Stderr,
    Stdout,
    /// Opened for append; created when missing.
    File(PathBuf),
}

/// Trace id generator selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceIdScheme {
    /// 19 characters: random decimal digits padded with `X`.
    #[default]
    Random,
    /// 32 hex characters.
    Uuid,
}

/// A single common label.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LabelConfig {
    pub key: String,
    pub value: LabelValue,
}

/// Label values expressible in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum LabelValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl LabelValue {
    pub fn as_value(&self) -> Value<'_> {
        match self {
            LabelValue::Bool(v) => Value::Bool(*v),
            LabelValue::Int(v) => Value::Int(*v),
            LabelValue::Float(v) => Value::F64(*v),
            LabelValue::Text(v) => Value::from(v),
        }
    }
}

impl LogConfig {
    /// The configured labels as a flat key/value sequence.
    pub fn label_values(&self) -> Vec<Value<'_>> {
        self.labels
            .iter()
            .flat_map(|label| [Value::from(&label.key), label.value.as_value()])
            .collect()
    }
}
