//! Configuration loading and application.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Arc;

use crate::config::schema::{LogConfig, SinkConfig, TraceIdScheme};
use crate::config::validation::{resolve_mask, validate_config, ValidationError};
use crate::correlation::{random_trace_id, uuid_trace_id};
use crate::logger::settings::{self, TraceIdGenerator};
use crate::logger::{global, Logger};
use crate::output::Sink;

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<LogConfig, ConfigError> {
    let config: LogConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<LogConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config = parse_config(&content)?;
    tracing::debug!(path = %path.display(), "Logging configuration loaded");
    Ok(config)
}

impl SinkConfig {
    /// Open the destination.
    pub fn open(&self) -> std::io::Result<Sink> {
        match self {
            SinkConfig::Stderr => Ok(Sink::stderr()),
            SinkConfig::Stdout => Ok(Sink::stdout()),
            SinkConfig::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path)?;
                Ok(Sink::new(file))
            }
        }
    }
}

impl LogConfig {
    /// Build the Logger this configuration describes, without installing it.
    pub fn build_logger(&self) -> Result<Logger, ConfigError> {
        let mask = resolve_mask(&self.mask).map_err(|e| ConfigError::Validation(vec![e]))?;
        let sink = self.sink.open()?;
        Ok(Logger::new(mask, self.format, &self.label_values()).with_sink(sink))
    }

    /// Install this configuration as the process-wide settings and default
    /// Logger. Intended for start-up, before logging begins.
    pub fn apply(&self) -> Result<(), ConfigError> {
        validate_config(self).map_err(ConfigError::Validation)?;
        let logger = self.build_logger()?;

        let timestamp_format = self.timestamp_format.clone();
        let trace_field = self.trace_field.clone();
        let generator: TraceIdGenerator = match self.trace_ids {
            TraceIdScheme::Random => Arc::new(random_trace_id),
            TraceIdScheme::Uuid => Arc::new(uuid_trace_id),
        };
        settings::update(move |s| {
            s.timestamp_format = timestamp_format;
            s.trace_field = trace_field;
            s.trace_id_generator = generator;
        });

        tracing::info!(
            mask = %logger.mask(),
            format = %logger.format(),
            sink = ?self.sink,
            labels = self.labels.len(),
            "Logging configuration applied"
        );
        global::replace_default(logger);
        Ok(())
    }
}
