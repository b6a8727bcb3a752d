//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the mask names real severities and defined bits
//! - Check the timestamp format renders and the trace field is a usable key
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LogConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is applied

use crate::config::schema::{LogConfig, MaskConfig};
use crate::level::OutputMask;
use crate::logger::settings::Settings;

/// A single rejected field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("mask {0:?} is not a preset, severity list or valid bit pattern")]
    Mask(String),
    #[error("timestamp_format {0:?} is not a valid strftime format")]
    TimestampFormat(String),
    #[error("trace_field {0:?} must be non-empty without quotes, '=' or whitespace")]
    TraceField(String),
    #[error("label #{0} has an empty key")]
    EmptyLabelKey(usize),
}

/// Resolve the configured mask.
pub(crate) fn resolve_mask(mask: &MaskConfig) -> Result<OutputMask, ValidationError> {
    match mask {
        MaskConfig::Bits(bits) => {
            OutputMask::from_bits(*bits).ok_or_else(|| ValidationError::Mask(format!("{bits:#b}")))
        }
        MaskConfig::Named(name) => name
            .parse::<OutputMask>()
            .map_err(|_| ValidationError::Mask(name.clone())),
    }
}

/// Check `config`, collecting every problem.
pub fn validate_config(config: &LogConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = resolve_mask(&config.mask) {
        errors.push(e);
    }

    if Settings::check_timestamp_format(&config.timestamp_format).is_err() {
        errors.push(ValidationError::TimestampFormat(config.timestamp_format.clone()));
    }

    if Settings::check_trace_field(&config.trace_field).is_err() {
        errors.push(ValidationError::TraceField(config.trace_field.clone()));
    }

    for (i, label) in config.labels.iter().enumerate() {
        if label.key.is_empty() {
            errors.push(ValidationError::EmptyLabelKey(i));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{LabelConfig, LabelValue};

    #[test]
    fn test_default_is_valid() {
        assert!(validate_config(&LogConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_every_error() {
        let config = LogConfig {
            mask: MaskConfig::Named("chatty".into()),
            timestamp_format: String::new(),
            trace_field: "trace id".into(),
            labels: vec![LabelConfig {
                key: String::new(),
                value: LabelValue::Int(1),
            }],
            ..LogConfig::default()
        };

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::Mask("chatty".into()),
                ValidationError::TimestampFormat(String::new()),
                ValidationError::TraceField("trace id".into()),
                ValidationError::EmptyLabelKey(0),
            ]
        );
    }

    #[test]
    fn test_mask_resolution() {
        assert_eq!(resolve_mask(&MaskConfig::Bits(0b11)).unwrap(), OutputMask::FATAL | OutputMask::ERROR);
        assert!(resolve_mask(&MaskConfig::Bits(0x80)).is_err());
        assert_eq!(
            resolve_mask(&MaskConfig::Named("important|info".into())).unwrap(),
            OutputMask::DETAIL
        );
    }
}
