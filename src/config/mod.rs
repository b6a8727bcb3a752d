//! Start-up configuration subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LogConfig::apply()
//!         → settings (timestamp format, trace field, trace id scheme)
//!         → default Logger (mask, format, labels, sink)
//! ```
//!
//! # Design Decisions
//! - Applied once at start-up; there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks and
//!   reports every problem at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LabelConfig, LabelValue, LogConfig, MaskConfig, SinkConfig, TraceIdScheme};
pub use validation::{validate_config, ValidationError};
