//! Structured logging with request tracing.
//!
//! Each call turns a severity, a message, an optional error and a sequence
//! of key/value labels into one JSON or logfmt line, gated by a verbosity
//! mask, tagged with the request's trace id and written atomically.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller ──▶ Logger::<severity>(&ctx, msg, [err], &labels![..])
//!                 │
//!                 ├─ level        mask & bit == 0 → return (no label evaluated)
//!                 ├─ correlation  trace id from ctx (accessor hook)
//!                 ├─ encode       trace, severity, timestamp, error,
//!                 │               common labels, labels, message
//!                 └─ output       one locked write_all to the sink
//!
//!   start-up ──▶ config (TOML) / set_* ──▶ logger::settings + default Logger
//!   tracing  ──▶ bridge::QlogLayer ──▶ Logger
//! ```
//!
//! # Example
//!
//! ```
//! use qlog::{labels, lazy, Context, Logger, MemorySink, OutputFormat, OutputMask};
//!
//! let memory = MemorySink::new();
//! let log = Logger::new(OutputMask::DETAIL, OutputFormat::LogFmt, &labels!["service", "billing"])
//!     .with_sink(memory.sink());
//!
//! let ctx = qlog::context_from(&Context::background(), "");
//! log.info(&ctx, "invoice sent", &labels!["amount", 12.5, "lines", lazy(|| 3u32)]);
//!
//! let line = memory.contents();
//! assert!(line.contains(r#" service="billing" amount=12.50 lines=3 message="invoice sent""#));
//! ```
//!
//! Forwarding `tracing` events:
//!
//! ```no_run
//! use tracing_subscriber::layer::SubscriberExt;
//! use tracing_subscriber::util::SubscriberInitExt;
//!
//! tracing_subscriber::registry()
//!     .with(tracing_subscriber::EnvFilter::new("info"))
//!     .with(qlog::bridge::QlogLayer::new())
//!     .init();
//! ```

// Core subsystems
pub mod correlation;
pub mod encode;
pub mod level;
pub mod logger;
pub mod output;

// Start-up and integration
pub mod bridge;
pub mod config;

pub use config::{load_config, parse_config, ConfigError, LogConfig};
pub use correlation::{context_from, scope, trace_id, Context};
pub use encode::{debug as debug_value, display, lazy, OutputFormat, Value};
pub use level::{OutputMask, Severity};
pub use logger::{
    debug, default_logger, error, fatal, info, notice, replace_default, reset_settings, set_clock,
    set_fatal_hook, set_labels, set_output_format, set_output_mask, set_timestamp_format,
    set_trace_field_name, set_trace_id_accessor, set_trace_id_generator, set_writer, trace,
    warning, Logger, SettingsError,
};
pub use output::{MemorySink, Sink};
