//! Logger subsystem.
//!
//! # Data Flow
//! ```text
//! start-up
//!     → settings.rs (hooks, timestamp format, trace field name)
//!     → global.rs (default Logger, set_* functions)
//!
//! Logger::info(&ctx, "msg", &labels![...])  or  qlog::info(...)
//!     → mask check (return early, nothing evaluated)
//!     → encode::line (trace id via accessor hook, clock hook)
//!     → output::commit (locked write)
//!     → fatal hook (Fatal only)
//! ```
//!
//! # Design Decisions
//! - A Logger is immutable; deriving copies the parent's pre-rendered
//!   label fragment and appends to it
//! - Hooks and the default Logger live in `ArcSwap` cells: reads are
//!   lock-free, writes are last-write-wins and meant for start-up only

pub mod global;
pub mod instance;
pub mod settings;

pub use global::{
    debug, default_logger, error, fatal, info, notice, replace_default, reset_settings, set_clock,
    set_fatal_hook, set_labels, set_output_format, set_output_mask, set_timestamp_format,
    set_trace_field_name, set_trace_id_accessor, set_trace_id_generator, set_writer, trace,
    warning,
};
pub use instance::Logger;
pub use settings::{Settings, SettingsError};
