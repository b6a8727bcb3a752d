//! The process-wide default Logger and start-up configuration functions.
//!
//! The `set_*` functions are intended for start-up. Each one builds a new
//! configuration and swaps it in, so a concurrent reader sees either the old
//! or the new value, but calls racing each other are last-write-wins.

use std::error::Error;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use chrono::{DateTime, Utc};

use crate::correlation::Context;
use crate::encode::{OutputFormat, Value};
use crate::level::OutputMask;
use crate::logger::instance::Logger;
use crate::logger::settings::{self, Settings, SettingsError};
use crate::output::Sink;

fn cell() -> &'static ArcSwap<Logger> {
    static DEFAULT: OnceLock<ArcSwap<Logger>> = OnceLock::new();
    DEFAULT.get_or_init(|| ArcSwap::from_pointee(Logger::default()))
}

/// The current default Logger.
pub fn default_logger() -> Arc<Logger> {
    cell().load_full()
}

/// Install `logger` as the default.
pub fn replace_default(logger: Logger) {
    cell().store(Arc::new(logger));
}

/// Set the sink of the default Logger. Labels are kept.
pub fn set_writer(sink: Sink) {
    let current = cell().load();
    replace_default(current.with_sink(sink));
}

/// Set the verbosity of the default Logger. Labels are kept.
pub fn set_output_mask(mask: OutputMask) {
    let current = cell().load();
    replace_default(current.with_mask(mask));
}

/// Set the output format of the default Logger.
///
/// Labels set earlier were rendered for the old format and are discarded;
/// call [`set_labels`] afterwards.
pub fn set_output_format(format: OutputFormat) {
    let current = cell().load();
    let logger = Logger::new(current.mask(), format, &[]).with_sink(current.sink().clone());
    replace_default(logger);
}

/// Replace the labels included in every line of the default Logger.
pub fn set_labels(labels: &[Value<'_>]) {
    let current = cell().load();
    let logger =
        Logger::new(current.mask(), current.format(), labels).with_sink(current.sink().clone());
    replace_default(logger);
}

/// Set the chrono strftime format of the `timestamp` field.
pub fn set_timestamp_format(format: &str) -> Result<(), SettingsError> {
    Settings::check_timestamp_format(format)?;
    settings::update(|s| s.timestamp_format = format.to_string());
    Ok(())
}

/// Set the key of the trace id field, e.g. to match existing tooling.
pub fn set_trace_field_name(name: &str) -> Result<(), SettingsError> {
    Settings::check_trace_field(name)?;
    settings::update(|s| s.trace_field = name.to_string());
    Ok(())
}

/// Replace the action run after a Fatal line is written.
pub fn set_fatal_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    settings::update(|s| s.fatal_hook = Arc::new(hook));
}

/// Replace how a context's trace id is read, e.g. to reuse an id written by
/// other tooling.
pub fn set_trace_id_accessor<F>(accessor: F)
where
    F: Fn(&Context) -> String + Send + Sync + 'static,
{
    settings::update(|s| s.trace_id_accessor = Arc::new(accessor));
}

/// Replace how fresh trace ids are generated.
pub fn set_trace_id_generator<F>(generator: F)
where
    F: Fn() -> String + Send + Sync + 'static,
{
    settings::update(|s| s.trace_id_generator = Arc::new(generator));
}

/// Replace the timestamp source.
pub fn set_clock<F>(clock: F)
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    settings::update(|s| s.clock = Arc::new(clock));
}

/// Restore every setting and hook to its default. The default Logger is
/// not changed.
pub fn reset_settings() {
    settings::reset();
}

/// Write a fatal line with the default Logger, then run the fatal hook.
pub fn fatal(ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
    cell().load().fatal(ctx, message, err, labels);
}

/// Write an error line with the default Logger.
pub fn error(ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
    cell().load().error(ctx, message, err, labels);
}

/// Write a warning line with the default Logger.
pub fn warning(ctx: &Context, message: &str, err: Option<&dyn Error>, labels: &[Value<'_>]) {
    cell().load().warning(ctx, message, err, labels);
}

/// Write a notice line with the default Logger.
pub fn notice(ctx: &Context, message: &str, labels: &[Value<'_>]) {
    cell().load().notice(ctx, message, labels);
}

/// Write an info line with the default Logger.
pub fn info(ctx: &Context, message: &str, labels: &[Value<'_>]) {
    cell().load().info(ctx, message, labels);
}

/// Write a debug line with a `trace=true` label with the default Logger.
pub fn trace(ctx: &Context, message: &str, labels: &[Value<'_>]) {
    cell().load().trace(ctx, message, labels);
}

/// Write a debug line with the default Logger.
pub fn debug(ctx: &Context, message: &str, labels: &[Value<'_>]) {
    cell().load().debug(ctx, message, labels);
}
