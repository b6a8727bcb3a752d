//! Trace-ID generation and lookup.

use std::sync::{Mutex, OnceLock, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::correlation::context::Context;
use crate::logger::settings;

/// Length of ids produced by [`random_trace_id`].
pub const TRACE_ID_WIDTH: usize = 19;

const PADDING: char = 'X';

/// Slot holding the trace id inside a `Context`.
struct TraceIdKey;

/// Return a child of `parent` carrying `trace_id`, or a freshly generated
/// id when `trace_id` is empty.
///
/// Every log written with the returned context shares the same `trace`
/// field value, so related lines can be collated.
pub fn context_from(parent: &Context, trace_id: &str) -> Context {
    let id = if trace_id.is_empty() {
        (settings::current().trace_id_generator)()
    } else {
        trace_id.to_string()
    };

    parent.with_value::<TraceIdKey, String>(id)
}

/// The trace id associated with `ctx`, as seen by the configured accessor.
///
/// Use this to pass the id across process boundaries, for example as a
/// header on a downstream call. Returns an empty string when none is set.
pub fn trace_id(ctx: &Context) -> String {
    (settings::current().trace_id_accessor)(ctx)
}

/// The default accessor: the id attached by [`context_from`].
pub fn attached_trace_id(ctx: &Context) -> String {
    ctx.value::<TraceIdKey, String>().cloned().unwrap_or_default()
}

fn rng() -> &'static Mutex<StdRng> {
    static RNG: OnceLock<Mutex<StdRng>> = OnceLock::new();
    RNG.get_or_init(|| {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;
        Mutex::new(StdRng::seed_from_u64(seed))
    })
}

/// The default generator: the decimal digits of a random non-negative
/// 63-bit integer, right-padded with `X` to [`TRACE_ID_WIDTH`].
pub fn random_trace_id() -> String {
    let n: u64 = rng()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .gen_range(0..=i64::MAX as u64);

    padded_trace_id(n)
}

fn padded_trace_id(n: u64) -> String {
    let mut id = n.to_string();
    id.truncate(TRACE_ID_WIDTH);
    while id.len() < TRACE_ID_WIDTH {
        id.push(PADDING);
    }
    id
}

/// Alternate generator: a simple-form UUID v4 (32 hex characters).
pub fn uuid_trace_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
