//! Request correlation subsystem.
//!
//! # Data Flow
//! ```text
//! request/task starts
//!     → context_from(&parent, "") (id.rs generates a fixed-width id)
//!     → Context carries it under a private key (context.rs)
//!     → optionally scope(ctx, fut) makes it the task's current context (scope.rs)
//!     → every log line reads it back through trace_id(&ctx)
//! ```
//!
//! # Design Decisions
//! - `Context` is an immutable, cheaply cloned chain of values; attaching
//!   returns a new context and never changes the parent
//! - The accessor and the generator are replaceable hooks (see `logger::settings`)
//!   so other correlation schemes can be plugged in without touching call sites
//! - Uniqueness is probabilistic

pub mod context;
pub mod id;
pub mod scope;

pub use context::Context;
pub use id::{attached_trace_id, context_from, random_trace_id, trace_id, uuid_trace_id, TRACE_ID_WIDTH};
pub use scope::{current, scope};
