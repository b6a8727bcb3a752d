//! Output subsystem.
//!
//! # Data Flow
//! ```text
//! encoded line (built outside any lock)
//!     → writer.rs (append '\n', take the process-wide write lock)
//!     → sink.rs (single write_all to the destination)
//! ```
//!
//! # Design Decisions
//! - One write lock for the whole process: most loggers share one physical
//!   destination (stderr), and lines must never interleave
//! - The lock covers only the write, never encoding or lazy evaluation
//! - Sink failures are not retried

pub mod sink;
pub mod writer;

pub use sink::{MemorySink, Sink};
pub use writer::commit;
