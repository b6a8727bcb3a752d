//! Label and line encoding subsystem.
//!
//! # Data Flow
//! ```text
//! labels![k, v, k, lazy(|| v), ...]      (flat, ordered Value sequence)
//!     → labels.rs (pair up, pad odd length with "#missing#")
//!     → value.rs (closed dispatch per value kind, lazy thunks run here)
//!     → format.rs (JSON or logfmt delimiters, escaping)
//!     → line.rs (trace, severity, timestamp, error, labels, message)
//!     → output::writer (single locked write)
//! ```
//!
//! # Design Decisions
//! - Values are a closed enum, not `dyn Any`; only the `Debug` branch pays
//!   for generic formatting
//! - Everything renders into one growable `String` through `fmt::Write`
//! - Lazy values are only reachable from the encoder, which only runs once
//!   the severity gate has passed

pub mod format;
pub mod labels;
pub mod line;
pub mod value;

pub use format::OutputFormat;
pub use labels::{render_labels, write_labels, MISSING};
pub use value::{debug, display, lazy, Lazy, LazyOutput, Value};
