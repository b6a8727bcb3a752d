//! Severity and verbosity subsystem.
//!
//! # Data Flow
//! ```text
//! Logger::<severity>(...)
//!     → severity.rs (Severity → mask bit, rendered text)
//!     → mask.rs (OutputMask & bit)
//!     → zero: return, nothing evaluated
//!     → set: build and write the line
//! ```
//!
//! # Design Decisions
//! - One bit per severity, including Trace
//! - Presets are plain unions of bits, so callers can compose their own
//! - The Trace bit is not part of `ALL`; it is opted into explicitly

pub mod mask;
pub mod severity;

pub use mask::OutputMask;
pub use severity::Severity;
