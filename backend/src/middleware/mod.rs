//! Request middleware.
//!
//! Purpose: request lifecycle concerns that sit outside any one handler,
//! currently request tracing.

pub mod trace;

pub use trace::Trace;
