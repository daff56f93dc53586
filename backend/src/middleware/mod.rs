//! Actix middleware shared across the HTTP surface.

pub mod trace;

pub use trace::{Trace, TraceId};
