//! Citas backend library.
//!
//! Appointment and intake scheduling service. Domain types and repository
//! ports live under [`domain`]; HTTP handlers and the HTML form interface
//! under [`inbound`]; PostgreSQL adapters under [`outbound`]; server wiring
//! under [`server`].

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use middleware::Trace;
