//! HTTP inbound adapter exposing the form and REST interfaces.

pub mod appointments;
pub mod error;
pub mod form;
pub mod health;
pub mod intakes;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
