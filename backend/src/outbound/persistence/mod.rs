//! PostgreSQL persistence adapters.
//!
//! Repositories here implement the domain ports over Diesel with an async
//! bb8 connection pool. Schema changes live in embedded migrations applied
//! at startup.

mod diesel_appointment_repository;
mod diesel_error;
mod diesel_intake_repository;
pub mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_appointment_repository::DieselAppointmentRepository;
pub use diesel_intake_repository::DieselIntakeRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
