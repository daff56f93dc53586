//! Domain ports for the hexagonal boundary.
//!
//! Inbound adapters depend on these traits only; outbound adapters implement
//! them. Each port ships an in-memory implementation for tests and for
//! running the server without a database.

mod appointment_repository;
mod intake_repository;

#[cfg(test)]
pub use appointment_repository::MockAppointmentRepository;
pub use appointment_repository::{
    AppointmentRepository, AppointmentRepositoryError, InMemoryAppointmentRepository,
};
#[cfg(test)]
pub use intake_repository::MockIntakeRepository;
pub use intake_repository::{IntakeRepository, IntakeRepositoryError, InMemoryIntakeRepository};
