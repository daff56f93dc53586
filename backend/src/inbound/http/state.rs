//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AppointmentRepository, InMemoryAppointmentRepository, InMemoryIntakeRepository,
    IntakeRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Store backing the appointment resource and the HTML form.
    pub appointments: Arc<dyn AppointmentRepository>,
    /// Store backing the intake resource.
    pub intakes: Arc<dyn IntakeRepository>,
}

impl HttpState {
    /// Construct state from repository implementations.
    #[must_use]
    pub fn new(
        appointments: Arc<dyn AppointmentRepository>,
        intakes: Arc<dyn IntakeRepository>,
    ) -> Self {
        Self {
            appointments,
            intakes,
        }
    }

    /// State backed by empty in-memory stores, for tests and database-less
    /// server construction.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryAppointmentRepository::new()),
            Arc::new(InMemoryIntakeRepository::new()),
        )
    }
}
