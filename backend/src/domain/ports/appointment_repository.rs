//! Port abstraction for appointment persistence adapters.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{Appointment, AppointmentDraft, AppointmentPatch};

/// Persistence errors raised by appointment repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentRepositoryError {
    /// Repository connection could not be established.
    #[error("appointment repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("appointment repository query failed: {message}")]
    Query { message: String },
}

impl AppointmentRepositoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable store of [`Appointment`] records.
///
/// Implementations must preserve insertion order in [`list`](Self::list) and
/// treat every mutation as a single atomic operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    /// All appointments in insertion order.
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError>;

    /// Fetch one appointment, `None` when the id is unknown.
    async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Persist a new appointment and return it with its assigned id.
    async fn insert(
        &self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, AppointmentRepositoryError>;

    /// Apply the supplied fields to an existing appointment.
    ///
    /// Returns `None` without mutating anything when the id is unknown. An
    /// empty patch returns the stored record untouched.
    async fn update(
        &self,
        id: i32,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError>;

    /// Remove an appointment permanently. `false` when the id is unknown.
    async fn delete(&self, id: i32) -> Result<bool, AppointmentRepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    rows: Vec<Appointment>,
}

/// In-memory [`AppointmentRepository`] used by tests and database-less
/// server construction.
#[derive(Debug, Default)]
pub struct InMemoryAppointmentRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryAppointmentRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked<T>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> T,
    ) -> Result<T, AppointmentRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| AppointmentRepositoryError::query("in-memory store poisoned"))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl AppointmentRepository for InMemoryAppointmentRepository {
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        self.locked(|state| state.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        self.locked(|state| state.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(
        &self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        self.locked(|state| {
            state.next_id += 1;
            let stored = Appointment::new(state.next_id, draft);
            state.rows.push(stored.clone());
            stored
        })
    }

    async fn update(
        &self,
        id: i32,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        self.locked(|state| {
            let row = state.rows.iter_mut().find(|row| row.id == id)?;
            row.apply(patch);
            Some(row.clone())
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, AppointmentRepositoryError> {
        self.locked(|state| {
            let before = state.rows.len();
            state.rows.retain(|row| row.id != id);
            state.rows.len() != before
        })
    }
}
