//! Port abstraction for intake record persistence adapters.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{IntakeDraft, IntakePatch, IntakeRecord};

/// Persistence errors raised by intake repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeRepositoryError {
    /// Repository connection could not be established.
    #[error("intake repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("intake repository query failed: {message}")]
    Query { message: String },
}

impl IntakeRepositoryError {
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

/// Durable store of [`IntakeRecord`] rows.
///
/// Implementations must preserve insertion order in [`list`](Self::list) and
/// round-trip the ordered `subjects` list exactly as supplied.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IntakeRepository: Send + Sync {
    /// All intake records in insertion order.
    async fn list(&self) -> Result<Vec<IntakeRecord>, IntakeRepositoryError>;

    /// Fetch one record, `None` when the id is unknown.
    async fn find_by_id(&self, id: i32) -> Result<Option<IntakeRecord>, IntakeRepositoryError>;

    /// Persist a new record and return it with its assigned id.
    async fn insert(&self, draft: IntakeDraft) -> Result<IntakeRecord, IntakeRepositoryError>;

    /// Apply the supplied fields to an existing record.
    ///
    /// Returns `None` without mutating anything when the id is unknown. An
    /// empty patch returns the stored record untouched.
    async fn update(
        &self,
        id: i32,
        patch: IntakePatch,
    ) -> Result<Option<IntakeRecord>, IntakeRepositoryError>;

    /// Remove a record permanently. `false` when the id is unknown.
    async fn delete(&self, id: i32) -> Result<bool, IntakeRepositoryError>;
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i32,
    rows: Vec<IntakeRecord>,
}

/// In-memory [`IntakeRepository`] used by tests and database-less server
/// construction.
#[derive(Debug, Default)]
pub struct InMemoryIntakeRepository {
    state: Mutex<InMemoryState>,
}

impl InMemoryIntakeRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked<T>(
        &self,
        f: impl FnOnce(&mut InMemoryState) -> T,
    ) -> Result<T, IntakeRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| IntakeRepositoryError::query("in-memory store poisoned"))?;
        Ok(f(&mut state))
    }
}

#[async_trait]
impl IntakeRepository for InMemoryIntakeRepository {
    async fn list(&self) -> Result<Vec<IntakeRecord>, IntakeRepositoryError> {
        self.locked(|state| state.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<IntakeRecord>, IntakeRepositoryError> {
        self.locked(|state| state.rows.iter().find(|row| row.id == id).cloned())
    }

    async fn insert(&self, draft: IntakeDraft) -> Result<IntakeRecord, IntakeRepositoryError> {
        self.locked(|state| {
            state.next_id += 1;
            let stored = IntakeRecord::new(state.next_id, draft);
            state.rows.push(stored.clone());
            stored
        })
    }

    async fn update(
        &self,
        id: i32,
        patch: IntakePatch,
    ) -> Result<Option<IntakeRecord>, IntakeRepositoryError> {
        self.locked(|state| {
            let row = state.rows.iter_mut().find(|row| row.id == id)?;
            row.apply(patch);
            Some(row.clone())
        })
    }

    async fn delete(&self, id: i32) -> Result<bool, IntakeRepositoryError> {
        self.locked(|state| {
            let before = state.rows.len();
            state.rows.retain(|row| row.id != id);
            state.rows.len() != before
        })
    }
}
