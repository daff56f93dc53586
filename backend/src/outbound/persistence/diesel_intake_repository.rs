//! PostgreSQL-backed [`IntakeRepository`] implementation.
//!
//! `subjects` maps to a native `text[]` column, so the ordered list
//! round-trips through Diesel as a `Vec<String>` with no serialisation
//! boundary in this adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IntakeRepository, IntakeRepositoryError};
use crate::domain::{IntakeDraft, IntakePatch, IntakeRecord};

use super::diesel_error;
use super::models::{IntakeChangeset, IntakeRow, NewIntakeRow};
use super::pool::{DbPool, PoolError};
use super::schema::intake_records;

/// Diesel-backed implementation of the intake repository port.
#[derive(Clone)]
pub struct DieselIntakeRepository {
    pool: DbPool,
}

impl DieselIntakeRepository {
    /// Create a new repository over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IntakeRepositoryError {
    diesel_error::map_pool_error(error, IntakeRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IntakeRepositoryError {
    diesel_error::map_diesel_error(
        error,
        IntakeRepositoryError::query,
        IntakeRepositoryError::connection,
    )
}

#[async_trait]
impl IntakeRepository for DieselIntakeRepository {
    async fn list(&self) -> Result<Vec<IntakeRecord>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IntakeRow> = intake_records::table
            .order(intake_records::id.asc())
            .select(IntakeRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(IntakeRecord::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<IntakeRecord>, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = intake_records::table
            .find(id)
            .select(IntakeRow::as_select())
            .first::<IntakeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(IntakeRecord::from))
    }

    async fn insert(&self, draft: IntakeDraft) -> Result<IntakeRecord, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: IntakeRow = diesel::insert_into(intake_records::table)
            .values(NewIntakeRow::from(draft))
            .returning(IntakeRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(IntakeRecord::from(row))
    }

    async fn update(
        &self,
        id: i32,
        patch: IntakePatch,
    ) -> Result<Option<IntakeRecord>, IntakeRepositoryError> {
        // Diesel rejects an empty changeset; an empty patch is a no-op read.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(intake_records::table.find(id))
            .set(IntakeChangeset::from(patch))
            .returning(IntakeRow::as_returning())
            .get_result::<IntakeRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(IntakeRecord::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, IntakeRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(intake_records::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_surface_as_connection_failures() {
        let mapped = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(mapped, IntakeRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn diesel_errors_surface_as_query_failures() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, IntakeRepositoryError::Query { .. }));
    }
}
