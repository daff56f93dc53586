//! PostgreSQL-backed [`AppointmentRepository`] implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AppointmentRepository, AppointmentRepositoryError};
use crate::domain::{Appointment, AppointmentDraft, AppointmentPatch};

use super::diesel_error;
use super::models::{AppointmentChangeset, AppointmentRow, NewAppointmentRow};
use super::pool::{DbPool, PoolError};
use super::schema::appointments;

/// Diesel-backed implementation of the appointment repository port.
#[derive(Clone)]
pub struct DieselAppointmentRepository {
    pool: DbPool,
}

impl DieselAppointmentRepository {
    /// Create a new repository over the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> AppointmentRepositoryError {
    diesel_error::map_pool_error(error, AppointmentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> AppointmentRepositoryError {
    diesel_error::map_diesel_error(
        error,
        AppointmentRepositoryError::query,
        AppointmentRepositoryError::connection,
    )
}

#[async_trait]
impl AppointmentRepository for DieselAppointmentRepository {
    async fn list(&self) -> Result<Vec<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<AppointmentRow> = appointments::table
            .order(appointments::id.asc())
            .select(AppointmentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Appointment::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = appointments::table
            .find(id)
            .select(AppointmentRow::as_select())
            .first::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Appointment::from))
    }

    async fn insert(
        &self,
        draft: AppointmentDraft,
    ) -> Result<Appointment, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: AppointmentRow = diesel::insert_into(appointments::table)
            .values(NewAppointmentRow::from(draft))
            .returning(AppointmentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(Appointment::from(row))
    }

    async fn update(
        &self,
        id: i32,
        patch: AppointmentPatch,
    ) -> Result<Option<Appointment>, AppointmentRepositoryError> {
        // Diesel rejects an empty changeset; an empty patch is a no-op read.
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(appointments::table.find(id))
            .set(AppointmentChangeset::from(patch))
            .returning(AppointmentRow::as_returning())
            .get_result::<AppointmentRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Appointment::from))
    }

    async fn delete(&self, id: i32) -> Result<bool, AppointmentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(appointments::table.find(id))
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
        assert!(matches!(
            mapped,
            AppointmentRepositoryError::Connection { .. }
        ));
        assert!(mapped.to_string().contains("connection refused"));
    }

    #[rstest]
    fn diesel_not_found_surfaces_as_query_failure() {
        let mapped = map_diesel_error(diesel::result::Error::NotFound);
        assert!(matches!(mapped, AppointmentRepositoryError::Query { .. }));
        assert!(mapped.to_string().contains("record not found"));
    }
}
