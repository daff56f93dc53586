//! Embedded schema migrations applied at startup.
//!
//! Migrations run over a short-lived synchronous connection on a blocking
//! thread before the async pool is built. A failure here aborts startup;
//! the listener never binds against an unmigrated or unreachable database.

use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying startup migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database was unreachable.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
}

/// Apply all pending migrations against `database_url`.
///
/// # Errors
///
/// Returns [`MigrationError`] when the database is unreachable or a
/// migration fails; callers should treat either as fatal.
pub async fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let database_url = database_url.to_owned();
    tokio::task::spawn_blocking(move || {
        let mut conn =
            PgConnection::establish(&database_url).map_err(|err| MigrationError::Connection {
                message: err.to_string(),
            })?;
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| MigrationError::Apply {
                message: err.to_string(),
            })?;
        for migration in applied {
            info!(migration = %migration, "applied migration");
        }
        Ok(())
    })
    .await
    .map_err(|err| MigrationError::Apply {
        message: format!("migration task panicked: {err}"),
    })?
}
