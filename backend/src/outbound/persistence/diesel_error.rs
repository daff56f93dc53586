//! Shared mapping from Diesel and pool errors to port error types.
//!
//! Each repository supplies its own error constructors so the mapping stays
//! generic over the port error enum.

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use super::pool::PoolError;

/// Map a pool failure using the supplied connection-error constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl Fn(String) -> E) -> E {
    connection(error.to_string())
}

/// Map a Diesel failure, distinguishing lost connections from query errors.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl Fn(String) -> E,
    connection: impl Fn(String) -> E,
) -> E {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            connection(info.message().to_owned())
        }
        DieselError::NotFound => query("record not found".to_owned()),
        other => query(other.to_string()),
    }
}
