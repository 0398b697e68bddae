//! Shared Diesel error classification for the repositories.
//!
//! Repositories turn the classification into their own port error so that
//! constraint violations keep a client-safe message while driver details
//! only reach the debug log.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse failure category of a Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    /// The connection dropped mid-operation.
    Connection(&'static str),
    /// A unique index rejected the write.
    UniqueViolation,
    /// A check or foreign key constraint rejected the write.
    Rejected(&'static str),
    /// Anything else.
    Query(&'static str),
}

/// Log and classify a Diesel error.
pub(super) fn classify_diesel_error(error: diesel::result::Error) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            DieselFailure::UniqueViolation
        }
        DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, _) => {
            DieselFailure::Rejected("value rejected by schema constraint")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            DieselFailure::Rejected("referenced record does not exist")
        }
        _ => DieselFailure::Query("database error"),
    }
}

/// Message carried by a pool failure.
pub(super) fn pool_error_message(error: PoolError) -> String {
    match error {
        PoolError::Checkout { message }
        | PoolError::Build { message }
        | PoolError::Migration { message } => message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn not_found_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::NotFound),
            DieselFailure::Query("record not found")
        );
    }

    #[rstest]
    fn rollback_is_a_query_failure() {
        assert_eq!(
            classify_diesel_error(DieselError::RollbackTransaction),
            DieselFailure::Query("database error")
        );
    }

    #[rstest]
    fn pool_messages_pass_through() {
        assert_eq!(pool_error_message(PoolError::checkout("timed out")), "timed out");
    }
}
