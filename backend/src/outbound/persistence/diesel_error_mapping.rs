//! Translate Diesel and pool failures into [`LedgerError`].
//!
//! Lock contention (deadlocks, `lock_timeout` expiry, serialization
//! failures) and pool exhaustion are transient. Uniqueness violations are
//! conflicts. Everything else is fatal, including a connection lost
//! mid-transaction: the `COMMIT` may already have landed, so re-running the
//! operation could apply it twice.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::LedgerError;

use super::pool::PoolError;

/// Pool checkout and build failures are always worth retrying.
pub(super) fn map_pool_error(error: PoolError) -> LedgerError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            LedgerError::transient(message)
        }
    }
}

fn is_lock_contention(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("deadlock detected")
        || lower.contains("lock timeout")
        || lower.contains("could not obtain lock")
        || lower.contains("could not serialize access")
}

pub(super) fn map_diesel_error(error: DieselError) -> LedgerError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(kind, info) => match kind {
            DatabaseErrorKind::UniqueViolation => LedgerError::conflict(
                info.constraint_name()
                    .map_or_else(|| info.message().to_owned(), |name| format!("{name} violated")),
            ),
            DatabaseErrorKind::SerializationFailure => {
                LedgerError::transient("serialization failure")
            }
            DatabaseErrorKind::ClosedConnection => {
                LedgerError::fatal("database connection closed; outcome unknown")
            }
            _ if is_lock_contention(info.message()) => LedgerError::transient(info.message()),
            _ => LedgerError::fatal(info.message()),
        },
        DieselError::NotFound => LedgerError::fatal("record not found"),
        DieselError::QueryBuilderError(_) => LedgerError::fatal("database query error"),
        other => LedgerError::fatal(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn database_error(kind: DatabaseErrorKind, message: &str) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(message.to_owned()))
    }

    #[rstest]
    #[case(DatabaseErrorKind::Unknown, "deadlock detected")]
    #[case(DatabaseErrorKind::Unknown, "canceling statement due to lock timeout")]
    #[case(DatabaseErrorKind::Unknown, "could not obtain lock on row in relation \"users\"")]
    #[case(DatabaseErrorKind::SerializationFailure, "could not serialize access")]
    fn lock_contention_is_transient(#[case] kind: DatabaseErrorKind, #[case] message: &str) {
        let mapped = map_diesel_error(database_error(kind, message));

        assert!(mapped.is_retryable(), "expected transient, got {mapped:?}");
    }

    #[rstest]
    fn unique_violations_are_conflicts() {
        let mapped = map_diesel_error(database_error(
            DatabaseErrorKind::UniqueViolation,
            "duplicate key value violates unique constraint",
        ));

        assert!(matches!(mapped, LedgerError::Conflict { .. }));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::Unknown, "relation \"users\" does not exist"))]
    #[case(database_error(DatabaseErrorKind::CheckViolation, "users_coins_check"))]
    #[case(DieselError::NotFound)]
    #[case(database_error(DatabaseErrorKind::ClosedConnection, "server closed the connection"))]
    fn other_failures_are_fatal(#[case] error: DieselError) {
        let mapped = map_diesel_error(error);

        assert!(matches!(mapped, LedgerError::Fatal { .. }));
        assert!(!mapped.is_retryable());
    }

    #[rstest]
    fn pool_failures_are_transient() {
        assert_eq!(
            map_pool_error(PoolError::checkout("timed out waiting for connection")),
            LedgerError::transient("timed out waiting for connection")
        );
    }
}
