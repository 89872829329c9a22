//! Shared Diesel error mapping for the registry repositories.

use tracing::debug;

use super::pool::PoolError;

/// Map pool errors into a repository-specific connection error constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub fn map_basic_diesel_error<E, Q, C>(error: diesel::result::Error, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

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
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => query("database error"),
        _ => query("database error"),
    }
}

/// Like [`map_basic_diesel_error`], with unique violations routed to
/// `duplicate` (receiving the violated constraint name when known).
pub fn map_write_diesel_error<E, Q, C, D>(
    error: diesel::result::Error,
    query: Q,
    connection: C,
    duplicate: D,
) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
    D: FnOnce(String) -> E,
{
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    if let DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) = &error {
        let constraint = info
            .constraint_name()
            .map_or_else(|| "unique constraint".to_owned(), str::to_owned);
        debug!(%constraint, "unique constraint violated");
        return duplicate(constraint);
    }
    map_basic_diesel_error(error, query, connection)
}

#[cfg(test)]
mod tests {
    use super::*;
    use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
        Duplicate(String),
    }

    struct Info(&'static str, Option<&'static str>);

    impl DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.1
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind, constraint: Option<&'static str>) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom", constraint)))
    }

    fn map(error: DieselError) -> Mapped {
        map_write_diesel_error(error, Mapped::Query, Mapped::Connection, Mapped::Duplicate)
    }

    #[rstest]
    fn unique_violation_reports_constraint() {
        let mapped = map(database_error(
            DatabaseErrorKind::UniqueViolation,
            Some("divisions_code_key"),
        ));
        assert_eq!(mapped, Mapped::Duplicate("divisions_code_key".into()));
    }

    #[rstest]
    fn unique_violation_without_constraint_name() {
        let mapped = map(database_error(DatabaseErrorKind::UniqueViolation, None));
        assert_eq!(mapped, Mapped::Duplicate("unique constraint".into()));
    }

    #[rstest]
    #[case(DieselError::NotFound, Mapped::Query("record not found"))]
    #[case(
        database_error(DatabaseErrorKind::ClosedConnection, None),
        Mapped::Connection("database connection error")
    )]
    #[case(
        database_error(DatabaseErrorKind::CheckViolation, None),
        Mapped::Query("database error")
    )]
    fn other_errors_fall_back_to_basic_mapping(#[case] error: DieselError, #[case] expected: Mapped) {
        assert_eq!(map(error), expected);
    }

    #[rstest]
    fn pool_errors_become_connection_errors() {
        let mapped: String = map_basic_pool_error(PoolError::checkout("timed out"), |m| m);
        assert_eq!(mapped, "timed out");
    }
}
