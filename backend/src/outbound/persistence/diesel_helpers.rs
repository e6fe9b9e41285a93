//! Shared Diesel error mapping for the repositories in this module.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through a repository's connection constructor.
pub(crate) fn map_pool_error<E>(error: PoolError, connection: impl FnOnce(String) -> E) -> E {
    connection(error.into_message())
}

/// Map a Diesel failure to a repository error.
///
/// Closed connections become connection errors; everything else is a query
/// error. Database detail is logged at debug level and kept out of the
/// returned message.
pub(crate) fn map_diesel_error<E>(
    error: DieselError,
    query: impl FnOnce(&'static str) -> E,
    connection: impl FnOnce(&'static str) -> E,
) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DeserializationError(_) => query("database row could not be decoded"),
        _ => query("database error"),
    }
}

/// Whether a Diesel failure is a unique-constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Escape `%`, `_` and `\` so user input matches literally inside `LIKE`.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ai", "ai")]
    #[case("50%", "50\\%")]
    #[case("snake_case", "snake\\_case")]
    #[case("back\\slash", "back\\\\slash")]
    fn escape_like_quotes_wildcards(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape_like(raw), expected);
    }

    #[rstest]
    fn not_found_maps_to_query_error() {
        let mapped: &str = map_diesel_error(DieselError::NotFound, |m| m, |_| "connection");
        assert_eq!(mapped, "database error");
    }
}
