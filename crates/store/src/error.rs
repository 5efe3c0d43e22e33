use estoque_core::DomainError;
use thiserror::Error;

/// Error surfaced by store operations.
///
/// Domain failures (validation, not-found, insufficient stock) pass through
/// unchanged so the HTTP layer can map them; everything else is a database
/// error.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
}

/// Postgres unique-violation SQLSTATE.
const UNIQUE_VIOLATION: &str = "23505";

/// Map a unique-constraint failure on `produtos.codigo` to a domain conflict.
pub(crate) fn map_insert_error(err: sqlx::Error) -> StoreError {
    let is_unique = err
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == UNIQUE_VIOLATION)
        .unwrap_or(false);
    if is_unique {
        StoreError::Domain(DomainError::conflict("product code already registered"))
    } else {
        StoreError::Db(err)
    }
}
