//! Error types for corpus queries.
//!
//! Only store failures are errors. Malformed entries are skipped and empty
//! matches produce empty results, so callers can always tell a degraded
//! store apart from a query that simply found nothing.

use thiserror::Error;

/// Failure raised while reading from the corpus store.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The store did not answer the query.
    #[error("corpus store unavailable: {0}")]
    StoreUnavailable(String),
}

/// Result type for engine operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;
