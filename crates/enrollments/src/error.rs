//! Service-level error types.

use lookup::LookupError;
use thiserror::Error;

/// Errors produced by the enrollment service.
///
/// `NotFound` and `RequestError` are the two outcomes callers are expected to
/// map to client-facing statuses; the remaining variants carry
/// infrastructure failures through unchanged.
#[derive(Debug, Error)]
pub enum EnrollmentError {
    /// No enrollment for the user, or no address for the postal code.
    #[error("No result for this search!")]
    NotFound,

    /// The postal-code lookup rejected the code or returned nothing.
    #[error("postal code validation failed: {status} {status_text}")]
    RequestError { status: u16, status_text: String },

    /// The lookup request itself failed.
    #[error("address lookup error: {0}")]
    Lookup(LookupError),

    /// Persistence error from the db crate.
    #[error("database error: {0}")]
    Database(#[from] db::DbError),
}

impl From<LookupError> for EnrollmentError {
    fn from(err: LookupError) -> Self {
        match err {
            LookupError::NotFound(_) => Self::NotFound,
            other => Self::Lookup(other),
        }
    }
}
