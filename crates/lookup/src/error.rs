//! Lookup-level error type.

use thiserror::Error;

/// Errors returned by an [`AddressLookup`](crate::AddressLookup).
#[derive(Debug, Error)]
pub enum LookupError {
    /// The provider answered without an address for this postal code.
    #[error("no address found for postal code '{0}'")]
    NotFound(String),

    /// The request never produced a response (connect, TLS, timeout, …).
    #[error("address lookup transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered with a body that is not the expected JSON.
    #[error("malformed address lookup response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid lookup base url '{0}'")]
    InvalidBaseUrl(String),
}
