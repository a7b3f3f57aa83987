//! The `AddressLookup` trait — the contract every postal-code provider must fulfil.

use async_trait::async_trait;

use crate::{AddressByCep, LookupError, LookupResponse};

/// Resolves postal codes against an external address service.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// Issue the lookup request and return the raw status and decoded body.
    ///
    /// Only transport and decode failures are errors; a 4xx answer is a
    /// successful `fetch` with `body == None`.
    async fn fetch(&self, cep: &str) -> Result<LookupResponse, LookupError>;

    /// Resolve `cep` to an [`AddressByCep`].
    ///
    /// # Errors
    /// `LookupError::NotFound` when the response carries no address.
    async fn address_by_cep(&self, cep: &str) -> Result<AddressByCep, LookupError> {
        let response = self.fetch(cep).await?;
        let body = response
            .body
            .ok_or_else(|| LookupError::NotFound(cep.to_owned()))?;
        Ok(body.into())
    }
}
