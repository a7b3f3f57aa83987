//! ViaCEP HTTP client.
//!
//! `GET {base_url}/{cep}/json/` against <https://viacep.com.br>. Unknown but
//! well-formed postal codes come back as `200 {"erro": true}`; malformed ones
//! as `400` with an HTML body.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{AddressLookup, LookupError, LookupResponse, ViaCepAddress};

pub const DEFAULT_BASE_URL: &str = "https://viacep.com.br/ws";

/// reqwest-backed [`AddressLookup`] for ViaCEP.
#[derive(Debug, Clone)]
pub struct ViaCepClient {
    http: Client,
    base_url: Url,
}

impl ViaCepClient {
    /// Create a client rooted at `base_url`.
    ///
    /// `timeout` bounds each request end to end; `None` leaves reqwest's
    /// default (no timeout).
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, LookupError> {
        let base_url = Url::parse(base_url)
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or_else(|| LookupError::InvalidBaseUrl(base_url.to_owned()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            base_url,
        })
    }

    fn url_for(&self, cep: &str) -> Url {
        let mut url = self.base_url.clone();
        // `new` rejects cannot-be-a-base urls, so segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(cep).push("json").push("");
        }
        url
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    #[instrument(skip(self))]
    async fn fetch(&self, cep: &str) -> Result<LookupResponse, LookupError> {
        let url = self.url_for(cep);
        let response = self.http.get(url).send().await?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_owned();
        debug!(status = status.as_u16(), "address lookup answered");

        if !status.is_success() {
            return Ok(LookupResponse {
                status: status.as_u16(),
                status_text,
                body: None,
            });
        }

        let text = response.text().await?;
        let body = decode_body(&text)?;

        Ok(LookupResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}

/// Decode a success body; blank bodies, `null` and the `erro` marker are
/// "no address".
fn decode_body(text: &str) -> Result<Option<ViaCepAddress>, LookupError> {
    if text.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(text)?;
    if value.is_null() {
        return Ok(None);
    }
    // ViaCEP has sent both `true` and `"true"` here over time.
    if matches!(value.get("erro"), Some(flag) if flag != &Value::Bool(false)) {
        return Ok(None);
    }

    Ok(Some(serde_json::from_value(value)?))
}
