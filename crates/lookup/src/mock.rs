//! `MockLookup` — a test double for `AddressLookup`.
//!
//! Useful in unit and integration tests where the real ViaCEP service is
//! either unavailable or irrelevant.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::{AddressLookup, LookupError, LookupResponse, ViaCepAddress};

/// Behaviour injected into `MockLookup` at construction time.
pub enum MockBehaviour {
    /// Answer `200 OK` with the given address.
    Found(ViaCepAddress),
    /// Answer `200 OK` with an empty body.
    Empty,
    /// Answer with the given status and no body.
    Status(u16, String),
    /// Answer with exactly this response.
    Raw(LookupResponse),
}

/// A mock lookup that records every postal code it receives and returns a
/// programmer-specified response.
pub struct MockLookup {
    pub behaviour: MockBehaviour,
    /// All postal codes seen by this mock (in call order).
    pub calls: Arc<Mutex<Vec<String>>>,
}

impl MockLookup {
    fn with(behaviour: MockBehaviour) -> Self {
        Self {
            behaviour,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Create a mock that always resolves to `address`.
    pub fn found(address: ViaCepAddress) -> Self {
        Self::with(MockBehaviour::Found(address))
    }

    /// Create a mock that always answers with an empty body.
    pub fn empty() -> Self {
        Self::with(MockBehaviour::Empty)
    }

    /// Create a mock that always answers `400 Bad Request`.
    pub fn bad_request() -> Self {
        Self::with(MockBehaviour::Status(400, "Bad Request".into()))
    }

    /// Create a mock that always answers with `response` verbatim.
    pub fn raw(response: LookupResponse) -> Self {
        Self::with(MockBehaviour::Raw(response))
    }

    /// Number of lookups performed so far.
    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl AddressLookup for MockLookup {
    async fn fetch(&self, cep: &str) -> Result<LookupResponse, LookupError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(cep.to_owned());
        }

        let response = match &self.behaviour {
            MockBehaviour::Found(address) => LookupResponse {
                status: 200,
                status_text: "OK".into(),
                body: Some(address.clone()),
            },
            MockBehaviour::Empty => LookupResponse {
                status: 200,
                status_text: "OK".into(),
                body: None,
            },
            MockBehaviour::Status(status, text) => LookupResponse {
                status: *status,
                status_text: text.clone(),
                body: None,
            },
            MockBehaviour::Raw(response) => response.clone(),
        };

        Ok(response)
    }
}
