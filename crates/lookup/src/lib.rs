//! `lookup` crate — the `AddressLookup` trait and its ViaCEP implementation.
//!
//! The enrollment service resolves postal codes (CEPs) through
//! [`AddressLookup`]; [`ViaCepClient`] is the production implementation and
//! [`mock::MockLookup`] the test double.

pub mod error;
pub mod models;
pub mod traits;
pub mod viacep;
pub mod mock;

pub use error::LookupError;
pub use models::{AddressByCep, LookupResponse, ViaCepAddress};
pub use traits::AddressLookup;
pub use viacep::ViaCepClient;
