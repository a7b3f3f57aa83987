//! Enrollment service.
//!
//! `EnrollmentService` is the orchestrator between the postal-code lookup
//! and the two repositories:
//! 1. Read path: fetch the user's enrollment with its addresses and project
//!    away bookkeeping columns.
//! 2. Upsert path: validate the postal code against the lookup, then upsert
//!    the enrollment (keyed by user) and its address (keyed by enrollment).
//!
//! The two upserts are NOT wrapped in a transaction.  If the address write
//! fails the enrollment write stays committed; the failure is logged and
//! returned to the caller as-is.

use std::sync::Arc;

use lookup::{AddressByCep, AddressLookup};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use db::DbPool;

use crate::repository::{
    AddressRepository, EnrollmentRepository, PgAddressRepository, PgEnrollmentRepository,
};
use crate::{EnrollmentError, EnrollmentView, NewEnrollment};

/// Status text the lookup provider uses for rejected postal codes.
const BAD_REQUEST_TEXT: &str = "Bad Request";

/// Stateless orchestrator; cheap to clone behind an `Arc`.
#[derive(Clone)]
pub struct EnrollmentService {
    enrollments: Arc<dyn EnrollmentRepository>,
    addresses: Arc<dyn AddressRepository>,
    lookup: Arc<dyn AddressLookup>,
}

impl EnrollmentService {
    pub fn new(
        enrollments: Arc<dyn EnrollmentRepository>,
        addresses: Arc<dyn AddressRepository>,
        lookup: Arc<dyn AddressLookup>,
    ) -> Self {
        Self { enrollments, addresses, lookup }
    }

    /// Service backed by the Postgres repositories.
    pub fn with_pool(pool: DbPool, lookup: Arc<dyn AddressLookup>) -> Self {
        Self::new(
            Arc::new(PgEnrollmentRepository::new(pool.clone())),
            Arc::new(PgAddressRepository::new(pool)),
            lookup,
        )
    }

    /// Resolve a postal code to an address.
    ///
    /// # Errors
    /// `EnrollmentError::NotFound` when the lookup returns no address.
    #[instrument(skip(self))]
    pub async fn get_address_from_cep(&self, cep: &str) -> Result<AddressByCep, EnrollmentError> {
        Ok(self.lookup.address_by_cep(cep).await?)
    }

    /// Fetch the user's enrollment and its first address.
    ///
    /// # Errors
    /// `EnrollmentError::NotFound` when the user has no enrollment.
    #[instrument(skip(self))]
    pub async fn get_one_with_address_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<EnrollmentView, EnrollmentError> {
        let joined = self
            .enrollments
            .find_with_address_by_user_id(user_id)
            .await?
            .ok_or(EnrollmentError::NotFound)?;

        Ok(joined.into())
    }

    /// Validate the postal code, then create or replace the user's
    /// enrollment and its address.
    ///
    /// # Errors
    /// `EnrollmentError::RequestError` when the lookup answers 400, reports
    /// "Bad Request", or returns no body; nothing is written in that case.
    /// Database errors from either upsert are returned unchanged.
    #[instrument(skip(self, input))]
    pub async fn create_or_update_enrollment_with_address(
        &self,
        user_id: Uuid,
        input: NewEnrollment,
    ) -> Result<(), EnrollmentError> {
        let (enrollment, address) = input.into_params();

        // Goes through the raw fetch so status and status text can be checked.
        let response = self.lookup.fetch(&address.cep).await?;
        if response.body.is_none()
            || response.status == 400
            || response.status_text == BAD_REQUEST_TEXT
        {
            warn!(
                cep = %address.cep,
                status = response.status,
                "postal code rejected by lookup"
            );
            return Err(EnrollmentError::RequestError {
                status: response.status,
                status_text: response.status_text,
            });
        }

        let saved = self.enrollments.upsert(user_id, &enrollment).await?;

        if let Err(e) = self.addresses.upsert(saved.id, &address).await {
            warn!(
                enrollment_id = %saved.id,
                "enrollment saved but address upsert failed: {}", e
            );
            return Err(e.into());
        }

        info!(enrollment_id = %saved.id, "enrollment and address saved");
        Ok(())
    }
}
