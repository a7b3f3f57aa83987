//! Persistence seams used by the service, and their Postgres implementations.
//!
//! The Postgres types are thin adapters over `db::repository`; the traits
//! exist so the service can run against [`crate::mock::InMemoryStore`].

use async_trait::async_trait;
use db::models::{AddressParams, AddressRow, EnrollmentParams, EnrollmentRow, EnrollmentWithAddresses};
use db::{DbError, DbPool};
use uuid::Uuid;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    /// The user's enrollment with its addresses, oldest address first.
    async fn find_with_address_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<EnrollmentWithAddresses>, DbError>;

    /// Insert-or-update keyed on `user_id`.
    async fn upsert(
        &self,
        user_id: Uuid,
        params: &EnrollmentParams,
    ) -> Result<EnrollmentRow, DbError>;
}

#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Insert-or-update keyed on `enrollment_id`.
    async fn upsert(
        &self,
        enrollment_id: Uuid,
        params: &AddressParams,
    ) -> Result<AddressRow, DbError>;
}

#[derive(Debug, Clone)]
pub struct PgEnrollmentRepository {
    pool: DbPool,
}

impl PgEnrollmentRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EnrollmentRepository for PgEnrollmentRepository {
    async fn find_with_address_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<EnrollmentWithAddresses>, DbError> {
        db::repository::enrollments::find_with_address_by_user_id(&self.pool, user_id).await
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        params: &EnrollmentParams,
    ) -> Result<EnrollmentRow, DbError> {
        db::repository::enrollments::upsert(&self.pool, user_id, params).await
    }
}

#[derive(Debug, Clone)]
pub struct PgAddressRepository {
    pool: DbPool,
}

impl PgAddressRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn upsert(
        &self,
        enrollment_id: Uuid,
        params: &AddressParams,
    ) -> Result<AddressRow, DbError> {
        db::repository::addresses::upsert(&self.pool, enrollment_id, params).await
    }
}
