//! `InMemoryStore` — a test double for both repository traits.
//!
//! Mirrors the Postgres upsert semantics (unique `user_id` on enrollments,
//! unique `enrollment_id` on addresses) without a database.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use db::models::{AddressParams, AddressRow, EnrollmentParams, EnrollmentRow, EnrollmentWithAddresses};
use db::DbError;
use uuid::Uuid;

use crate::repository::{AddressRepository, EnrollmentRepository};

#[derive(Default)]
pub struct InMemoryStore {
    /// Keyed by `user_id`.
    enrollments: Mutex<HashMap<Uuid, EnrollmentRow>>,
    /// Keyed by `enrollment_id`.
    addresses: Mutex<HashMap<Uuid, AddressRow>>,
    writes: AtomicUsize,
    fail_address_writes: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent address upsert fail with a pool timeout.
    pub fn fail_address_writes(&self) {
        self.fail_address_writes.store(true, Ordering::SeqCst);
    }

    pub fn enrollment_for(&self, user_id: Uuid) -> Option<EnrollmentRow> {
        self.enrollments
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&user_id)
            .cloned()
    }

    pub fn address_for(&self, enrollment_id: Uuid) -> Option<AddressRow> {
        self.addresses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&enrollment_id)
            .cloned()
    }

    pub fn enrollment_count(&self) -> usize {
        self.enrollments.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn address_count(&self) -> usize {
        self.addresses.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Number of successful upserts across both tables.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EnrollmentRepository for InMemoryStore {
    async fn find_with_address_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<EnrollmentWithAddresses>, DbError> {
        let Some(enrollment) = self.enrollment_for(user_id) else {
            return Ok(None);
        };
        let addresses = self.address_for(enrollment.id).into_iter().collect();
        Ok(Some(EnrollmentWithAddresses { enrollment, addresses }))
    }

    async fn upsert(
        &self,
        user_id: Uuid,
        params: &EnrollmentParams,
    ) -> Result<EnrollmentRow, DbError> {
        let now = Utc::now();
        let mut rows = self.enrollments.lock().unwrap_or_else(PoisonError::into_inner);

        let row = rows
            .entry(user_id)
            .and_modify(|row| {
                row.name = params.name.clone();
                row.cpf = params.cpf.clone();
                row.birthday = params.birthday;
                row.phone = params.phone.clone();
                row.updated_at = now;
            })
            .or_insert_with(|| EnrollmentRow {
                id: Uuid::new_v4(),
                user_id,
                name: params.name.clone(),
                cpf: params.cpf.clone(),
                birthday: params.birthday,
                phone: params.phone.clone(),
                created_at: now,
                updated_at: now,
            })
            .clone();

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(row)
    }
}

#[async_trait]
impl AddressRepository for InMemoryStore {
    async fn upsert(
        &self,
        enrollment_id: Uuid,
        params: &AddressParams,
    ) -> Result<AddressRow, DbError> {
        if self.fail_address_writes.load(Ordering::SeqCst) {
            return Err(DbError::Sqlx(sqlx::Error::PoolTimedOut));
        }

        let now = Utc::now();
        let mut rows = self.addresses.lock().unwrap_or_else(PoisonError::into_inner);

        let id = rows.get(&enrollment_id).map_or_else(Uuid::new_v4, |row| row.id);
        let created_at = rows.get(&enrollment_id).map_or(now, |row| row.created_at);
        let row = AddressRow {
            id,
            enrollment_id,
            cep: params.cep.clone(),
            street: params.street.clone(),
            city: params.city.clone(),
            state: params.state.clone(),
            number: params.number.clone(),
            neighborhood: params.neighborhood.clone(),
            address_detail: params.address_detail.clone(),
            created_at,
            updated_at: now,
        };
        rows.insert(enrollment_id, row.clone());

        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(row)
    }
}
