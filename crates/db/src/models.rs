//! Row structs that map 1-to-1 onto database tables.
//!
//! These are *persistence* models — they carry bookkeeping columns
//! (timestamps, foreign keys) that the service layer strips before anything
//! leaves the process.
//!
//! Expected schema:
//!
//! ```sql
//! CREATE TABLE enrollments (
//!     id         UUID PRIMARY KEY,
//!     user_id    UUID NOT NULL UNIQUE,
//!     name       TEXT NOT NULL,
//!     cpf        TEXT NOT NULL,
//!     birthday   TIMESTAMPTZ NOT NULL,
//!     phone      TEXT NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL,
//!     updated_at TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE addresses (
//!     id             UUID PRIMARY KEY,
//!     enrollment_id  UUID NOT NULL UNIQUE REFERENCES enrollments (id),
//!     cep            TEXT NOT NULL,
//!     street         TEXT NOT NULL,
//!     city           TEXT NOT NULL,
//!     state          TEXT NOT NULL,
//!     number         TEXT NOT NULL,
//!     neighborhood   TEXT NOT NULL,
//!     address_detail TEXT,
//!     created_at     TIMESTAMPTZ NOT NULL,
//!     updated_at     TIMESTAMPTZ NOT NULL
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// enrollments
// ---------------------------------------------------------------------------

/// A persisted enrollment row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct EnrollmentRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written by an enrollment upsert.
///
/// The same payload is used for both the insert and the update branch;
/// `user_id` is the conflict key and is never rewritten on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentParams {
    pub name: String,
    pub cpf: String,
    pub birthday: DateTime<Utc>,
    pub phone: String,
}

/// An enrollment together with every address that references it,
/// oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrollmentWithAddresses {
    pub enrollment: EnrollmentRow,
    pub addresses: Vec<AddressRow>,
}

// ---------------------------------------------------------------------------
// addresses
// ---------------------------------------------------------------------------

/// A persisted address row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AddressRow {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    /// Postal code (CEP).
    pub cep: String,
    pub street: String,
    pub city: String,
    /// Two-letter state abbreviation (UF).
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column values written by an address upsert keyed on `enrollment_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressParams {
    pub cep: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub number: String,
    pub neighborhood: String,
    pub address_detail: Option<String>,
}
