//! `db` crate — pure persistence layer.
//!
//! Provides a connection pool, typed row structs, and repository functions
//! for the `enrollments` and `addresses` tables.  No business logic lives here.
//!
//! The schema itself is owned outside this repository; see the row structs in
//! [`models`] for the expected column layout.

pub mod error;
pub mod pool;
pub mod repository;
pub mod models;

pub use pool::DbPool;
pub use error::DbError;
