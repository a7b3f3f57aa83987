//! `enrollments` crate — the enrollment service and its collaborator seams.
//!
//! [`EnrollmentService`] validates postal codes through an
//! [`lookup::AddressLookup`] and persists through the
//! [`EnrollmentRepository`] / [`AddressRepository`] traits.

pub mod models;
pub mod error;
pub mod repository;
pub mod service;
pub mod mock;

pub use models::{AddressView, EnrollmentView, NewAddress, NewEnrollment};
pub use error::EnrollmentError;
pub use repository::{AddressRepository, EnrollmentRepository, PgAddressRepository, PgEnrollmentRepository};
pub use service::EnrollmentService;
