//! Domain logic for the Udyam registration backend.
//!
//! Everything in this crate is pure: no database access, no network. The
//! `db` and `api` crates build on these types.

pub mod error;
pub mod field_validation;
pub mod form_schema;
pub mod registration;
pub mod session_id;
pub mod types;
pub mod verification;
