//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers delegate to the registration service or the repositories in
//! `udyam_db` and map errors via [`AppError`](crate::error::AppError).

pub mod form_schema;
pub mod form_submission;
pub mod registration;
pub mod validation;
