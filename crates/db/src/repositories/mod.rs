//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod form_schema_repo;
pub mod form_submission_repo;
pub mod user_repo;

pub use form_schema_repo::FormSchemaRepo;
pub use form_submission_repo::FormSubmissionRepo;
pub use user_repo::UserRepo;
