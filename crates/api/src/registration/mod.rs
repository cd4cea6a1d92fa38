//! Registration orchestration service.
//!
//! [`RegistrationService`] ties the core validators and the identity
//! verifier to the submission repositories, providing a single entry point
//! for every step write.

pub mod service;

pub use service::{RegistrationService, RegistrationSnapshot, StepOutcome};
