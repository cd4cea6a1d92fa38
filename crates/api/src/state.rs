use std::sync::Arc;

use udyam_core::verification::IdentityVerifier;

use crate::config::ServerConfig;
use crate::registration::RegistrationService;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: inner data is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: udyam_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Identity verification provider (mocked).
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Step submission orchestration.
    pub registration: Arc<RegistrationService>,
}

impl AppState {
    /// Wire up state from a pool, config and verifier.
    pub fn new(
        pool: udyam_db::DbPool,
        config: ServerConfig,
        verifier: Arc<dyn IdentityVerifier>,
    ) -> Self {
        let registration = Arc::new(RegistrationService::new(pool.clone(), Arc::clone(&verifier)));
        Self {
            pool,
            config: Arc::new(config),
            verifier,
            registration,
        }
    }
}
