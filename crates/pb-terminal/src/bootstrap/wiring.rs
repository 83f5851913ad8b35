//! # Dependency Injection
//!
//! Creates the infra implementations and injects them into the use cases.
//! This is the only place that depends on `pb-infra` and `pb-app` at the
//! same time, and it only assembles: no business decisions, no config
//! validation.

use std::sync::Arc;
use std::time::Duration;

use pb_app::{RegistrationOrchestrator, RegistrationPolicy, SignIn};
use pb_core::config::AppConfig;
use pb_core::ports::{RegistrationEventPort, SessionStorePort};
use pb_infra::{FileSessionStore, HttpBankingApi};
use tracing::info;

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("HTTP client initialization failed: {0}")]
    HttpClient(String),
}

/// Use cases handed to the terminal view.
pub struct AppDeps {
    pub registration: Arc<RegistrationOrchestrator>,
    pub sign_in: Arc<SignIn>,
}

pub fn wire_dependencies(
    config: &AppConfig,
    event_port: Arc<dyn RegistrationEventPort>,
) -> WiringResult<AppDeps> {
    let api = Arc::new(
        HttpBankingApi::new(
            &config.api_base_url,
            Duration::from_millis(config.request_timeout_ms),
        )
        .map_err(|e| WiringError::HttpClient(format!("{e:#}")))?,
    );
    let session_store: Arc<dyn SessionStorePort> =
        Arc::new(FileSessionStore::new(config.session_store_path.clone()));

    let registration = Arc::new(RegistrationOrchestrator::new(
        api.clone(),
        session_store.clone(),
        event_port,
        RegistrationPolicy::from_config(config),
    ));
    let sign_in = Arc::new(SignIn::new(api, session_store));

    info!(
        api_base_url = %config.api_base_url,
        session_store = %config.session_store_path.display(),
        "dependencies wired"
    );
    Ok(AppDeps {
        registration,
        sign_in,
    })
}
