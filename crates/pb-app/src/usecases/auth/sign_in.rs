use std::sync::Arc;

use pb_core::auth::{LoginRequest, Route, SESSION_TOKEN_KEY};
use pb_core::ports::{ApiError, AuthApiPort, SessionStoreError, SessionStorePort};
use pb_core::registration::format::digits_only;
use tracing::{info, info_span, warn, Instrument};

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("CPF and password are required")]
    MissingCredentials,
    #[error("invalid credentials")]
    InvalidCredentials,
    /// The server refused the login with its own message.
    #[error("login rejected: {0}")]
    Rejected(String),
    #[error("login request failed: {0}")]
    Api(#[from] ApiError),
    #[error("failed to persist session: {0}")]
    Session(#[from] SessionStoreError),
}

impl SignInError {
    pub fn user_message(&self) -> String {
        match self {
            SignInError::MissingCredentials => "Enter your CPF and password.".to_string(),
            SignInError::InvalidCredentials => "Invalid credentials.".to_string(),
            SignInError::Rejected(message) => message.clone(),
            SignInError::Api(_) | SignInError::Session(_) => {
                "Unexpected error, try again later.".to_string()
            }
        }
    }
}

/// Exchanges CPF and password for a session token and stores it.
pub struct SignIn {
    api: Arc<dyn AuthApiPort>,
    session_store: Arc<dyn SessionStorePort>,
}

impl SignIn {
    pub fn new(api: Arc<dyn AuthApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { api, session_store }
    }

    /// `document` may be masked; only its digits are sent.
    pub async fn execute(&self, document: &str, password: &str) -> Result<Route, SignInError> {
        let request = LoginRequest {
            document: digits_only(document),
            password: password.to_string(),
        };
        if request.document.is_empty() || request.password.is_empty() {
            return Err(SignInError::MissingCredentials);
        }

        let span = info_span!("usecase.auth.sign_in");
        async {
            let response = match self.api.login(&request).await {
                Ok(response) => response,
                Err(ApiError::UnexpectedStatus {
                    message: Some(message),
                    status,
                }) => {
                    warn!(status, "login rejected by server");
                    return Err(SignInError::Rejected(message));
                }
                Err(err) => return Err(err.into()),
            };

            let token = match response.token {
                Some(token) if response.status == "success" && !token.is_empty() => token,
                _ => {
                    warn!(status = %response.status, "login did not return a token");
                    return Err(SignInError::InvalidCredentials);
                }
            };

            self.session_store.set(SESSION_TOKEN_KEY, &token).await?;
            info!("session token stored");
            Ok(Route::Home)
        }
        .instrument(span)
        .await
    }

    /// Forgets the stored session token.
    pub async fn sign_out(&self) -> Result<(), SignInError> {
        self.session_store.remove(SESSION_TOKEN_KEY).await?;
        info!("session token removed");
        Ok(())
    }
}
