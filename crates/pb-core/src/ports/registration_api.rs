use async_trait::async_trait;

use super::ApiError;
use crate::registration::NewAccountRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UniquenessResponse {
    pub in_use: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeDispatchResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeVerificationResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountCreationResponse {
    pub ok: bool,
    pub id: Option<String>,
}

/// Remote endpoints used by the registration wizard.
#[async_trait]
pub trait RegistrationApiPort: Send + Sync {
    /// Whether a CPF (digits only) already belongs to an account.
    async fn check_document_in_use(&self, document: &str)
        -> Result<UniquenessResponse, ApiError>;

    /// Whether an e-mail already belongs to an account.
    async fn check_email_in_use(&self, email: &str) -> Result<UniquenessResponse, ApiError>;

    /// Sends a fresh single-use verification code to `email`.
    async fn dispatch_verification_code(
        &self,
        email: &str,
    ) -> Result<CodeDispatchResponse, ApiError>;

    /// Matches `code` against the one last sent to `email`.
    async fn verify_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<CodeVerificationResponse, ApiError>;

    async fn create_account(
        &self,
        request: &NewAccountRequest,
    ) -> Result<AccountCreationResponse, ApiError>;
}
