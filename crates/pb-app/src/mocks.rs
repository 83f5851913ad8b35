//! Port mocks shared by the use-case unit tests.

use async_trait::async_trait;
use pb_core::auth::{LoginRequest, LoginResponse};
use pb_core::ports::{
    AccountCreationResponse, ApiError, AuthApiPort, CodeDispatchResponse,
    CodeVerificationResponse, RegistrationApiPort, RegistrationEventPort, SessionStoreError,
    SessionStorePort, UniquenessResponse,
};
use pb_core::registration::{NewAccountRequest, RegistrationSnapshot};

mockall::mock! {
    pub RegistrationApi {}

    #[async_trait]
    impl RegistrationApiPort for RegistrationApi {
        async fn check_document_in_use(&self, document: &str) -> Result<UniquenessResponse, ApiError>;
        async fn check_email_in_use(&self, email: &str) -> Result<UniquenessResponse, ApiError>;
        async fn dispatch_verification_code(&self, email: &str) -> Result<CodeDispatchResponse, ApiError>;
        async fn verify_code(&self, email: &str, code: &str) -> Result<CodeVerificationResponse, ApiError>;
        async fn create_account(&self, request: &NewAccountRequest) -> Result<AccountCreationResponse, ApiError>;
    }
}

mockall::mock! {
    pub AuthApi {}

    #[async_trait]
    impl AuthApiPort for AuthApi {
        async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
    }
}

mockall::mock! {
    pub SessionStore {}

    #[async_trait]
    impl SessionStorePort for SessionStore {
        async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
        async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
        async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
    }
}

mockall::mock! {
    pub RegistrationEvents {}

    #[async_trait]
    impl RegistrationEventPort for RegistrationEvents {
        async fn emit_registration_changed(&self, snapshot: RegistrationSnapshot);
    }
}
