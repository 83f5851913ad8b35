use async_trait::async_trait;

use super::ApiError;
use crate::auth::{LoginRequest, LoginResponse};

#[async_trait]
pub trait AuthApiPort: Send + Sync {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError>;
}
