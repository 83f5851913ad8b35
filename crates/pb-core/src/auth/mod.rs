//! Sign-in and session domain types.

use serde::{Deserialize, Serialize};

/// Session-store key holding the bearer token issued at sign-in.
pub const SESSION_TOKEN_KEY: &str = "token";

/// Where the user lands after leaving the registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    Login,
    Home,
}

impl Route {
    /// A stored session token sends the user home, otherwise to sign-in.
    pub fn for_session(token: Option<&str>) -> Self {
        match token {
            Some(token) if !token.is_empty() => Route::Home,
            _ => Route::Login,
        }
    }
}

/// `POST /auth/login` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Digits only.
    #[serde(rename = "cpf")]
    pub document: String,
    pub password: String,
}

/// `POST /auth/login` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub status: String,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}

impl LoginResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}
