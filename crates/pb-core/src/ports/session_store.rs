//! Persisted key-value store port
//!
//! The wizard itself persists nothing; this store holds the session token
//! written at sign-in and read to decide where a newly registered user goes.

use async_trait::async_trait;
use thiserror::Error;

use crate::auth::SESSION_TOKEN_KEY;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session store I/O failed: {0}")]
    Io(String),

    #[error("session store data corrupt: {0}")]
    Corrupt(String),
}

#[async_trait]
pub trait SessionStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;

    async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;

    /// Current session token, if a user is signed in.
    async fn session_token(&self) -> Result<Option<String>, SessionStoreError> {
        self.get(SESSION_TOKEN_KEY).await
    }
}

#[cfg(test)]
mockall::mock! {
    pub SessionStore {}

    #[async_trait]
    impl SessionStorePort for SessionStore {
        async fn get(&self, key: &str) -> Result<Option<String>, SessionStoreError>;
        async fn set(&self, key: &str, value: &str) -> Result<(), SessionStoreError>;
        async fn remove(&self, key: &str) -> Result<(), SessionStoreError>;
    }
}
