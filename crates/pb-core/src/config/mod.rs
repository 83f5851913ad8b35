//! # Pure Data Module - Data Transfer Objects Only
//!
//! ## Responsibilities
//!
//! - Define configuration data structures
//! - Provide TOML -> DTO mapping
//!
//! ## Prohibited
//!
//! **No validation logic, no business policy.** Missing keys map to empty or
//! zero values; deciding what an empty value means is the bootstrap's job.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Banking API base URL, e.g. `http://localhost:3000/api/v1`
    pub api_base_url: String,

    /// Per-request client timeout in milliseconds
    pub request_timeout_ms: u64,

    /// Deadline for the CPF uniqueness lookup in milliseconds
    pub document_check_timeout_ms: u64,

    /// Verification-code resend cooldown in seconds
    pub resend_cooldown_secs: u64,

    /// Session key-value file (path info only, no existence check)
    pub session_store_path: PathBuf,

    /// Log directory
    pub log_dir: PathBuf,
}

impl AppConfig {
    /// Create AppConfig from TOML value
    ///
    /// This method must NOT contain any validation or default value logic.
    /// Empty strings and zeros are valid "facts".
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        let section_str = |section: &str, key: &str| -> String {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        let section_u64 = |section: &str, key: &str| -> u64 {
            toml_value
                .get(section)
                .and_then(|s| s.get(key))
                .and_then(|v| v.as_integer())
                .map(|v| v.max(0) as u64)
                .unwrap_or(0)
        };

        Ok(Self {
            api_base_url: section_str("api", "base_url"),
            request_timeout_ms: section_u64("api", "request_timeout_ms"),
            document_check_timeout_ms: section_u64("registration", "document_check_timeout_ms"),
            resend_cooldown_secs: section_u64("registration", "resend_cooldown_secs"),
            session_store_path: PathBuf::from(section_str("storage", "session_store_path")),
            log_dir: PathBuf::from(section_str("logging", "log_dir")),
        })
    }

    /// Create empty AppConfig (all empty/default values)
    pub fn empty() -> Self {
        Self {
            api_base_url: String::new(),
            request_timeout_ms: 0,
            document_check_timeout_ms: 0,
            resend_cooldown_secs: 0,
            session_store_path: PathBuf::new(),
            log_dir: PathBuf::new(),
        }
    }

    /// Create AppConfig with system-default values for production use
    ///
    /// The base directory should be computed by the caller using
    /// platform-specific logic (e.g., `dirs` crate).
    pub fn with_system_defaults(data_dir: PathBuf) -> Self {
        Self {
            api_base_url: "http://localhost:3000/api/v1".to_string(),
            request_timeout_ms: 10_000,
            document_check_timeout_ms: 10_000,
            resend_cooldown_secs: 60,
            session_store_path: data_dir.join("session.json"),
            log_dir: data_dir.join("logs"),
        }
    }
}
