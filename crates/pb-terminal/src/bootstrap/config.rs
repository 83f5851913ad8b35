//! # Configuration Loader
//!
//! ## Responsibilities
//!
//! - Read TOML configuration files
//! - Parse TOML into AppConfig DTO
//! - Report I/O and parsing errors with context
//!
//! [`load_config`] is pure data loading and accepts whatever is in the file.
//! Filling empty values from the system defaults is a separate step,
//! [`fill_missing`], applied by the caller.

use std::path::PathBuf;

use anyhow::Context;
use pb_core::config::AppConfig;

/// Load configuration from a TOML file
///
/// **NO validation is performed**:
/// - Empty strings are valid (they are facts)
/// - Missing sections result in empty values (facts)
///
/// # Errors
///
/// Returns error if:
/// - File cannot be read (I/O error)
/// - Content is not valid TOML (parse error)
pub fn load_config(config_path: PathBuf) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value = toml::from_str(&content)
        .context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

/// Replaces every empty or zero value in `loaded` with the one in `defaults`.
pub fn fill_missing(loaded: AppConfig, defaults: AppConfig) -> AppConfig {
    fn or_default<T: PartialEq + Default>(value: T, default: T) -> T {
        if value == T::default() {
            default
        } else {
            value
        }
    }

    AppConfig {
        api_base_url: or_default(loaded.api_base_url, defaults.api_base_url),
        request_timeout_ms: or_default(loaded.request_timeout_ms, defaults.request_timeout_ms),
        document_check_timeout_ms: or_default(
            loaded.document_check_timeout_ms,
            defaults.document_check_timeout_ms,
        ),
        resend_cooldown_secs: or_default(loaded.resend_cooldown_secs, defaults.resend_cooldown_secs),
        session_store_path: or_default(loaded.session_store_path, defaults.session_store_path),
        log_dir: or_default(loaded.log_dir, defaults.log_dir),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(content.as_bytes()).unwrap();
        temp_file
    }

    #[test]
    fn test_load_config_reads_valid_toml() {
        let temp_file = write_config(
            r#"
            [api]
            base_url = "https://bank.example/api/v1"
            request_timeout_ms = 3000

            [registration]
            resend_cooldown_secs = 45
        "#,
        );

        let config = load_config(temp_file.path().to_path_buf()).unwrap();

        assert_eq!(config.api_base_url, "https://bank.example/api/v1");
        assert_eq!(config.request_timeout_ms, 3000);
        assert_eq!(config.resend_cooldown_secs, 45);
        assert_eq!(config.document_check_timeout_ms, 0);
        assert_eq!(config.log_dir, PathBuf::new());
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let temp_file = write_config("[api\nbase_url = ");

        let err = load_config(temp_file.path().to_path_buf()).unwrap_err();

        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn test_load_config_returns_io_error_on_file_not_found() {
        let non_existent_path = PathBuf::from("/this/path/does/not/exist/pocketbank.toml");

        let err = load_config(non_existent_path).unwrap_err();

        assert!(
            err.to_string().contains("Failed to read config file"),
            "Expected IO error message, got: {}",
            err
        );
    }

    #[test]
    fn test_fill_missing_keeps_file_values() {
        let mut loaded = AppConfig::empty();
        loaded.api_base_url = "https://bank.example/api/v1".to_string();
        loaded.resend_cooldown_secs = 30;
        let defaults = AppConfig::with_system_defaults(PathBuf::from("/data/pb"));

        let config = fill_missing(loaded, defaults);

        assert_eq!(config.api_base_url, "https://bank.example/api/v1");
        assert_eq!(config.resend_cooldown_secs, 30);
        assert_eq!(config.request_timeout_ms, 10_000);
        assert_eq!(config.session_store_path, PathBuf::from("/data/pb/session.json"));
    }
}
