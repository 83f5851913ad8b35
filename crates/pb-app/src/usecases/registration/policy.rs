use std::time::Duration;

use pb_core::registration::DEFAULT_RESEND_COOLDOWN_SECS;
use pb_core::AppConfig;

/// Deadline for the CPF uniqueness lookup.
pub const DEFAULT_DOCUMENT_CHECK_TIMEOUT: Duration = Duration::from_secs(10);

/// Timing knobs of the registration wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationPolicy {
    pub document_check_timeout: Duration,
    pub resend_cooldown_secs: u32,
}

impl RegistrationPolicy {
    /// Zero values in `config` fall back to the defaults.
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            document_check_timeout: match config.document_check_timeout_ms {
                0 => defaults.document_check_timeout,
                ms => Duration::from_millis(ms),
            },
            resend_cooldown_secs: match u32::try_from(config.resend_cooldown_secs) {
                Ok(0) | Err(_) => defaults.resend_cooldown_secs,
                Ok(secs) => secs,
            },
        }
    }
}

impl Default for RegistrationPolicy {
    fn default() -> Self {
        Self {
            document_check_timeout: DEFAULT_DOCUMENT_CHECK_TIMEOUT,
            resend_cooldown_secs: DEFAULT_RESEND_COOLDOWN_SECS,
        }
    }
}
