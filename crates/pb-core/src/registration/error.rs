use serde::{Deserialize, Serialize};

use super::RegistrationField;

/// Remote round-trips performed while validating the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RemoteCheck {
    DocumentUniqueness,
    EmailUniqueness,
    CodeDispatch,
    CodeVerification,
}

impl RemoteCheck {
    /// Field that receives this check's error message.
    pub fn field(self) -> RegistrationField {
        match self {
            RemoteCheck::DocumentUniqueness => RegistrationField::Document,
            RemoteCheck::EmailUniqueness => RegistrationField::Email,
            RemoteCheck::CodeDispatch | RemoteCheck::CodeVerification => {
                RegistrationField::VerificationCode
            }
        }
    }
}

/// Local rule violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationIssue {
    Required,
    DocumentLength,
    PhoneLength,
    EmailFormat,
    PasswordTooShort { min_len: usize },
    PasswordMismatch,
    CodeFormat,
    /// The server rejected the verification code.
    CodeRejected,
    StreetNumberNotNumeric,
    RegionLength,
    AccountPasswordFormat,
    AccountPasswordMismatch,
    /// The field was edited while its remote check was in flight.
    ChangedDuringCheck,
}

/// Registration error taxonomy.
///
/// Every variant is recoverable and scoped to a field or to the current
/// step; none of them ends the wizard.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    /// Local format or required-field failure.
    #[error("invalid {field}: {issue:?}")]
    Validation {
        field: RegistrationField,
        issue: ValidationIssue,
    },
    /// Uniqueness check says the value is already registered.
    #[error("{field} already registered")]
    Conflict { field: RegistrationField },
    /// Remote check did not settle before the client-side deadline.
    #[error("{check:?} timed out")]
    Timeout { check: RemoteCheck },
    /// Remote call failed for any other reason.
    #[error("{check:?} failed: {reason}")]
    Transport { check: RemoteCheck, reason: String },
    /// Final account-creation call failed.
    #[error("account creation failed: {reason}")]
    Submission { reason: String },
}

impl RegistrationError {
    pub fn validation(field: RegistrationField, issue: ValidationIssue) -> Self {
        RegistrationError::Validation { field, issue }
    }

    /// Field the message is attached to; `None` for step-scoped errors.
    pub fn field(&self) -> Option<RegistrationField> {
        match self {
            RegistrationError::Validation { field, .. } | RegistrationError::Conflict { field } => {
                Some(*field)
            }
            RegistrationError::Timeout { check } | RegistrationError::Transport { check, .. } => {
                Some(check.field())
            }
            RegistrationError::Submission { .. } => None,
        }
    }

    /// Message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            RegistrationError::Validation { field, issue } => validation_message(*field, *issue),
            RegistrationError::Conflict { field } => match field {
                RegistrationField::Document => {
                    "This CPF is already used by another account.".to_string()
                }
                RegistrationField::Email => {
                    "This e-mail is already used by another account.".to_string()
                }
                other => format!("{} is already registered.", other.label()),
            },
            RegistrationError::Timeout { check } => match check {
                RemoteCheck::DocumentUniqueness => {
                    "CPF verification took too long. Try again.".to_string()
                }
                RemoteCheck::EmailUniqueness => {
                    "E-mail verification took too long. Try again.".to_string()
                }
                RemoteCheck::CodeDispatch => {
                    "Sending the verification code took too long. Try again.".to_string()
                }
                RemoteCheck::CodeVerification => {
                    "Verifying the code took too long. Try again.".to_string()
                }
            },
            RegistrationError::Transport { check, .. } => match check {
                RemoteCheck::DocumentUniqueness => {
                    "Could not check whether this CPF is already registered. Try again."
                        .to_string()
                }
                RemoteCheck::EmailUniqueness => {
                    "Could not check whether this e-mail is already registered. Try again."
                        .to_string()
                }
                RemoteCheck::CodeDispatch => {
                    "Could not send the verification code. Try again.".to_string()
                }
                RemoteCheck::CodeVerification => {
                    "Error verifying the code. Try again.".to_string()
                }
            },
            RegistrationError::Submission { .. } => {
                "An error occurred while creating your account. Try again.".to_string()
            }
        }
    }
}

fn validation_message(field: RegistrationField, issue: ValidationIssue) -> String {
    match issue {
        ValidationIssue::Required => format!("{} is required.", field.label()),
        ValidationIssue::DocumentLength => "Enter a CPF with 11 digits.".to_string(),
        ValidationIssue::PhoneLength => {
            "Enter a phone with 11 digits (including the mobile 9).".to_string()
        }
        ValidationIssue::EmailFormat => "Enter a valid e-mail.".to_string(),
        ValidationIssue::PasswordTooShort { min_len } => {
            format!("The password must have at least {min_len} characters.")
        }
        ValidationIssue::PasswordMismatch => "Passwords do not match.".to_string(),
        ValidationIssue::CodeFormat => "The code must have 6 digits.".to_string(),
        ValidationIssue::CodeRejected => "Invalid verification code.".to_string(),
        ValidationIssue::StreetNumberNotNumeric => "The number must be numeric.".to_string(),
        ValidationIssue::RegionLength => "UF must have 2 characters.".to_string(),
        ValidationIssue::AccountPasswordFormat => {
            "The account password must have exactly 6 numeric digits.".to_string()
        }
        ValidationIssue::AccountPasswordMismatch => "Account passwords do not match.".to_string(),
        ValidationIssue::ChangedDuringCheck => {
            format!("{} changed while it was being checked. Try again.", field.label())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_and_transport_messages_differ_from_conflict() {
        let conflict = RegistrationError::Conflict {
            field: RegistrationField::Document,
        };
        let timeout = RegistrationError::Timeout {
            check: RemoteCheck::DocumentUniqueness,
        };
        let transport = RegistrationError::Transport {
            check: RemoteCheck::DocumentUniqueness,
            reason: "connection refused".into(),
        };

        assert_eq!(conflict.field(), Some(RegistrationField::Document));
        assert_eq!(timeout.field(), Some(RegistrationField::Document));
        assert_eq!(transport.field(), Some(RegistrationField::Document));

        let messages = [
            conflict.user_message(),
            timeout.user_message(),
            transport.user_message(),
        ];
        assert_ne!(messages[0], messages[1]);
        assert_ne!(messages[0], messages[2]);
        assert_ne!(messages[1], messages[2]);
    }

    #[test]
    fn code_checks_report_on_the_code_field() {
        assert_eq!(
            RemoteCheck::CodeDispatch.field(),
            RegistrationField::VerificationCode
        );
        assert_eq!(
            RemoteCheck::CodeVerification.field(),
            RegistrationField::VerificationCode
        );
    }

    #[test]
    fn submission_error_is_step_scoped() {
        let err = RegistrationError::Submission {
            reason: "HTTP 500".into(),
        };
        assert_eq!(err.field(), None);
        assert!(!err.user_message().contains("500"));
    }

    #[test]
    fn required_message_uses_field_label() {
        let err = RegistrationError::validation(RegistrationField::City, ValidationIssue::Required);
        assert_eq!(err.user_message(), "City is required.");
    }

    #[test]
    fn changed_during_check_names_the_field() {
        let err = RegistrationError::validation(
            RegistrationField::City,
            ValidationIssue::ChangedDuringCheck,
        );
        assert_eq!(
            err.user_message(),
            "City changed while it was being checked. Try again."
        );
    }
}
