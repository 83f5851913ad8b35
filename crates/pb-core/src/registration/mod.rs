//! Account registration domain.
//!
//! Data model, input masks and local rules for the five-step registration
//! wizard. Remote checks are reached through [`crate::ports`].

mod cooldown;
mod error;
mod field;
mod field_errors;
mod flags;
pub mod format;
mod record;
pub mod rules;
mod snapshot;
mod step;
pub mod wire;

pub use cooldown::{ResendCooldown, DEFAULT_RESEND_COOLDOWN_SECS};
pub use error::{RegistrationError, RemoteCheck, ValidationIssue};
pub use field::{AccountKind, RegistrationField, UnknownAccountKind, UnknownField};
pub use field_errors::FieldErrorMap;
pub use flags::VerificationFlags;
pub use record::RegistrationRecord;
pub use snapshot::RegistrationSnapshot;
pub use step::WizardStep;
pub use wire::NewAccountRequest;
