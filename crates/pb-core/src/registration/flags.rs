use serde::{Deserialize, Serialize};

use super::RegistrationField;

/// Memoized remote uniqueness results.
///
/// A flag is `true` only while the value that passed the check is still the
/// current value of its field. Editing the field resets it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationFlags {
    pub document_checked: bool,
    pub email_checked: bool,
}

impl VerificationFlags {
    pub fn is_checked(&self, field: RegistrationField) -> bool {
        match field {
            RegistrationField::Document => self.document_checked,
            RegistrationField::Email => self.email_checked,
            _ => false,
        }
    }

    /// Records a successful uniqueness check. Fields without a remote check
    /// are ignored.
    pub fn mark_checked(&mut self, field: RegistrationField) {
        match field {
            RegistrationField::Document => self.document_checked = true,
            RegistrationField::Email => self.email_checked = true,
            _ => {}
        }
    }

    /// Drops the flag coupled to `field`. Returns whether a set flag was reset.
    pub fn invalidate(&mut self, field: RegistrationField) -> bool {
        let slot = match field {
            RegistrationField::Document => &mut self.document_checked,
            RegistrationField::Email => &mut self.email_checked,
            _ => return false,
        };
        std::mem::replace(slot, false)
    }
}
