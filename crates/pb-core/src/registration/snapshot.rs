use serde::{Deserialize, Serialize};

use super::{FieldErrorMap, RegistrationRecord, VerificationFlags, WizardStep};

/// View model handed to the presentation layer after every change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationSnapshot {
    pub record: RegistrationRecord,
    pub errors: FieldErrorMap,
    pub step: WizardStep,
    /// A step validation or submission is in flight; "next" must be disabled.
    pub loading: bool,
    pub flags: VerificationFlags,
    /// Seconds until a new code may be requested. `None` outside step 3.
    pub resend_cooldown: Option<u32>,
}

impl RegistrationSnapshot {
    pub fn can_resend_code(&self) -> bool {
        self.step == WizardStep::Verification && self.resend_cooldown == Some(0) && !self.loading
    }
}
