use std::fmt;

use serde::{Deserialize, Serialize};

use super::RegistrationField;

/// Registration wizard step.
///
/// Steps are strictly ordered and never skipped. Submission happens only
/// from [`WizardStep::Account`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum WizardStep {
    /// Step 1: CPF, name and phone.
    #[default]
    Identity,
    /// Step 2: e-mail and password.
    Credentials,
    /// Step 3: e-mailed verification code.
    Verification,
    /// Step 4: address.
    Address,
    /// Step 5: account kind and account password.
    Account,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::Identity;
    pub const LAST: WizardStep = WizardStep::Account;

    /// 1-based position of the step.
    pub fn number(self) -> u8 {
        match self {
            WizardStep::Identity => 1,
            WizardStep::Credentials => 2,
            WizardStep::Verification => 3,
            WizardStep::Address => 4,
            WizardStep::Account => 5,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(WizardStep::Identity),
            2 => Some(WizardStep::Credentials),
            3 => Some(WizardStep::Verification),
            4 => Some(WizardStep::Address),
            5 => Some(WizardStep::Account),
            _ => None,
        }
    }

    /// Following step, `None` at the terminal step.
    pub fn next(self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    /// Preceding step, `None` at the first step.
    pub fn previous(self) -> Option<Self> {
        self.number().checked_sub(1).and_then(Self::from_number)
    }

    pub fn is_terminal(self) -> bool {
        self == Self::LAST
    }

    /// Fields collected on this step.
    pub fn fields(self) -> &'static [RegistrationField] {
        match self {
            WizardStep::Identity => &[
                RegistrationField::Document,
                RegistrationField::FullName,
                RegistrationField::Phone,
            ],
            WizardStep::Credentials => &[
                RegistrationField::Email,
                RegistrationField::Password,
                RegistrationField::PasswordConfirmation,
            ],
            WizardStep::Verification => &[RegistrationField::VerificationCode],
            WizardStep::Address => &[
                RegistrationField::Street,
                RegistrationField::StreetNumber,
                RegistrationField::City,
                RegistrationField::Region,
            ],
            WizardStep::Account => &[
                RegistrationField::AccountPassword,
                RegistrationField::AccountPasswordConfirmation,
            ],
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/5", self.number())
    }
}
