use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::WizardStep;

/// Editable text fields of a [`RegistrationRecord`](super::RegistrationRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationField {
    /// CPF document number, 11 digits once normalized.
    Document,
    FullName,
    /// Mobile phone: area code + 9-prefixed number, 11 digits once normalized.
    Phone,
    Email,
    Password,
    PasswordConfirmation,
    VerificationCode,
    Street,
    StreetNumber,
    City,
    /// Two-letter state code (UF).
    Region,
    AccountPassword,
    AccountPasswordConfirmation,
}

impl RegistrationField {
    pub const ALL: [RegistrationField; 13] = [
        RegistrationField::Document,
        RegistrationField::FullName,
        RegistrationField::Phone,
        RegistrationField::Email,
        RegistrationField::Password,
        RegistrationField::PasswordConfirmation,
        RegistrationField::VerificationCode,
        RegistrationField::Street,
        RegistrationField::StreetNumber,
        RegistrationField::City,
        RegistrationField::Region,
        RegistrationField::AccountPassword,
        RegistrationField::AccountPasswordConfirmation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RegistrationField::Document => "document",
            RegistrationField::FullName => "full_name",
            RegistrationField::Phone => "phone",
            RegistrationField::Email => "email",
            RegistrationField::Password => "password",
            RegistrationField::PasswordConfirmation => "password_confirmation",
            RegistrationField::VerificationCode => "verification_code",
            RegistrationField::Street => "street",
            RegistrationField::StreetNumber => "street_number",
            RegistrationField::City => "city",
            RegistrationField::Region => "region",
            RegistrationField::AccountPassword => "account_password",
            RegistrationField::AccountPasswordConfirmation => "account_password_confirmation",
        }
    }

    /// Human label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            RegistrationField::Document => "CPF",
            RegistrationField::FullName => "Name",
            RegistrationField::Phone => "Phone",
            RegistrationField::Email => "E-mail",
            RegistrationField::Password => "Password",
            RegistrationField::PasswordConfirmation => "Password confirmation",
            RegistrationField::VerificationCode => "Verification code",
            RegistrationField::Street => "Street",
            RegistrationField::StreetNumber => "Number",
            RegistrationField::City => "City",
            RegistrationField::Region => "UF",
            RegistrationField::AccountPassword => "Account password",
            RegistrationField::AccountPasswordConfirmation => "Account password confirmation",
        }
    }

    /// The wizard step that collects this field.
    pub fn step(&self) -> WizardStep {
        match self {
            RegistrationField::Document | RegistrationField::FullName | RegistrationField::Phone => {
                WizardStep::Identity
            }
            RegistrationField::Email
            | RegistrationField::Password
            | RegistrationField::PasswordConfirmation => WizardStep::Credentials,
            RegistrationField::VerificationCode => WizardStep::Verification,
            RegistrationField::Street
            | RegistrationField::StreetNumber
            | RegistrationField::City
            | RegistrationField::Region => WizardStep::Address,
            RegistrationField::AccountPassword | RegistrationField::AccountPasswordConfirmation => {
                WizardStep::Account
            }
        }
    }

    /// Fields that must never reach logs.
    pub fn is_secret(&self) -> bool {
        matches!(
            self,
            RegistrationField::Password
                | RegistrationField::PasswordConfirmation
                | RegistrationField::VerificationCode
                | RegistrationField::AccountPassword
                | RegistrationField::AccountPasswordConfirmation
        )
    }
}

impl fmt::Display for RegistrationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown registration field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for RegistrationField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        RegistrationField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == wanted)
            .or(match wanted.as_str() {
                "cpf" => Some(RegistrationField::Document),
                "name" => Some(RegistrationField::FullName),
                "code" => Some(RegistrationField::VerificationCode),
                "number" => Some(RegistrationField::StreetNumber),
                "uf" | "state" => Some(RegistrationField::Region),
                _ => None,
            })
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Kind of bank account opened at the end of registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AccountKind {
    /// Conta corrente.
    #[default]
    #[serde(rename = "corrente")]
    Checking,
    /// Conta poupança.
    #[serde(rename = "poupanca")]
    Savings,
}

impl AccountKind {
    pub fn as_wire_str(&self) -> &'static str {
        match self {
            AccountKind::Checking => "corrente",
            AccountKind::Savings => "poupanca",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccountKind::Checking => f.write_str("checking"),
            AccountKind::Savings => f.write_str("savings"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown account kind: {0}")]
pub struct UnknownAccountKind(pub String);

impl FromStr for AccountKind {
    type Err = UnknownAccountKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checking" | "corrente" => Ok(AccountKind::Checking),
            "savings" | "poupanca" => Ok(AccountKind::Savings),
            _ => Err(UnknownAccountKind(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_parses_canonical_names_and_aliases() {
        for field in RegistrationField::ALL {
            assert_eq!(field.as_str().parse::<RegistrationField>(), Ok(field));
        }
        assert_eq!("cpf".parse(), Ok(RegistrationField::Document));
        assert_eq!("UF".parse(), Ok(RegistrationField::Region));
        assert_eq!("street-number".parse(), Ok(RegistrationField::StreetNumber));
        assert!("nickname".parse::<RegistrationField>().is_err());
    }

    #[test]
    fn every_field_belongs_to_exactly_the_step_that_lists_it() {
        for field in RegistrationField::ALL {
            assert!(field.step().fields().contains(&field), "{field} not listed");
        }
    }

    #[test]
    fn account_kind_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&AccountKind::Savings).unwrap(),
            "\"poupanca\""
        );
        assert_eq!("corrente".parse(), Ok(AccountKind::Checking));
        assert_eq!(AccountKind::default(), AccountKind::Checking);
    }
}
