use std::fmt;

use serde::{Deserialize, Serialize};

use super::format::digits_only;
use super::{AccountKind, RegistrationField};

/// In-progress registration data.
///
/// Values are kept as the user typed them (masked). Rules normalize before
/// checking; the record itself never rewrites a value.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    // identity
    pub document: String,
    pub full_name: String,
    pub phone: String,
    // credentials
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    // verification
    pub verification_code: String,
    // address
    pub street: String,
    pub street_number: String,
    pub city: String,
    pub region: String,
    // account
    pub account_kind: AccountKind,
    pub account_password: String,
    pub account_password_confirmation: String,
}

impl RegistrationRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: RegistrationField) -> &str {
        match field {
            RegistrationField::Document => &self.document,
            RegistrationField::FullName => &self.full_name,
            RegistrationField::Phone => &self.phone,
            RegistrationField::Email => &self.email,
            RegistrationField::Password => &self.password,
            RegistrationField::PasswordConfirmation => &self.password_confirmation,
            RegistrationField::VerificationCode => &self.verification_code,
            RegistrationField::Street => &self.street,
            RegistrationField::StreetNumber => &self.street_number,
            RegistrationField::City => &self.city,
            RegistrationField::Region => &self.region,
            RegistrationField::AccountPassword => &self.account_password,
            RegistrationField::AccountPasswordConfirmation => &self.account_password_confirmation,
        }
    }

    pub fn set(&mut self, field: RegistrationField, value: impl Into<String>) {
        *self.slot_mut(field) = value.into();
    }

    fn slot_mut(&mut self, field: RegistrationField) -> &mut String {
        match field {
            RegistrationField::Document => &mut self.document,
            RegistrationField::FullName => &mut self.full_name,
            RegistrationField::Phone => &mut self.phone,
            RegistrationField::Email => &mut self.email,
            RegistrationField::Password => &mut self.password,
            RegistrationField::PasswordConfirmation => &mut self.password_confirmation,
            RegistrationField::VerificationCode => &mut self.verification_code,
            RegistrationField::Street => &mut self.street,
            RegistrationField::StreetNumber => &mut self.street_number,
            RegistrationField::City => &mut self.city,
            RegistrationField::Region => &mut self.region,
            RegistrationField::AccountPassword => &mut self.account_password,
            RegistrationField::AccountPasswordConfirmation => {
                &mut self.account_password_confirmation
            }
        }
    }

    pub fn is_blank(&self, field: RegistrationField) -> bool {
        self.get(field).is_empty()
    }

    /// CPF without mask punctuation.
    pub fn document_digits(&self) -> String {
        digits_only(&self.document)
    }

    /// Phone without mask punctuation.
    pub fn phone_digits(&self) -> String {
        digits_only(&self.phone)
    }
}

impl fmt::Debug for RegistrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("RegistrationRecord");
        for field in RegistrationField::ALL {
            if field.is_secret() {
                let shown = if self.is_blank(field) { "" } else { "***" };
                dbg.field(field.as_str(), &shown);
            } else {
                dbg.field(field.as_str(), &self.get(field));
            }
        }
        dbg.field("account_kind", &self.account_kind).finish()
    }
}
