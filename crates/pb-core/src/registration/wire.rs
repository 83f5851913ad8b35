//! Account-creation request body.

use serde::{Deserialize, Serialize};

use super::rules::parse_street_number;
use super::{AccountKind, RegistrationError, RegistrationField, RegistrationRecord, ValidationIssue};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAccountRequest {
    #[serde(rename = "usuario")]
    pub user: UserPayload,
    #[serde(rename = "endereco")]
    pub address: AddressPayload,
    #[serde(rename = "conta")]
    pub account: AccountPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPayload {
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
    /// Masked, e.g. `11 98765-4321`.
    #[serde(rename = "telefone")]
    pub phone: String,
    /// 11 digits.
    #[serde(rename = "cpf")]
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressPayload {
    #[serde(rename = "rua")]
    pub street: String,
    #[serde(rename = "numero")]
    pub number: i64,
    #[serde(rename = "cidade")]
    pub city: String,
    /// Upper-case UF, e.g. `SP`.
    #[serde(rename = "uf")]
    pub region: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountPayload {
    #[serde(rename = "tipo_conta")]
    pub kind: AccountKind,
    pub password: String,
}

impl NewAccountRequest {
    /// Splits the record into the identity/address/account sub-objects,
    /// normalizing the CPF to digits, the UF to upper case and the street
    /// number to an integer.
    pub fn from_record(record: &RegistrationRecord) -> Result<Self, RegistrationError> {
        let number = parse_street_number(&record.street_number).ok_or_else(|| {
            RegistrationError::validation(
                RegistrationField::StreetNumber,
                ValidationIssue::StreetNumberNotNumeric,
            )
        })?;

        Ok(Self {
            user: UserPayload {
                email: record.email.clone(),
                full_name: record.full_name.clone(),
                password: record.password.clone(),
                confirm_password: record.password_confirmation.clone(),
                phone: record.phone.clone(),
                document: record.document_digits(),
            },
            address: AddressPayload {
                street: record.street.clone(),
                number,
                city: record.city.clone(),
                region: record.region.to_uppercase(),
            },
            account: AccountPayload {
                kind: record.account_kind,
                password: record.account_password.clone(),
            },
        })
    }
}
