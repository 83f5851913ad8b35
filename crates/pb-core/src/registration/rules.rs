//! Local (synchronous) rules for each wizard step.
//!
//! Each check returns every violation found, in field order. A field with a
//! missing value reports only `Required`; format rules apply to non-empty
//! values.

use once_cell::sync::Lazy;
use regex::Regex;

use super::format::{DOCUMENT_DIGITS, PHONE_DIGITS};
use super::{RegistrationError, RegistrationField, RegistrationRecord, ValidationIssue, WizardStep};

pub const MIN_PASSWORD_LEN: usize = 6;
pub const VERIFICATION_CODE_DIGITS: usize = 6;
pub const ACCOUNT_PASSWORD_DIGITS: usize = 6;
pub const REGION_LEN: usize = 2;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// `local-part@domain.tld` shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Integer value of a street number: the leading run of digits, so `"12A"`
/// is `12`. `None` when the value does not start with a digit.
pub fn parse_street_number(raw: &str) -> Option<i64> {
    let digits: String = raw
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

fn is_exact_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn invalid(field: RegistrationField, issue: ValidationIssue) -> RegistrationError {
    RegistrationError::validation(field, issue)
}

fn require(
    record: &RegistrationRecord,
    fields: &[RegistrationField],
    issues: &mut Vec<RegistrationError>,
) {
    for field in fields {
        if record.is_blank(*field) {
            issues.push(invalid(*field, ValidationIssue::Required));
        }
    }
}

/// Step 1: CPF, name, phone.
pub fn check_identity(record: &RegistrationRecord) -> Vec<RegistrationError> {
    let mut issues = Vec::new();
    require(record, WizardStep::Identity.fields(), &mut issues);

    if !record.is_blank(RegistrationField::Document)
        && record.document_digits().len() != DOCUMENT_DIGITS
    {
        issues.push(invalid(
            RegistrationField::Document,
            ValidationIssue::DocumentLength,
        ));
    }
    if !record.is_blank(RegistrationField::Phone) && record.phone_digits().len() != PHONE_DIGITS {
        issues.push(invalid(RegistrationField::Phone, ValidationIssue::PhoneLength));
    }
    issues
}

/// Step 2: e-mail, password, confirmation.
pub fn check_credentials(record: &RegistrationRecord) -> Vec<RegistrationError> {
    let mut issues = Vec::new();
    require(record, WizardStep::Credentials.fields(), &mut issues);

    if !record.email.is_empty() && !is_valid_email(&record.email) {
        issues.push(invalid(RegistrationField::Email, ValidationIssue::EmailFormat));
    }
    if !record.password.is_empty() && record.password.chars().count() < MIN_PASSWORD_LEN {
        issues.push(invalid(
            RegistrationField::Password,
            ValidationIssue::PasswordTooShort {
                min_len: MIN_PASSWORD_LEN,
            },
        ));
    }
    if !record.password.is_empty()
        && !record.password_confirmation.is_empty()
        && record.password != record.password_confirmation
    {
        issues.push(invalid(
            RegistrationField::PasswordConfirmation,
            ValidationIssue::PasswordMismatch,
        ));
    }
    issues
}

/// Step 3, local part: the code must be six digits before it is sent for
/// verification.
pub fn check_verification_code(record: &RegistrationRecord) -> Vec<RegistrationError> {
    let mut issues = Vec::new();
    require(record, WizardStep::Verification.fields(), &mut issues);

    if !record.verification_code.is_empty()
        && !is_exact_digits(&record.verification_code, VERIFICATION_CODE_DIGITS)
    {
        issues.push(invalid(
            RegistrationField::VerificationCode,
            ValidationIssue::CodeFormat,
        ));
    }
    issues
}

/// Step 4: street, number, city, UF.
pub fn check_address(record: &RegistrationRecord) -> Vec<RegistrationError> {
    let mut issues = Vec::new();
    require(record, WizardStep::Address.fields(), &mut issues);

    if !record.street_number.is_empty() && parse_street_number(&record.street_number).is_none() {
        issues.push(invalid(
            RegistrationField::StreetNumber,
            ValidationIssue::StreetNumberNotNumeric,
        ));
    }
    if !record.region.is_empty() && record.region.chars().count() != REGION_LEN {
        issues.push(invalid(RegistrationField::Region, ValidationIssue::RegionLength));
    }
    issues
}

/// Step 5: account password and confirmation.
pub fn check_account(record: &RegistrationRecord) -> Vec<RegistrationError> {
    let mut issues = Vec::new();
    require(record, WizardStep::Account.fields(), &mut issues);

    if !record.account_password.is_empty()
        && !is_exact_digits(&record.account_password, ACCOUNT_PASSWORD_DIGITS)
    {
        issues.push(invalid(
            RegistrationField::AccountPassword,
            ValidationIssue::AccountPasswordFormat,
        ));
    }
    if !record.account_password.is_empty()
        && !record.account_password_confirmation.is_empty()
        && record.account_password != record.account_password_confirmation
    {
        issues.push(invalid(
            RegistrationField::AccountPasswordConfirmation,
            ValidationIssue::AccountPasswordMismatch,
        ));
    }
    issues
}

/// Local rules of `step`.
pub fn check_step(step: WizardStep, record: &RegistrationRecord) -> Vec<RegistrationError> {
    match step {
        WizardStep::Identity => check_identity(record),
        WizardStep::Credentials => check_credentials(record),
        WizardStep::Verification => check_verification_code(record),
        WizardStep::Address => check_address(record),
        WizardStep::Account => check_account(record),
    }
}
