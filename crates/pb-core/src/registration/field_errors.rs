use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::RegistrationField;

/// Per-field error messages shown next to the inputs.
///
/// An entry exists only for a field currently believed invalid. The `form`
/// slot holds step-scoped failures that belong to no single field
/// (account creation).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorMap {
    fields: BTreeMap<RegistrationField, String>,
    form: Option<String>,
}

impl FieldErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: RegistrationField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: RegistrationField) -> bool {
        self.fields.contains_key(&field)
    }

    /// Records `message`, replacing any earlier one. An empty message clears
    /// the entry instead.
    pub fn set(&mut self, field: RegistrationField, message: impl Into<String>) {
        let message = message.into();
        if message.is_empty() {
            self.fields.remove(&field);
        } else {
            self.fields.insert(field, message);
        }
    }

    /// Returns whether an entry was present.
    pub fn clear_field(&mut self, field: RegistrationField) -> bool {
        self.fields.remove(&field).is_some()
    }

    pub fn form_error(&self) -> Option<&str> {
        self.form.as_deref()
    }

    pub fn set_form_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.form = (!message.is_empty()).then_some(message);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.form = None;
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_none()
    }

    pub fn len(&self) -> usize {
        self.fields.len() + usize::from(self.form.is_some())
    }

    pub fn iter(&self) -> impl Iterator<Item = (RegistrationField, &str)> {
        self.fields.iter().map(|(field, msg)| (*field, msg.as_str()))
    }
}
