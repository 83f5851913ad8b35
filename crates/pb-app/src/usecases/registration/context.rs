use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use pb_core::registration::{
    AccountKind, FieldErrorMap, RegistrationField, RegistrationRecord, RegistrationSnapshot,
    VerificationFlags, WizardStep,
};
use tokio::sync::Mutex;
use tracing::debug;

#[derive(Debug, Default)]
struct FormState {
    record: RegistrationRecord,
    errors: FieldErrorMap,
    step: WizardStep,
    flags: VerificationFlags,
}

/// Form state store for one wizard session.
///
/// Holds the in-progress record, the per-field error map, the current step
/// and the verification flags. The `loading` flag gates navigation so that
/// only one step validation is in flight at a time.
pub struct RegistrationContext {
    state: Mutex<FormState>,
    loading: AtomicBool,
}

/// Clears `loading` when dropped.
pub(crate) struct LoadingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl RegistrationContext {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FormState::default()),
            loading: AtomicBool::new(false),
        }
    }

    /// Returns the context wrapped in Arc for shared ownership.
    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Stores `value` verbatim under `field`.
    ///
    /// Editing the CPF or e-mail drops its verification flag, and any error
    /// recorded for `field` is cleared.
    pub async fn update_field(&self, field: RegistrationField, value: impl Into<String>) {
        let mut state = self.state.lock().await;
        state.record.set(field, value);
        if state.flags.invalidate(field) {
            debug!(field = %field, "verification flag reset by edit");
        }
        state.errors.clear_field(field);
    }

    pub async fn set_account_kind(&self, kind: AccountKind) {
        self.state.lock().await.record.account_kind = kind;
    }

    /// Records `message` for `field`, replacing any earlier message.
    pub async fn set_field_error(&self, field: RegistrationField, message: impl Into<String>) {
        self.state.lock().await.errors.set(field, message);
    }

    pub async fn set_form_error(&self, message: impl Into<String>) {
        self.state.lock().await.errors.set_form_error(message);
    }

    /// Empties the error map. Called at the start of every validation pass.
    pub async fn clear_all_errors(&self) {
        self.state.lock().await.errors.clear();
    }

    pub async fn record(&self) -> RegistrationRecord {
        self.state.lock().await.record.clone()
    }

    pub async fn errors(&self) -> FieldErrorMap {
        self.state.lock().await.errors.clone()
    }

    pub async fn step(&self) -> WizardStep {
        self.state.lock().await.step
    }

    pub(crate) async fn set_step(&self, step: WizardStep) {
        self.state.lock().await.step = step;
    }

    pub async fn flags(&self) -> VerificationFlags {
        self.state.lock().await.flags
    }

    /// Marks `field` as remotely checked, but only if it still holds
    /// `checked_value`. Returns `false` when the user edited the field while
    /// the check was in flight.
    pub(crate) async fn mark_checked_if_current(
        &self,
        field: RegistrationField,
        checked_value: &str,
    ) -> bool {
        let mut state = self.state.lock().await;
        if state.record.get(field) != checked_value {
            return false;
        }
        state.flags.mark_checked(field);
        true
    }

    /// Discards record, errors, flags and returns to step 1.
    pub async fn reset(&self) {
        *self.state.lock().await = FormState::default();
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Sets `loading`, or returns `None` if it was already set.
    pub(crate) fn begin_loading(&self) -> Option<LoadingGuard<'_>> {
        self.loading
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| LoadingGuard {
                flag: &self.loading,
            })
    }

    pub async fn snapshot(&self, resend_cooldown: Option<u32>) -> RegistrationSnapshot {
        let state = self.state.lock().await;
        RegistrationSnapshot {
            record: state.record.clone(),
            errors: state.errors.clone(),
            step: state.step,
            loading: self.is_loading(),
            flags: state.flags,
            resend_cooldown,
        }
    }
}

impl Default for RegistrationContext {
    fn default() -> Self {
        Self::new()
    }
}
