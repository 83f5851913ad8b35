//! Registration orchestrator.
//!
//! Drives the five-step wizard: field edits, navigation, code resend and
//! the final submission. Every state change is pushed to the
//! [`RegistrationEventPort`] as a fresh snapshot.

use std::sync::Arc;

use pb_core::ports::{RegistrationApiPort, RegistrationEventPort, SessionStorePort};
use pb_core::registration::{
    format, AccountKind, RegistrationField, RegistrationSnapshot, WizardStep,
};
use tracing::{debug, info, info_span, warn, Instrument};

use super::context::RegistrationContext;
use super::policy::RegistrationPolicy;
use super::resend_timer::ResendTimer;
use super::submit::{RegistrationOutcome, SubmitRegistration};
use super::validators::StepValidator;

/// Errors produced by the registration orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationFlowError {
    #[error("a step validation is already in progress")]
    Busy,
}

/// What a call to [`RegistrationOrchestrator::next_step`] did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Advanced { from: WizardStep, to: WizardStep },
    /// Validation failed; the error map holds the feedback.
    Rejected { step: WizardStep },
    /// Account created and wizard state discarded.
    Submitted(RegistrationOutcome),
    /// Account creation failed; the user stays on the last step.
    SubmissionFailed,
}

pub struct RegistrationOrchestrator {
    context: Arc<RegistrationContext>,
    validator: StepValidator,
    submit: SubmitRegistration,
    resend_timer: ResendTimer,
    event_port: Arc<dyn RegistrationEventPort>,
}

impl RegistrationOrchestrator {
    pub fn new(
        api: Arc<dyn RegistrationApiPort>,
        session_store: Arc<dyn SessionStorePort>,
        event_port: Arc<dyn RegistrationEventPort>,
        policy: RegistrationPolicy,
    ) -> Self {
        let context = RegistrationContext::default().arc();
        Self {
            validator: StepValidator::new(api.clone(), context.clone(), policy),
            submit: SubmitRegistration::new(api, session_store),
            resend_timer: ResendTimer::new(policy.resend_cooldown_secs),
            context,
            event_port,
        }
    }

    /// Applies the input mask for `field` and stores the result.
    pub async fn update_field(&self, field: RegistrationField, raw: &str) {
        let value = match field {
            RegistrationField::Document => format::format_document(raw),
            RegistrationField::Phone => format::format_phone(raw),
            _ => raw.to_string(),
        };
        self.context.update_field(field, value).await;
        self.emit().await;
    }

    pub async fn select_account_kind(&self, kind: AccountKind) {
        self.context.set_account_kind(kind).await;
        self.emit().await;
    }

    /// Validates the current step and advances, or submits on the last step.
    pub async fn next_step(&self) -> Result<StepOutcome, RegistrationFlowError> {
        let Some(loading) = self.context.begin_loading() else {
            debug!("next_step ignored, validation in flight");
            return Err(RegistrationFlowError::Busy);
        };
        self.emit().await;

        let step = self.context.step().await;
        let span = info_span!("usecase.registration.next_step", step = step.number());
        let outcome = async {
            let verdict = self.validator.validate(step).await;
            if !verdict.passed {
                info!("step rejected");
                return StepOutcome::Rejected { step };
            }

            let Some(to) = step.next() else {
                return self.submit_record().await;
            };

            self.context.clear_all_errors().await;
            self.validator.report(&verdict.notices).await;
            self.enter_step(to).await;
            info!(from = step.number(), to = to.number(), "step advanced");
            StepOutcome::Advanced { from: step, to }
        }
        .instrument(span)
        .await;

        drop(loading);
        self.emit().await;
        Ok(outcome)
    }

    /// Clears errors and moves back one step. No validation runs.
    pub async fn prev_step(&self) -> Result<WizardStep, RegistrationFlowError> {
        if self.context.is_loading() {
            return Err(RegistrationFlowError::Busy);
        }
        let step = self.context.step().await;
        let to = step.previous().unwrap_or(WizardStep::FIRST);
        self.context.clear_all_errors().await;
        if to != step {
            self.enter_step(to).await;
            debug!(from = step.number(), to = to.number(), "step went back");
        }
        self.emit().await;
        Ok(to)
    }

    /// Re-dispatches the verification code once the cooldown has elapsed.
    ///
    /// Returns `Ok(false)` without side effects outside step 3 or while the
    /// cooldown is still running.
    pub async fn resend_code(&self) -> Result<bool, RegistrationFlowError> {
        let Some(loading) = self.context.begin_loading() else {
            debug!("resend ignored, validation in flight");
            return Err(RegistrationFlowError::Busy);
        };
        if self.context.step().await != WizardStep::Verification || !self.resend_timer.is_ready()
        {
            debug!(remaining = ?self.resend_timer.remaining(), "resend not available");
            return Ok(false);
        }

        // Navigation stays blocked until the dispatch settles.
        self.emit().await;
        let email = self.context.record().await.email;
        self.resend_timer.start();
        let span = info_span!("usecase.registration.resend_code");
        if let Err(err) = self.validator.dispatch_code(&email).instrument(span).await {
            warn!(error = %err, "verification code re-dispatch failed");
            self.validator.report(&[err]).await;
        } else {
            info!("verification code re-dispatched");
        }

        drop(loading);
        self.emit().await;
        Ok(true)
    }

    /// Discards the wizard without submitting.
    pub async fn abandon(&self) {
        self.resend_timer.stop();
        self.context.reset().await;
        info!("registration abandoned");
        self.emit().await;
    }

    pub async fn snapshot(&self) -> RegistrationSnapshot {
        self.context
            .snapshot(self.resend_timer.remaining())
            .await
    }

    async fn submit_record(&self) -> StepOutcome {
        let record = self.context.record().await;
        match self.submit.execute(&record).await {
            Ok(outcome) => {
                self.resend_timer.stop();
                self.context.reset().await;
                StepOutcome::Submitted(outcome)
            }
            Err(err) => {
                self.validator.report(&[err]).await;
                StepOutcome::SubmissionFailed
            }
        }
    }

    /// The resend countdown only runs while step 3 is shown.
    async fn enter_step(&self, step: WizardStep) {
        self.context.set_step(step).await;
        if step == WizardStep::Verification {
            self.resend_timer.start();
        } else {
            self.resend_timer.stop();
        }
    }

    async fn emit(&self) {
        let snapshot = self.snapshot().await;
        self.event_port.emit_registration_changed(snapshot).await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pb_core::ports::{CodeDispatchResponse, UniquenessResponse};

    use super::*;
    use crate::mocks::{MockRegistrationApi, MockRegistrationEvents, MockSessionStore};

    fn quiet_events() -> Arc<MockRegistrationEvents> {
        let mut events = MockRegistrationEvents::new();
        events.expect_emit_registration_changed().returning(|_| ());
        Arc::new(events)
    }

    fn orchestrator(api: MockRegistrationApi) -> RegistrationOrchestrator {
        RegistrationOrchestrator::new(
            Arc::new(api),
            Arc::new(MockSessionStore::new()),
            quiet_events(),
            RegistrationPolicy::default(),
        )
    }

    async fn fill_identity(orchestrator: &RegistrationOrchestrator) {
        orchestrator
            .update_field(RegistrationField::Document, "12345678901")
            .await;
        orchestrator
            .update_field(RegistrationField::FullName, "Ana Souza")
            .await;
        orchestrator
            .update_field(RegistrationField::Phone, "11987654321")
            .await;
    }

    #[tokio::test]
    async fn update_field_applies_masks() {
        let orchestrator = orchestrator(MockRegistrationApi::new());

        fill_identity(&orchestrator).await;

        let record = orchestrator.snapshot().await.record;
        assert_eq!(record.document, "123.456.789-01");
        assert_eq!(record.phone, "11 98765-4321");
        assert_eq!(record.full_name, "Ana Souza");
    }

    #[tokio::test]
    async fn every_change_is_emitted() {
        let mut events = MockRegistrationEvents::new();
        events
            .expect_emit_registration_changed()
            .withf(|snapshot| snapshot.record.city == "Recife")
            .times(1)
            .returning(|_| ());
        let orchestrator = RegistrationOrchestrator::new(
            Arc::new(MockRegistrationApi::new()),
            Arc::new(MockSessionStore::new()),
            Arc::new(events),
            RegistrationPolicy::default(),
        );

        orchestrator
            .update_field(RegistrationField::City, "Recife")
            .await;
    }

    #[tokio::test]
    async fn prev_step_on_first_step_stays_put_and_clears_errors() {
        let orchestrator = orchestrator(MockRegistrationApi::new());
        assert!(matches!(
            orchestrator.next_step().await,
            Ok(StepOutcome::Rejected {
                step: WizardStep::Identity
            })
        ));
        assert!(!orchestrator.snapshot().await.errors.is_empty());

        let step = orchestrator.prev_step().await.unwrap();

        assert_eq!(step, WizardStep::Identity);
        assert!(orchestrator.snapshot().await.errors.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn entering_verification_arms_cooldown_and_leaving_disarms_it() {
        let mut api = MockRegistrationApi::new();
        api.expect_check_document_in_use()
            .returning(|_| Ok(UniquenessResponse { in_use: false }));
        api.expect_check_email_in_use()
            .returning(|_| Ok(UniquenessResponse { in_use: false }));
        api.expect_dispatch_verification_code()
            .returning(|_| Ok(CodeDispatchResponse { ok: true }));
        let orchestrator = orchestrator(api);
        fill_identity(&orchestrator).await;
        orchestrator.next_step().await.unwrap();
        orchestrator
            .update_field(RegistrationField::Email, "ana@bank.com")
            .await;
        orchestrator
            .update_field(RegistrationField::Password, "secret1")
            .await;
        orchestrator
            .update_field(RegistrationField::PasswordConfirmation, "secret1")
            .await;

        let outcome = orchestrator.next_step().await.unwrap();
        assert_eq!(
            outcome,
            StepOutcome::Advanced {
                from: WizardStep::Credentials,
                to: WizardStep::Verification
            }
        );
        assert_eq!(orchestrator.snapshot().await.resend_cooldown, Some(60));

        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(orchestrator.snapshot().await.resend_cooldown, Some(58));

        orchestrator.prev_step().await.unwrap();
        assert_eq!(orchestrator.snapshot().await.resend_cooldown, None);
    }

    #[tokio::test]
    async fn resend_outside_verification_is_a_no_op() {
        let mut api = MockRegistrationApi::new();
        api.expect_dispatch_verification_code().times(0);
        let orchestrator = orchestrator(api);

        assert_eq!(orchestrator.resend_code().await, Ok(false));
    }

    #[tokio::test]
    async fn abandon_discards_everything() {
        let orchestrator = orchestrator(MockRegistrationApi::new());
        orchestrator
            .update_field(RegistrationField::City, "Recife")
            .await;
        orchestrator.select_account_kind(AccountKind::Savings).await;

        orchestrator.abandon().await;

        assert_eq!(orchestrator.snapshot().await, RegistrationSnapshot::default());
    }
}
