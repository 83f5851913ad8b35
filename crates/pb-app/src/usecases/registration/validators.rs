//! Step validators.
//!
//! Every pass clears the error map, runs the step's local rules and, for
//! steps 1-3, the remote round-trip. Errors are written back to the
//! [`RegistrationContext`] only by the pass currently executing.

use std::sync::Arc;

use pb_core::ports::{ApiError, RegistrationApiPort};
use pb_core::registration::{
    rules, RegistrationError, RegistrationField, RegistrationRecord, RemoteCheck, ValidationIssue,
    WizardStep,
};
use tracing::{debug, info, warn};

use super::context::RegistrationContext;
use super::policy::RegistrationPolicy;

/// Result of one validation pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepVerdict {
    pub passed: bool,
    /// Errors to surface on the next step once navigation has cleared the
    /// map (a failed code dispatch after a successful step 2).
    pub notices: Vec<RegistrationError>,
}

impl StepVerdict {
    pub fn passed() -> Self {
        Self {
            passed: true,
            notices: Vec::new(),
        }
    }

    pub fn rejected() -> Self {
        Self {
            passed: false,
            notices: Vec::new(),
        }
    }
}

fn classify(check: RemoteCheck, err: ApiError) -> RegistrationError {
    match err {
        ApiError::Timeout => RegistrationError::Timeout { check },
        other => RegistrationError::Transport {
            check,
            reason: other.to_string(),
        },
    }
}

pub struct StepValidator {
    api: Arc<dyn RegistrationApiPort>,
    context: Arc<RegistrationContext>,
    policy: RegistrationPolicy,
}

impl StepValidator {
    pub fn new(
        api: Arc<dyn RegistrationApiPort>,
        context: Arc<RegistrationContext>,
        policy: RegistrationPolicy,
    ) -> Self {
        Self {
            api,
            context,
            policy,
        }
    }

    /// Validates `step` against the current record.
    pub async fn validate(&self, step: WizardStep) -> StepVerdict {
        self.context.clear_all_errors().await;
        let record = self.context.record().await;

        let issues = rules::check_step(step, &record);
        if !issues.is_empty() {
            debug!(step = step.number(), issues = issues.len(), "local rules failed");
            self.report(&issues).await;
            return StepVerdict::rejected();
        }

        match step {
            WizardStep::Identity => self.confirm_document(&record).await,
            WizardStep::Credentials => self.confirm_email_and_dispatch(&record).await,
            WizardStep::Verification => self.confirm_code(&record).await,
            WizardStep::Address | WizardStep::Account => StepVerdict::passed(),
        }
    }

    /// Writes each error to its field, or to the form slot when it has none.
    pub async fn report(&self, errors: &[RegistrationError]) {
        for err in errors {
            let message = err.user_message();
            match err.field() {
                Some(field) => self.context.set_field_error(field, message).await,
                None => self.context.set_form_error(message).await,
            }
        }
    }

    async fn confirm_document(&self, record: &RegistrationRecord) -> StepVerdict {
        if self
            .context
            .flags()
            .await
            .is_checked(RegistrationField::Document)
        {
            debug!("document already checked for current value, skipping lookup");
            return StepVerdict::passed();
        }

        if let Err(err) = self.check_document(&record.document_digits()).await {
            warn!(error = %err, "document uniqueness check failed");
            self.report(&[err]).await;
            return StepVerdict::rejected();
        }

        if !self
            .context
            .mark_checked_if_current(RegistrationField::Document, &record.document)
            .await
        {
            debug!("document edited during lookup, result discarded");
            self.report(&[RegistrationError::validation(
                RegistrationField::Document,
                ValidationIssue::ChangedDuringCheck,
            )])
            .await;
            return StepVerdict::rejected();
        }
        info!("document uniqueness confirmed");
        StepVerdict::passed()
    }

    /// Races the lookup against the document-check deadline.
    async fn check_document(&self, document: &str) -> Result<(), RegistrationError> {
        let check = RemoteCheck::DocumentUniqueness;
        let lookup = self.api.check_document_in_use(document);
        match tokio::time::timeout(self.policy.document_check_timeout, lookup).await {
            Err(_elapsed) => Err(RegistrationError::Timeout { check }),
            Ok(Err(err)) => Err(classify(check, err)),
            Ok(Ok(response)) if response.in_use => Err(RegistrationError::Conflict {
                field: RegistrationField::Document,
            }),
            Ok(Ok(_)) => Ok(()),
        }
    }

    async fn confirm_email_and_dispatch(&self, record: &RegistrationRecord) -> StepVerdict {
        if !self.context.flags().await.is_checked(RegistrationField::Email) {
            if let Err(err) = self.check_email(&record.email).await {
                warn!(error = %err, "email uniqueness check failed");
                self.report(&[err]).await;
                return StepVerdict::rejected();
            }
            if !self
                .context
                .mark_checked_if_current(RegistrationField::Email, &record.email)
                .await
            {
                debug!("email edited during lookup, result discarded");
                self.report(&[RegistrationError::validation(
                    RegistrationField::Email,
                    ValidationIssue::ChangedDuringCheck,
                )])
                .await;
                return StepVerdict::rejected();
            }
            info!("email uniqueness confirmed");
        }

        // The step passes whether or not the code goes out.
        let notices = match self.dispatch_code(&record.email).await {
            Ok(()) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "verification code dispatch failed");
                vec![err]
            }
        };
        StepVerdict {
            passed: true,
            notices,
        }
    }

    async fn check_email(&self, email: &str) -> Result<(), RegistrationError> {
        let response = self
            .api
            .check_email_in_use(email)
            .await
            .map_err(|err| classify(RemoteCheck::EmailUniqueness, err))?;
        if response.in_use {
            return Err(RegistrationError::Conflict {
                field: RegistrationField::Email,
            });
        }
        Ok(())
    }

    /// Sends a verification code to `email`. Also used by resend.
    pub async fn dispatch_code(&self, email: &str) -> Result<(), RegistrationError> {
        let check = RemoteCheck::CodeDispatch;
        let response = self
            .api
            .dispatch_verification_code(email)
            .await
            .map_err(|err| classify(check, err))?;
        if !response.ok {
            return Err(RegistrationError::Transport {
                check,
                reason: "server refused to send the code".to_string(),
            });
        }
        debug!("verification code dispatched");
        Ok(())
    }

    /// Never short-circuited: codes are single-use and expire.
    async fn confirm_code(&self, record: &RegistrationRecord) -> StepVerdict {
        let result = self
            .api
            .verify_code(&record.email, &record.verification_code)
            .await;
        let err = match result {
            Ok(response) if response.ok => {
                info!("verification code accepted");
                return StepVerdict::passed();
            }
            Ok(_) => RegistrationError::validation(
                RegistrationField::VerificationCode,
                ValidationIssue::CodeRejected,
            ),
            Err(err) => classify(RemoteCheck::CodeVerification, err),
        };
        warn!(error = %err, "verification code not accepted");
        self.report(&[err]).await;
        StepVerdict::rejected()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;
    use pb_core::ports::{
        AccountCreationResponse, CodeDispatchResponse, CodeVerificationResponse,
        UniquenessResponse,
    };
    use pb_core::registration::NewAccountRequest;

    use super::*;
    use crate::mocks::MockRegistrationApi;

    async fn context_with_identity(document: &str) -> Arc<RegistrationContext> {
        let context = RegistrationContext::new().arc();
        context
            .update_field(RegistrationField::Document, document)
            .await;
        context
            .update_field(RegistrationField::FullName, "Ana Souza")
            .await;
        context
            .update_field(RegistrationField::Phone, "11 98765-4321")
            .await;
        context
    }

    async fn context_with_credentials() -> Arc<RegistrationContext> {
        let context = RegistrationContext::new().arc();
        context
            .update_field(RegistrationField::Email, "ana@bank.com")
            .await;
        context
            .update_field(RegistrationField::Password, "secret1")
            .await;
        context
            .update_field(RegistrationField::PasswordConfirmation, "secret1")
            .await;
        context
    }

    fn validator(api: MockRegistrationApi, context: &Arc<RegistrationContext>) -> StepValidator {
        StepValidator::new(
            Arc::new(api),
            context.clone(),
            RegistrationPolicy::default(),
        )
    }

    #[tokio::test]
    async fn document_in_use_sets_conflict_error() {
        let context = context_with_identity("123.456.789-01").await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_document_in_use()
            .withf(|document| document == "12345678901")
            .times(1)
            .returning(|_| Ok(UniquenessResponse { in_use: true }));

        let verdict = validator(api, &context).validate(WizardStep::Identity).await;

        assert!(!verdict.passed);
        assert_eq!(
            context.errors().await.get(RegistrationField::Document),
            Some("This CPF is already used by another account.")
        );
        assert!(!context.flags().await.document_checked);
    }

    #[tokio::test]
    async fn checked_document_skips_remote_lookup() {
        let context = context_with_identity("123.456.789-01").await;
        assert!(
            context
                .mark_checked_if_current(RegistrationField::Document, "123.456.789-01")
                .await
        );
        let mut api = MockRegistrationApi::new();
        api.expect_check_document_in_use().times(0);

        let verdict = validator(api, &context).validate(WizardStep::Identity).await;

        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn transport_failure_uses_generic_message() {
        let context = context_with_identity("123.456.789-01").await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_document_in_use()
            .returning(|_| Err(ApiError::Transport("connection refused".into())));

        let verdict = validator(api, &context).validate(WizardStep::Identity).await;

        assert!(!verdict.passed);
        assert_eq!(
            context.errors().await.get(RegistrationField::Document),
            Some("Could not check whether this CPF is already registered. Try again.")
        );
    }

    struct StalledDocumentApi;

    #[async_trait]
    impl RegistrationApiPort for StalledDocumentApi {
        async fn check_document_in_use(
            &self,
            _document: &str,
        ) -> Result<UniquenessResponse, ApiError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(UniquenessResponse { in_use: false })
        }

        async fn check_email_in_use(&self, _email: &str) -> Result<UniquenessResponse, ApiError> {
            unreachable!("not used")
        }

        async fn dispatch_verification_code(
            &self,
            _email: &str,
        ) -> Result<CodeDispatchResponse, ApiError> {
            unreachable!("not used")
        }

        async fn verify_code(
            &self,
            _email: &str,
            _code: &str,
        ) -> Result<CodeVerificationResponse, ApiError> {
            unreachable!("not used")
        }

        async fn create_account(
            &self,
            _request: &NewAccountRequest,
        ) -> Result<AccountCreationResponse, ApiError> {
            unreachable!("not used")
        }
    }

    #[tokio::test(start_paused = true)]
    async fn stalled_document_lookup_times_out_with_distinct_message() {
        let context = context_with_identity("123.456.789-01").await;
        let validator = StepValidator::new(
            Arc::new(StalledDocumentApi),
            context.clone(),
            RegistrationPolicy::default(),
        );

        let verdict = validator.validate(WizardStep::Identity).await;

        assert!(!verdict.passed);
        assert_eq!(
            context.errors().await.get(RegistrationField::Document),
            Some("CPF verification took too long. Try again.")
        );
    }

    #[tokio::test]
    async fn invalid_email_fails_before_any_remote_call() {
        let context = context_with_credentials().await;
        context
            .update_field(RegistrationField::Email, "not-an-email")
            .await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_email_in_use().times(0);
        api.expect_dispatch_verification_code().times(0);

        let verdict = validator(api, &context)
            .validate(WizardStep::Credentials)
            .await;

        assert!(!verdict.passed);
        assert_eq!(
            context.errors().await.get(RegistrationField::Email),
            Some("Enter a valid e-mail.")
        );
    }

    #[tokio::test]
    async fn credentials_pass_checks_email_then_dispatches_code() {
        let context = context_with_credentials().await;
        let mut api = MockRegistrationApi::new();
        let mut seq = mockall::Sequence::new();
        api.expect_check_email_in_use()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(UniquenessResponse { in_use: false }));
        api.expect_dispatch_verification_code()
            .withf(|email| email == "ana@bank.com")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(CodeDispatchResponse { ok: true }));

        let verdict = validator(api, &context)
            .validate(WizardStep::Credentials)
            .await;

        assert_eq!(verdict, StepVerdict::passed());
        assert!(context.flags().await.email_checked);
    }

    #[tokio::test]
    async fn checked_email_still_dispatches_code() {
        let context = context_with_credentials().await;
        context
            .mark_checked_if_current(RegistrationField::Email, "ana@bank.com")
            .await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_email_in_use().times(0);
        api.expect_dispatch_verification_code()
            .times(1)
            .returning(|_| Ok(CodeDispatchResponse { ok: true }));

        let verdict = validator(api, &context)
            .validate(WizardStep::Credentials)
            .await;

        assert!(verdict.passed);
    }

    #[tokio::test]
    async fn dispatch_failure_passes_step_with_notice_on_code_field() {
        let context = context_with_credentials().await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_email_in_use()
            .returning(|_| Ok(UniquenessResponse { in_use: false }));
        api.expect_dispatch_verification_code()
            .returning(|_| Err(ApiError::Transport("smtp down".into())));

        let verdict = validator(api, &context)
            .validate(WizardStep::Credentials)
            .await;

        assert!(verdict.passed);
        assert_eq!(verdict.notices.len(), 1);
        assert_eq!(
            verdict.notices[0].field(),
            Some(RegistrationField::VerificationCode)
        );
    }

    #[tokio::test]
    async fn rejected_code_sets_invalid_code_error() {
        let context = context_with_credentials().await;
        context
            .update_field(RegistrationField::VerificationCode, "000000")
            .await;
        let mut api = MockRegistrationApi::new();
        api.expect_verify_code()
            .withf(|email, code| email == "ana@bank.com" && code == "000000")
            .times(1)
            .returning(|_, _| Ok(CodeVerificationResponse { ok: false }));

        let verdict = validator(api, &context)
            .validate(WizardStep::Verification)
            .await;

        assert!(!verdict.passed);
        assert_eq!(
            context.errors().await.get(RegistrationField::VerificationCode),
            Some("Invalid verification code.")
        );
    }

    #[tokio::test]
    async fn local_only_steps_never_call_the_api() {
        let context = RegistrationContext::new().arc();
        for (field, value) in [
            (RegistrationField::Street, "Rua Augusta"),
            (RegistrationField::StreetNumber, "1500"),
            (RegistrationField::City, "São Paulo"),
            (RegistrationField::Region, "SP"),
            (RegistrationField::AccountPassword, "123456"),
            (RegistrationField::AccountPasswordConfirmation, "123456"),
        ] {
            context.update_field(field, value).await;
        }
        let validator = validator(MockRegistrationApi::new(), &context);

        assert!(validator.validate(WizardStep::Address).await.passed);
        assert!(validator.validate(WizardStep::Account).await.passed);
    }

    #[tokio::test]
    async fn validation_pass_clears_previous_errors_first() {
        let context = context_with_identity("123.456.789-01").await;
        context
            .set_field_error(RegistrationField::City, "stale")
            .await;
        context.set_form_error("stale form error").await;
        let mut api = MockRegistrationApi::new();
        api.expect_check_document_in_use()
            .returning(|_| Ok(UniquenessResponse { in_use: false }));

        let verdict = validator(api, &context).validate(WizardStep::Identity).await;

        assert!(verdict.passed);
        assert!(context.errors().await.is_empty());
    }
}
