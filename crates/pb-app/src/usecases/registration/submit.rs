use std::sync::Arc;

use pb_core::auth::Route;
use pb_core::ports::{RegistrationApiPort, SessionStorePort};
use pb_core::registration::{NewAccountRequest, RegistrationError, RegistrationRecord};
use tracing::{info, info_span, warn, Instrument};

/// Result of a successful account creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationOutcome {
    pub account_id: Option<String>,
    /// Home when a session token is already stored, sign-in otherwise.
    pub next_route: Route,
}

/// Sends the completed record to the account-creation endpoint.
pub struct SubmitRegistration {
    api: Arc<dyn RegistrationApiPort>,
    session_store: Arc<dyn SessionStorePort>,
}

impl SubmitRegistration {
    pub fn new(api: Arc<dyn RegistrationApiPort>, session_store: Arc<dyn SessionStorePort>) -> Self {
        Self { api, session_store }
    }

    pub async fn execute(
        &self,
        record: &RegistrationRecord,
    ) -> Result<RegistrationOutcome, RegistrationError> {
        let span = info_span!("usecase.registration.submit");
        async {
            let request = NewAccountRequest::from_record(record)?;

            let response = self.api.create_account(&request).await.map_err(|err| {
                warn!(error = %err, "account creation request failed");
                RegistrationError::Submission {
                    reason: err.to_string(),
                }
            })?;
            if !response.ok {
                warn!("account creation refused by server");
                return Err(RegistrationError::Submission {
                    reason: "server refused account creation".to_string(),
                });
            }

            let token = match self.session_store.session_token().await {
                Ok(token) => token,
                Err(err) => {
                    warn!(error = %err, "failed to read session token, routing to sign-in");
                    None
                }
            };
            let next_route = Route::for_session(token.as_deref());
            info!(account_id = ?response.id, route = ?next_route, "account created");

            Ok(RegistrationOutcome {
                account_id: response.id,
                next_route,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use pb_core::ports::{AccountCreationResponse, ApiError, SessionStoreError};
    use pb_core::registration::AccountKind;

    use super::*;
    use crate::mocks::{MockRegistrationApi, MockSessionStore};

    fn complete_record() -> RegistrationRecord {
        RegistrationRecord {
            document: "123.456.789-01".into(),
            full_name: "Ana Souza".into(),
            phone: "11 98765-4321".into(),
            email: "ana@bank.com".into(),
            password: "secret1".into(),
            password_confirmation: "secret1".into(),
            verification_code: "123456".into(),
            street: "Rua Augusta".into(),
            street_number: "1500".into(),
            city: "São Paulo".into(),
            region: "sp".into(),
            account_kind: AccountKind::Checking,
            account_password: "654321".into(),
            account_password_confirmation: "654321".into(),
        }
    }

    fn store_with_token(token: Option<&'static str>) -> MockSessionStore {
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(move |_| Ok(token.map(str::to_string)));
        store
    }

    #[tokio::test]
    async fn success_without_session_routes_to_login() {
        let mut api = MockRegistrationApi::new();
        api.expect_create_account()
            .withf(|request| request.user.document == "12345678901" && request.address.region == "SP")
            .times(1)
            .returning(|_| {
                Ok(AccountCreationResponse {
                    ok: true,
                    id: Some("acc-42".into()),
                })
            });
        let submit = SubmitRegistration::new(Arc::new(api), Arc::new(store_with_token(None)));

        let outcome = submit.execute(&complete_record()).await.unwrap();

        assert_eq!(outcome.account_id.as_deref(), Some("acc-42"));
        assert_eq!(outcome.next_route, Route::Login);
    }

    #[tokio::test]
    async fn success_with_session_routes_home() {
        let mut api = MockRegistrationApi::new();
        api.expect_create_account().returning(|_| {
            Ok(AccountCreationResponse {
                ok: true,
                id: None,
            })
        });
        let submit =
            SubmitRegistration::new(Arc::new(api), Arc::new(store_with_token(Some("jwt"))));

        let outcome = submit.execute(&complete_record()).await.unwrap();

        assert_eq!(outcome.next_route, Route::Home);
    }

    #[tokio::test]
    async fn unreadable_session_falls_back_to_login() {
        let mut api = MockRegistrationApi::new();
        api.expect_create_account().returning(|_| {
            Ok(AccountCreationResponse {
                ok: true,
                id: None,
            })
        });
        let mut store = MockSessionStore::new();
        store
            .expect_get()
            .returning(|_| Err(SessionStoreError::Corrupt("not json".into())));
        let submit = SubmitRegistration::new(Arc::new(api), Arc::new(store));

        let outcome = submit.execute(&complete_record()).await.unwrap();

        assert_eq!(outcome.next_route, Route::Login);
    }

    #[tokio::test]
    async fn server_error_is_a_submission_error() {
        let mut api = MockRegistrationApi::new();
        api.expect_create_account().returning(|_| {
            Err(ApiError::UnexpectedStatus {
                status: 500,
                message: None,
            })
        });
        let mut store = MockSessionStore::new();
        store.expect_get().times(0);
        let submit = SubmitRegistration::new(Arc::new(api), Arc::new(store));

        let err = submit.execute(&complete_record()).await.unwrap_err();

        assert!(matches!(err, RegistrationError::Submission { .. }));
        assert_eq!(err.field(), None);
    }

    #[tokio::test]
    async fn refused_creation_is_a_submission_error() {
        let mut api = MockRegistrationApi::new();
        api.expect_create_account().returning(|_| {
            Ok(AccountCreationResponse {
                ok: false,
                id: None,
            })
        });
        let submit = SubmitRegistration::new(Arc::new(api), Arc::new(MockSessionStore::new()));

        let err = submit.execute(&complete_record()).await.unwrap_err();

        assert!(matches!(err, RegistrationError::Submission { .. }));
    }
}
