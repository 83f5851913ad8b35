use async_trait::async_trait;
use pb_core::ports::{
    AccountCreationResponse, ApiError, CodeDispatchResponse, CodeVerificationResponse,
    RegistrationApiPort, UniquenessResponse,
};
use pb_core::registration::NewAccountRequest;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info_span, Instrument};

use super::{is_conflict, map_send_error, read_json, unexpected_status, HttpBankingApi, StatusBody};

#[derive(Debug, Default, Deserialize)]
struct DispatchBody {
    /// Development servers echo the generated code.
    #[serde(default)]
    code: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct CreatedBody {
    #[serde(default)]
    id: Option<Value>,
}

impl HttpBankingApi {
    /// `GET /auth/{kind}-in-use/{value}`: `status == "success"` means free.
    async fn check_in_use(&self, endpoint: &str, value: &str) -> Result<UniquenessResponse, ApiError> {
        let url = self.endpoint(&["auth", endpoint, value])?;
        let response = self.client.get(url).send().await.map_err(map_send_error)?;

        let status = response.status();
        if is_conflict(status) {
            return Ok(UniquenessResponse { in_use: true });
        }
        if !status.is_success() {
            return Err(unexpected_status(response).await);
        }
        let body: StatusBody = read_json(response).await?;
        Ok(UniquenessResponse {
            in_use: !body.is_success(),
        })
    }
}

#[async_trait]
impl RegistrationApiPort for HttpBankingApi {
    async fn check_document_in_use(&self, document: &str) -> Result<UniquenessResponse, ApiError> {
        let span = info_span!("infra.http.check_document_in_use");
        self.check_in_use("cpf-in-use", document)
            .instrument(span)
            .await
    }

    async fn check_email_in_use(&self, email: &str) -> Result<UniquenessResponse, ApiError> {
        let span = info_span!("infra.http.check_email_in_use");
        self.check_in_use("email-in-use", email)
            .instrument(span)
            .await
    }

    async fn dispatch_verification_code(
        &self,
        email: &str,
    ) -> Result<CodeDispatchResponse, ApiError> {
        let url = self.endpoint(&["auth", "send-code-verification", email])?;
        let response = self.client.get(url).send().await.map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        let body: DispatchBody = read_json(response).await?;
        if body.code.is_some() {
            debug!("server echoed the verification code");
        }
        Ok(CodeDispatchResponse { ok: true })
    }

    async fn verify_code(
        &self,
        email: &str,
        code: &str,
    ) -> Result<CodeVerificationResponse, ApiError> {
        let url = self.endpoint(&["auth", "verify-code", ""])?;
        let response = self
            .client
            .post(url)
            .json(&serde_json::json!({ "email": email, "code": code }))
            .send()
            .await
            .map_err(map_send_error)?;
        if !response.status().is_success() {
            return Err(unexpected_status(response).await);
        }

        let body: StatusBody = read_json(response).await?;
        Ok(CodeVerificationResponse {
            ok: body.is_success(),
        })
    }

    async fn create_account(
        &self,
        request: &NewAccountRequest,
    ) -> Result<AccountCreationResponse, ApiError> {
        let url = self.endpoint(&["auth", "register"])?;
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(unexpected_status(response).await);
        }
        let ok = matches!(status, StatusCode::OK | StatusCode::CREATED);
        let body: CreatedBody = read_json(response).await?;
        let id = body.id.and_then(|id| match id {
            Value::String(id) => Some(id),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        });
        Ok(AccountCreationResponse { ok, id })
    }
}
