use async_trait::async_trait;
use pb_core::auth::{LoginRequest, LoginResponse};
use pb_core::ports::{ApiError, AuthApiPort};
use tracing::{info_span, Instrument};

use super::{map_send_error, unexpected_status, HttpBankingApi};

#[async_trait]
impl AuthApiPort for HttpBankingApi {
    async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let span = info_span!("infra.http.login");
        async {
            let url = self.endpoint(&["auth", "login"])?;
            let response = self
                .client
                .post(url)
                .json(request)
                .send()
                .await
                .map_err(map_send_error)?;
            if !response.status().is_success() {
                return Err(unexpected_status(response).await);
            }
            response
                .json::<LoginResponse>()
                .await
                .map_err(|e| ApiError::Decode(e.to_string()))
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mockito::{Matcher, Server};

    use super::*;

    #[tokio::test]
    async fn login_posts_cpf_and_password() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/api/v1/auth/login")
            .match_body(Matcher::Json(serde_json::json!({
                "cpf": "12345678901",
                "password": "secret1"
            })))
            .with_status(200)
            .with_body(r#"{"status":"success","token":"jwt"}"#)
            .create_async()
            .await;
        let api =
            HttpBankingApi::new(&format!("{}/api/v1", server.url()), Duration::from_secs(5))
                .unwrap();

        let response = api
            .login(&LoginRequest {
                document: "12345678901".into(),
                password: "secret1".into(),
            })
            .await
            .unwrap();

        assert!(response.is_success());
        assert_eq!(response.token.as_deref(), Some("jwt"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_login_keeps_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/api/v1/auth/login")
            .with_status(401)
            .with_body(r#"{"status":"error","msg":"Senha incorreta"}"#)
            .create_async()
            .await;
        let api =
            HttpBankingApi::new(&format!("{}/api/v1", server.url()), Duration::from_secs(5))
                .unwrap();

        let err = api
            .login(&LoginRequest {
                document: "12345678901".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::UnexpectedStatus {
                status: 401,
                message: Some("Senha incorreta".into())
            }
        );
    }
}
