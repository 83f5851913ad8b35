//! HTTP adapter for the banking API
//!
//! One `reqwest` client shared by the registration and sign-in ports. Every
//! request carries the client-side timeout given at construction.

mod auth;
mod registration;

use std::time::Duration;

use anyhow::Context;
use pb_core::ports::ApiError;
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

pub struct HttpBankingApi {
    client: Client,
    base_url: Url,
}

/// Common `{status, msg}` envelope returned by the `/auth` endpoints.
#[derive(Debug, Default, Deserialize)]
struct StatusBody {
    #[serde(default)]
    status: String,
    #[serde(default, alias = "msg")]
    message: Option<String>,
}

impl StatusBody {
    fn is_success(&self) -> bool {
        self.status == "success"
    }
}

impl HttpBankingApi {
    /// `base_url` is the API root, e.g. `http://localhost:3000/api/v1`.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid API base URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot carry a path: {base_url}");
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { client, base_url })
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport(format!("invalid base URL {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn map_send_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Transport(err.to_string())
    }
}

/// Reads a JSON body; an empty body decodes as `T::default()`.
async fn read_json<T>(response: Response) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    let text = response.text().await.map_err(map_send_error)?;
    if text.trim().is_empty() {
        return Ok(T::default());
    }
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Turns a non-2xx response into [`ApiError::UnexpectedStatus`], keeping the
/// server's `msg` when the body carries one.
async fn unexpected_status(response: Response) -> ApiError {
    let status = response.status();
    let message = match read_json::<StatusBody>(response).await {
        Ok(body) => body.message,
        Err(_) => None,
    };
    debug!(status = status.as_u16(), ?message, "unexpected HTTP status");
    ApiError::UnexpectedStatus {
        status: status.as_u16(),
        message,
    }
}

fn is_conflict(status: StatusCode) -> bool {
    status == StatusCode::CONFLICT
}
