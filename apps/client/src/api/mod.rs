//! API client — the single point of entry for all Lightning backend calls.
//!
//! ARCHITECTURAL RULE: no page module may build its own HTTP client for the
//! backend. Every call goes through `ApiClient` so the bearer header, the
//! request timeout, cancellation, and `{success, ...}` envelope handling
//! stay uniform.

use std::time::Duration;

use reqwest::{multipart::Form, Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::errors::ClientError;

/// Envelope header present on every backend response.
#[derive(Debug, Deserialize)]
struct EnvelopeHead {
    success: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Error body shapes the backend produces on non-2xx statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base: String,
    bearer: Option<String>,
    cancel: CancellationToken,
}

impl ApiClient {
    /// Builds a client with a hard per-request timeout. A hung backend call
    /// fails the page instead of wedging it.
    pub fn new(base_url: &str, timeout: Duration, cancel: CancellationToken) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base: base_url.trim_end_matches('/').to_string(),
            bearer: None,
            cancel,
        }
    }

    /// Attaches the session access token to every subsequent request.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// GET an enveloped resource.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let builder = self.authorized(self.http.get(self.url(path)).query(query));
        self.send(builder).await
    }

    /// POST a JSON body, expecting an enveloped response.
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(self.http.post(self.url(path)).json(body));
        self.send(builder).await
    }

    /// POST with query parameters and no body (the provisioning endpoint
    /// takes its input this way).
    pub async fn post_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let builder = self.authorized(self.http.post(self.url(path)).query(query));
        self.send(builder).await
    }

    /// POST a multipart form (file uploads), expecting an enveloped response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ClientError> {
        let builder = self.authorized(self.http.post(self.url(path)).multipart(form));
        self.send(builder).await
    }

    /// GET a raw JSON value with no envelope check (the health probe).
    pub async fn get_raw(&self, path: &str) -> Result<Value, ClientError> {
        let builder = self.authorized(self.http.get(self.url(path)));
        self.dispatch(builder).await
    }

    /// POST a JSON body and return the raw value. The legacy one-shot chat
    /// endpoint replies without a `success` field.
    pub async fn post_raw<B>(&self, path: &str, body: &B) -> Result<Value, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(self.http.post(self.url(path)).json(body));
        self.dispatch(builder).await
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let value = self.dispatch(builder).await?;
        accept_envelope(value)
    }

    /// Executes one request under the page's cancellation token and decodes
    /// the body as JSON, mapping non-2xx statuses to `ClientError::Http`.
    async fn dispatch(&self, builder: RequestBuilder) -> Result<Value, ClientError> {
        let response = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            response = builder.send() => response?,
        };

        let status = response.status();
        let body = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(ClientError::Cancelled),
            body = response.text() => body?,
        };

        if !status.is_success() {
            error!("backend returned {status}: {body}");
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        debug!("backend response: {} bytes", body.len());
        Ok(serde_json::from_str(&body)?)
    }
}

/// Checks the `{success, ...}` envelope, then decodes the payload fields.
fn accept_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    let head: EnvelopeHead = serde_json::from_value(value.clone())?;
    if !head.success {
        let message = head
            .error
            .unwrap_or_else(|| "unspecified backend failure".to_string());
        return Err(ClientError::Rejected(message));
    }
    Ok(serde_json::from_value(value)?)
}

/// Pulls a human-readable message out of an error body, falling back to the
/// raw text.
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.detail.or(parsed.error))
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string()
            } else {
                body.trim().to_string()
            }
        })
}
