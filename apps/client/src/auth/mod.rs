//! Identity provider client and the session lifecycle.
//!
//! Session state is owned by [`SessionContext`] and handed down explicitly —
//! pages never reach for ambient auth state. The lifecycle is the three
//! operations `init`, `refresh`, `clear`; everything else reads.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::errors::ClientError;

/// An authenticated identity-provider session.
#[derive(Debug, Clone)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub user_id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    user: TokenUser,
}

#[derive(Debug, Deserialize)]
struct TokenUser {
    id: Uuid,
    email: String,
}

/// Error body shapes the provider produces (varies by endpoint).
#[derive(Debug, Deserialize)]
struct AuthErrorBody {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Thin client over the identity provider's REST endpoints.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base: String,
    anon_key: String,
}

impl AuthClient {
    pub fn new(base_url: &str, anon_key: &str, timeout: Duration) -> Self {
        Self {
            http: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        }
    }

    pub async fn sign_up(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let url = format!("{}/auth/v1/signup", self.base);
        self.token_request(
            self.http.post(url).json(&json!({
                "email": credentials.email,
                "password": credentials.password,
            })),
        )
        .await
    }

    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session, ClientError> {
        let url = format!("{}/auth/v1/token", self.base);
        self.token_request(
            self.http
                .post(url)
                .query(&[("grant_type", "password")])
                .json(&json!({
                    "email": credentials.email,
                    "password": credentials.password,
                })),
        )
        .await
    }

    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ClientError> {
        let url = format!("{}/auth/v1/token", self.base);
        self.token_request(
            self.http
                .post(url)
                .query(&[("grant_type", "refresh_token")])
                .json(&json!({ "refresh_token": refresh_token })),
        )
        .await
    }

    /// Best-effort server-side sign-out; local state is cleared regardless.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ClientError> {
        let url = format!("{}/auth/v1/logout", self.base);
        let response = self
            .http
            .post(url)
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
            .send()
            .await?;
        if !response.status().is_success() {
            warn!("sign-out returned {}", response.status());
        }
        Ok(())
    }

    async fn token_request(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<Session, ClientError> {
        let response = builder.header("apikey", &self.anon_key).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                message: auth_error_message(&body),
            });
        }

        let token: TokenResponse = serde_json::from_str(&body)?;
        debug!("session established for {}", token.user.email);
        Ok(Session {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            user_id: token.user.id,
            email: token.user.email,
        })
    }
}

fn auth_error_message(body: &str) -> String {
    serde_json::from_str::<AuthErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_description.or(parsed.msg).or(parsed.error))
        .unwrap_or_else(|| "authentication failed".to_string())
}

/// Explicit session lifecycle wrapper: `init`, `refresh`, `clear`.
pub struct SessionContext {
    auth: AuthClient,
    session: Option<Session>,
}

impl SessionContext {
    pub fn new(auth: AuthClient) -> Self {
        Self {
            auth,
            session: None,
        }
    }

    /// Establishes a session from credentials; `signup` provisions the
    /// account first.
    pub async fn init(
        &mut self,
        credentials: &Credentials,
        signup: bool,
    ) -> Result<&Session, ClientError> {
        let session = if signup {
            self.auth.sign_up(credentials).await?
        } else {
            self.auth.sign_in(credentials).await?
        };
        Ok(self.session.insert(session))
    }

    /// Exchanges the refresh token for a fresh access token.
    pub async fn refresh(&mut self) -> Result<&Session, ClientError> {
        let refresh_token = self
            .session
            .as_ref()
            .and_then(|session| session.refresh_token.clone())
            .ok_or(ClientError::MissingSession)?;
        let session = self.auth.refresh(&refresh_token).await?;
        Ok(self.session.insert(session))
    }

    /// Signs out (best effort) and drops the local session.
    pub async fn clear(&mut self) {
        if let Some(session) = self.session.take() {
            if let Err(err) = self.auth.sign_out(&session.access_token).await {
                warn!("sign-out failed: {err}");
            }
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The session guard: every page calls this before anything else.
    pub fn require(&self) -> Result<&Session, ClientError> {
        self.session.as_ref().ok_or(ClientError::MissingSession)
    }
}
