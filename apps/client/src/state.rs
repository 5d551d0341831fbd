//! Per-command application context.
//!
//! `establish` is the session guard plus tenant gate run before any page:
//! no data or action call is issued until both resolve, and mutating pages
//! are simply unreachable without a resolved organization id.

use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::auth::{AuthClient, Credentials, Session, SessionContext};
use crate::config::Config;
use crate::errors::ClientError;
use crate::tenant;

#[derive(Debug)]
pub struct AppContext {
    pub api: ApiClient,
    pub session: Session,
    pub organization_id: uuid::Uuid,
    cancel: CancellationToken,
}

impl AppContext {
    pub async fn establish(
        config: &Config,
        credentials: &Credentials,
        signup: bool,
    ) -> Result<Self, ClientError> {
        let cancel = CancellationToken::new();
        let auth = AuthClient::new(&config.auth_url, &config.auth_anon_key, config.timeout());

        let mut sessions = SessionContext::new(auth);
        sessions.init(credentials, signup).await?;
        let session = sessions.require()?.clone();

        let api = ApiClient::new(&config.api_url, config.timeout(), cancel.clone())
            .with_bearer(&session.access_token);
        let organization_id = tenant::resolve_organization(&api, session.user_id).await?;

        Ok(Self {
            api,
            session,
            organization_id,
            cancel,
        })
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

impl Drop for AppContext {
    /// Ties in-flight requests to the page lifetime: dropping the context
    /// cancels anything still running against its `ApiClient` clones.
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Non-interactive credentials, when the environment provides them.
pub fn credentials_from(config: &Config) -> Result<Credentials, ClientError> {
    match (&config.email, &config.password) {
        (Some(email), Some(password)) => Ok(Credentials {
            email: email.clone(),
            password: password.clone(),
        }),
        _ => Err(ClientError::MissingSession),
    }
}
