//! Tenant resolution gate.
//!
//! Two-step async gate run after the session guard: look up the user's
//! organization, falling back to first-run provisioning. Every mutating
//! action is unreachable until this resolves; the gate fails loudly with
//! `MissingTenant` instead of silently dropping intent.

use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::api::ApiClient;
use crate::errors::ClientError;

#[derive(Debug, Deserialize)]
struct OrganizationLookup {
    organization_id: Uuid,
}

/// Resolves the organization id scoping every subsequent backend call.
pub async fn resolve_organization(
    api: &ApiClient,
    user_id: Uuid,
) -> Result<Uuid, ClientError> {
    let query = [("user_id", user_id.to_string())];

    match api
        .get::<OrganizationLookup>("/api/user/organization", &query)
        .await
    {
        Ok(found) => Ok(found.organization_id),
        Err(ClientError::Rejected(reason)) => {
            warn!("no organization on record ({reason}); provisioning one");
            match api
                .post_query::<OrganizationLookup>("/api/auth/setup-user-org", &query)
                .await
            {
                Ok(created) => {
                    info!("organization {} provisioned", created.organization_id);
                    Ok(created.organization_id)
                }
                Err(ClientError::Rejected(_)) => Err(ClientError::MissingTenant),
                Err(other) => Err(other),
            }
        }
        Err(other) => Err(other),
    }
}
