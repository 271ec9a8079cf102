//! Sign-in provisioning endpoint
//!
//! Called by the auth frontend after an OAuth sign-in. Provisioning must
//! never block a sign-in, so the endpoint always answers `{ok: true}`.

use axum::extract::State;
use serde::Serialize;
use tracing::warn;

use crate::domain::user::SignInIdentity;

use super::state::AppState;
use super::types::Json;

#[derive(Debug, Serialize)]
pub struct ProvisionResponse {
    pub ok: bool,
}

/// POST /auth/provision
pub async fn provision_user(
    State(state): State<AppState>,
    Json(identity): Json<SignInIdentity>,
) -> Json<ProvisionResponse> {
    if identity.email.trim().is_empty() {
        warn!(provider = %identity.provider, "Sign-in without email, skipping provisioning");
        return Json(ProvisionResponse { ok: true });
    }

    state.users.provision(&identity).await;
    Json(ProvisionResponse { ok: true })
}
