use axum::Json;
use serde::Serialize;

use portal_auth_types::identity::IdentityHeaders;
use portal_domain::user::UserRole;

// ── GET /me ──────────────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct MeResponse {
    pub id: String,
    pub role: UserRole,
    /// Where the presentation layer sends the user after sign-in.
    pub landing_path: &'static str,
}

pub async fn get_me(identity: IdentityHeaders) -> Json<MeResponse> {
    Json(MeResponse {
        landing_path: identity.user_role.landing_path(),
        role: identity.user_role,
        id: identity.user_id,
    })
}
