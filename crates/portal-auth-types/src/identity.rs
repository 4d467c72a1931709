//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::StatusCode;
use http::request::Parts;

use portal_domain::user::UserRole;

/// Header carrying the caller's opaque user identifier.
pub const X_PORTAL_USER_ID: &str = "x-portal-user-id";

/// Header carrying the caller's role as a `u8` wire value.
pub const X_PORTAL_USER_ROLE: &str = "x-portal-user-role";

/// User identity injected by the gateway via `x-portal-user-id` and `x-portal-user-role` headers.
///
/// Returns 401 if either header is absent, the id is blank, or the role is unknown.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: String,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn is_admin(&self) -> bool {
        self.user_role.is_admin()
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    // Values are read synchronously so the returned future is 'static.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(X_PORTAL_USER_ID)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let user_role = parts
            .headers
            .get(X_PORTAL_USER_ROLE)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8);

        async move {
            let (Some(user_id), Some(user_role)) = (user_id, user_role) else {
                tracing::debug!("rejecting request without a valid gateway identity");
                return Err(StatusCode::UNAUTHORIZED);
            };
            Ok(Self { user_id, user_role })
        }
    }
}
