//! Mock gateway identity for integration tests.
//!
//! Services behind the gateway receive `x-portal-user-id` + `x-portal-user-role` headers
//! injected by the gateway. In tests, `MockAuth` produces these headers directly
//! so no real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use portal_auth_types::identity::{X_PORTAL_USER_ID, X_PORTAL_USER_ROLE};
use portal_domain::user::UserRole;

/// Configurable identity injected into test requests.
pub struct MockAuth {
    pub user_id: String,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: impl Into<String>, user_role: UserRole) -> Self {
        Self {
            user_id: user_id.into(),
            user_role,
        }
    }

    pub fn student(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Student)
    }

    pub fn admin(user_id: impl Into<String>) -> Self {
        Self::new(user_id, UserRole::Admin)
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(X_PORTAL_USER_ID),
            HeaderValue::from_str(&self.user_id).unwrap(),
        );
        map.insert(
            HeaderName::from_static(X_PORTAL_USER_ROLE),
            HeaderValue::from_str(&self.user_role.as_u8().to_string()).unwrap(),
        );
        map
    }
}
