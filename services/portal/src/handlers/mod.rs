pub mod course;
pub mod enrollment;
pub mod me;
pub mod schedule;
pub mod teacher;
pub mod timetable;

use axum::extract::FromRequest;

use portal_auth_types::identity::IdentityHeaders;

use crate::error::PortalError;

/// `Json` body whose rejections surface as `INVALID_REQUEST` error bodies.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(PortalError))]
pub struct JsonBody<T>(pub T);

/// Reject non-admin callers with 403.
pub(crate) fn require_admin(identity: &IdentityHeaders) -> Result<(), PortalError> {
    if !identity.is_admin() {
        tracing::debug!(user_id = %identity.user_id, "admin route called by non-admin");
        return Err(PortalError::Forbidden);
    }
    Ok(())
}
