use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use portal_auth_types::identity::IdentityHeaders;

use crate::domain::types::Teacher;
use crate::error::PortalError;
use crate::handlers::{JsonBody, require_admin};
use crate::state::AppState;
use crate::usecase::teacher::{CreateTeacherUseCase, ListTeachersUseCase};

#[derive(Serialize)]
pub struct TeacherResponse {
    pub id: i32,
    pub name: String,
}

impl From<Teacher> for TeacherResponse {
    fn from(t: Teacher) -> Self {
        Self {
            id: t.id,
            name: t.name,
        }
    }
}

// ── GET /teachers ────────────────────────────────────────────────────────────

pub async fn list_teachers(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherResponse>>, PortalError> {
    require_admin(&identity)?;
    let uc = ListTeachersUseCase {
        teachers: state.teacher_repo(),
    };
    let items = uc.execute().await?.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

// ── POST /teachers ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTeacherRequest {
    pub name: String,
}

pub async fn create_teacher(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), PortalError> {
    require_admin(&identity)?;
    let uc = CreateTeacherUseCase {
        teachers: state.teacher_repo(),
    };
    let teacher = uc.execute(&body.name).await?;
    Ok((StatusCode::CREATED, Json(teacher.into())))
}
