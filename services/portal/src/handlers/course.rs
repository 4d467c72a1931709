use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use portal_auth_types::identity::IdentityHeaders;
use portal_domain::pagination::PageRequest;

use crate::domain::types::{CatalogCourse, Course, CourseFields};
use crate::error::PortalError;
use crate::handlers::{JsonBody, require_admin};
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseUseCase, DeleteCourseUseCase, GetCourseUseCase, ListCoursesUseCase,
    UpdateCourseUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct CourseResponse {
    pub id: i32,
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub duration: String,
}

impl From<Course> for CourseResponse {
    fn from(c: Course) -> Self {
        Self {
            id: c.id,
            code: c.code,
            name: c.name,
            faculty: c.faculty,
            duration: c.duration,
        }
    }
}

#[derive(Serialize)]
pub struct CatalogCourseResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub is_enrolled: bool,
}

impl From<CatalogCourse> for CatalogCourseResponse {
    fn from(item: CatalogCourse) -> Self {
        Self {
            course: item.course.into(),
            is_enrolled: item.is_enrolled,
        }
    }
}

// ── GET /courses ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct CourseListQuery {
    pub search: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn list_courses(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<Vec<CatalogCourseResponse>>, PortalError> {
    let query: CourseListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|e| PortalError::InvalidRequest(e.to_string()))?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let uc = ListCoursesUseCase {
        courses: state.course_repo(),
        enrollments: state.enrollment_repo(),
    };
    let items = uc
        .execute(&identity.user_id, query.search.as_deref(), page)
        .await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

pub async fn get_course(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<CourseResponse>, PortalError> {
    let uc = GetCourseUseCase {
        courses: state.course_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CourseRequest {
    pub code: String,
    pub name: String,
    pub faculty: String,
    pub duration: String,
}

impl From<CourseRequest> for CourseFields {
    fn from(body: CourseRequest) -> Self {
        Self {
            code: body.code,
            name: body.name,
            faculty: body.faculty,
            duration: body.duration,
        }
    }
}

pub async fn create_course(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<CourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), PortalError> {
    require_admin(&identity)?;
    let uc = CreateCourseUseCase {
        courses: state.course_repo(),
    };
    let course = uc.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(course.into())))
}

// ── PUT /courses/{id} ────────────────────────────────────────────────────────

pub async fn update_course(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(body): JsonBody<CourseRequest>,
) -> Result<Json<CourseResponse>, PortalError> {
    require_admin(&identity)?;
    let uc = UpdateCourseUseCase {
        courses: state.course_repo(),
    };
    Ok(Json(uc.execute(id, body.into()).await?.into()))
}

// ── DELETE /courses/{id} ─────────────────────────────────────────────────────

pub async fn delete_course(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, PortalError> {
    require_admin(&identity)?;
    let uc = DeleteCourseUseCase {
        courses: state.course_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
