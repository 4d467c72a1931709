use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use portal_auth_types::identity::IdentityHeaders;

use crate::error::PortalError;
use crate::handlers::JsonBody;
use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::enrollment::{
    AdmissionReport, AdmitRegistrationsUseCase, ListMyCoursesUseCase, Rejection,
};

// ── GET /enrollments ─────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct EnrolledCourseResponse {
    pub enrollment_id: i32,
    pub course: CourseResponse,
    #[serde(serialize_with = "portal_core::serde::to_rfc3339_ms")]
    pub enrolled_at: chrono::DateTime<chrono::Utc>,
}

pub async fn list_my_courses(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<EnrolledCourseResponse>>, PortalError> {
    let uc = ListMyCoursesUseCase {
        enrollments: state.enrollment_repo(),
    };
    let items = uc
        .execute(&identity.user_id)
        .await?
        .into_iter()
        .map(|e| EnrolledCourseResponse {
            enrollment_id: e.enrollment_id,
            course: e.course.into(),
            enrolled_at: e.enrolled_at,
        })
        .collect();
    Ok(Json(items))
}

// ── POST /enrollments ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AdmitRequest {
    #[serde(default)]
    pub course_ids: Vec<i32>,
}

#[derive(Serialize)]
pub struct RejectionResponse {
    pub course_id: i32,
    pub course_name: Option<String>,
    pub reason: &'static str,
}

impl From<Rejection> for RejectionResponse {
    fn from(r: Rejection) -> Self {
        Self {
            course_id: r.course_id,
            course_name: r.course_name,
            reason: r.reason.as_str(),
        }
    }
}

#[derive(Serialize)]
pub struct AdmissionResponse {
    pub admitted: Vec<i32>,
    pub admitted_count: usize,
    pub rejected: Vec<RejectionResponse>,
    pub message: String,
}

impl From<AdmissionReport> for AdmissionResponse {
    fn from(report: AdmissionReport) -> Self {
        let message = report.message();
        let admitted_count = report.admitted_count();
        Self {
            admitted: report.admitted,
            admitted_count,
            rejected: report.rejected.into_iter().map(Into::into).collect(),
            message,
        }
    }
}

pub async fn admit_registrations(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    JsonBody(body): JsonBody<AdmitRequest>,
) -> Result<Json<AdmissionResponse>, PortalError> {
    let uc = AdmitRegistrationsUseCase {
        enrollments: state.enrollment_repo(),
        courses: state.course_repo(),
        locks: state.locks.clone(),
    };
    let report = uc.execute(&identity.user_id, &body.course_ids).await?;
    Ok(Json(report.into()))
}
