use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};

use portal_auth_types::identity::IdentityHeaders;
use portal_domain::weekday::DayOfWeek;

use crate::domain::types::{ScheduleEntry, ScheduleFields};
use crate::error::PortalError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::schedule::{
    CreateScheduleUseCase, DeleteScheduleUseCase, GetScheduleUseCase, ListSchedulesUseCase,
    UpdateScheduleUseCase,
};

#[derive(Serialize)]
pub struct ScheduleResponse {
    pub id: i32,
    pub course_id: i32,
    pub course_code: String,
    pub course_name: String,
    pub teacher_id: i32,
    pub teacher_name: String,
    pub day_of_week: DayOfWeek,
    pub day_name: &'static str,
    #[serde(serialize_with = "portal_core::serde::to_hh_mm")]
    pub start_time: chrono::NaiveTime,
    #[serde(serialize_with = "portal_core::serde::to_hh_mm")]
    pub end_time: chrono::NaiveTime,
    pub room: Option<String>,
}

impl From<ScheduleEntry> for ScheduleResponse {
    fn from(e: ScheduleEntry) -> Self {
        Self {
            id: e.id,
            course_id: e.course_id,
            course_code: e.course_code,
            course_name: e.course_name,
            teacher_id: e.teacher_id,
            teacher_name: e.teacher_name,
            day_of_week: e.day,
            day_name: e.day.name(),
            start_time: e.start_time,
            end_time: e.end_time,
            room: e.room,
        }
    }
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub course_id: i32,
    pub teacher_id: i32,
    pub day_of_week: u8,
    #[serde(deserialize_with = "portal_core::serde::from_hh_mm")]
    pub start_time: chrono::NaiveTime,
    #[serde(deserialize_with = "portal_core::serde::from_hh_mm")]
    pub end_time: chrono::NaiveTime,
    #[serde(default)]
    pub room: Option<String>,
}

impl From<ScheduleRequest> for ScheduleFields {
    fn from(body: ScheduleRequest) -> Self {
        Self {
            course_id: body.course_id,
            teacher_id: body.teacher_id,
            day_of_week: body.day_of_week,
            start_time: body.start_time,
            end_time: body.end_time,
            room: body.room,
        }
    }
}

fn schedule_body(
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<ScheduleRequest, PortalError> {
    body.map(|Json(body)| body)
        .map_err(|rejection| PortalError::InvalidSchedule(rejection.body_text()))
}

// ── GET /schedules ───────────────────────────────────────────────────────────

pub async fn list_schedules(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<ScheduleResponse>>, PortalError> {
    require_admin(&identity)?;
    let uc = ListSchedulesUseCase {
        schedules: state.schedule_repo(),
    };
    let items = uc.execute().await?.into_iter().map(Into::into).collect();
    Ok(Json(items))
}

// ── GET /schedules/{id} ──────────────────────────────────────────────────────

pub async fn get_schedule(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ScheduleResponse>, PortalError> {
    require_admin(&identity)?;
    let uc = GetScheduleUseCase {
        schedules: state.schedule_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /schedules ──────────────────────────────────────────────────────────

pub async fn create_schedule(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ScheduleResponse>), PortalError> {
    require_admin(&identity)?;
    let body = schedule_body(body)?;
    let uc = CreateScheduleUseCase {
        schedules: state.schedule_repo(),
        courses: state.course_repo(),
        teachers: state.teacher_repo(),
    };
    let entry = uc.execute(body.into()).await?;
    Ok((StatusCode::CREATED, Json(entry.into())))
}

// ── PUT /schedules/{id} ──────────────────────────────────────────────────────

pub async fn update_schedule(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: Result<Json<ScheduleRequest>, JsonRejection>,
) -> Result<Json<ScheduleResponse>, PortalError> {
    require_admin(&identity)?;
    let body = schedule_body(body)?;
    let uc = UpdateScheduleUseCase {
        schedules: state.schedule_repo(),
        courses: state.course_repo(),
        teachers: state.teacher_repo(),
    };
    Ok(Json(uc.execute(id, body.into()).await?.into()))
}

// ── DELETE /schedules/{id} ───────────────────────────────────────────────────

pub async fn delete_schedule(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, PortalError> {
    require_admin(&identity)?;
    let uc = DeleteScheduleUseCase {
        schedules: state.schedule_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
