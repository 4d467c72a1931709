use std::collections::BTreeMap;

use axum::{Json, extract::State};
use serde::Serialize;

use portal_auth_types::identity::IdentityHeaders;

use crate::error::PortalError;
use crate::handlers::schedule::ScheduleResponse;
use crate::state::AppState;
use crate::usecase::timetable::{GetTimetableUseCase, Timetable};

// ── GET /timetable ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct TimetableResponse {
    pub entries: Vec<ScheduleResponse>,
    /// Keyed by day of week, 1 = Monday … 7 = Sunday.
    pub by_day: BTreeMap<u8, Vec<ScheduleResponse>>,
    #[serde(serialize_with = "portal_core::serde::to_hh_mm_seq")]
    pub start_times: Vec<chrono::NaiveTime>,
}

impl From<Timetable> for TimetableResponse {
    fn from(tt: Timetable) -> Self {
        Self {
            entries: tt.entries.into_iter().map(Into::into).collect(),
            by_day: tt
                .by_day
                .into_iter()
                .map(|(day, slots)| {
                    let slots: Vec<ScheduleResponse> =
                        slots.into_iter().map(ScheduleResponse::from).collect();
                    (day.as_u8(), slots)
                })
                .collect(),
            start_times: tt.start_times,
        }
    }
}

pub async fn get_timetable(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<TimetableResponse>, PortalError> {
    let uc = GetTimetableUseCase {
        enrollments: state.enrollment_repo(),
        schedules: state.schedule_repo(),
    };
    let timetable = uc.execute(&identity.user_id).await?;
    Ok(Json(timetable.into()))
}
