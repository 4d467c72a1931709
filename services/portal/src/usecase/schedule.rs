use portal_domain::weekday::DayOfWeek;

use crate::domain::repository::{CourseRepository, ScheduleRepository, TeacherRepository};
use crate::domain::types::{ScheduleEntry, ScheduleFields};
use crate::error::PortalError;

const ROOM_MAX: usize = 50;

/// Check day range, time ordering and room length. A blank room becomes `None`.
pub fn validate_schedule(fields: ScheduleFields) -> Result<ScheduleFields, PortalError> {
    DayOfWeek::try_from(fields.day_of_week)
        .map_err(|e| PortalError::InvalidSchedule(e.to_string()))?;
    if fields.end_time <= fields.start_time {
        return Err(PortalError::InvalidSchedule(
            "end time must be after start time".to_owned(),
        ));
    }
    let room = fields
        .room
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_owned);
    if room.as_ref().is_some_and(|r| r.chars().count() > ROOM_MAX) {
        return Err(PortalError::InvalidSchedule(format!(
            "room must be at most {ROOM_MAX} characters"
        )));
    }
    Ok(ScheduleFields { room, ..fields })
}

async fn ensure_references<C: CourseRepository, T: TeacherRepository>(
    courses: &C,
    teachers: &T,
    fields: &ScheduleFields,
) -> Result<(), PortalError> {
    if courses.get(fields.course_id).await?.is_none() {
        return Err(PortalError::CourseNotFound);
    }
    if teachers.get(fields.teacher_id).await?.is_none() {
        return Err(PortalError::TeacherNotFound);
    }
    Ok(())
}

// ── ListSchedules ────────────────────────────────────────────────────────────

pub struct ListSchedulesUseCase<S: ScheduleRepository> {
    pub schedules: S,
}

impl<S: ScheduleRepository> ListSchedulesUseCase<S> {
    pub async fn execute(&self) -> Result<Vec<ScheduleEntry>, PortalError> {
        self.schedules.list_all().await
    }
}

// ── GetSchedule ──────────────────────────────────────────────────────────────

pub struct GetScheduleUseCase<S: ScheduleRepository> {
    pub schedules: S,
}

impl<S: ScheduleRepository> GetScheduleUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<ScheduleEntry, PortalError> {
        self.schedules
            .get(id)
            .await?
            .ok_or(PortalError::ScheduleNotFound)
    }
}

// ── CreateSchedule ───────────────────────────────────────────────────────────

pub struct CreateScheduleUseCase<S, C, T>
where
    S: ScheduleRepository,
    C: CourseRepository,
    T: TeacherRepository,
{
    pub schedules: S,
    pub courses: C,
    pub teachers: T,
}

impl<S, C, T> CreateScheduleUseCase<S, C, T>
where
    S: ScheduleRepository,
    C: CourseRepository,
    T: TeacherRepository,
{
    pub async fn execute(&self, fields: ScheduleFields) -> Result<ScheduleEntry, PortalError> {
        let fields = validate_schedule(fields)?;
        ensure_references(&self.courses, &self.teachers, &fields).await?;
        let id = self.schedules.create(&fields).await?;
        tracing::info!(schedule_id = id, course_id = fields.course_id, "class schedule created");
        self.schedules
            .get(id)
            .await?
            .ok_or(PortalError::ScheduleNotFound)
    }
}

// ── UpdateSchedule ───────────────────────────────────────────────────────────

pub struct UpdateScheduleUseCase<S, C, T>
where
    S: ScheduleRepository,
    C: CourseRepository,
    T: TeacherRepository,
{
    pub schedules: S,
    pub courses: C,
    pub teachers: T,
}

impl<S, C, T> UpdateScheduleUseCase<S, C, T>
where
    S: ScheduleRepository,
    C: CourseRepository,
    T: TeacherRepository,
{
    pub async fn execute(
        &self,
        id: i32,
        fields: ScheduleFields,
    ) -> Result<ScheduleEntry, PortalError> {
        let fields = validate_schedule(fields)?;
        if self.schedules.get(id).await?.is_none() {
            return Err(PortalError::ScheduleNotFound);
        }
        ensure_references(&self.courses, &self.teachers, &fields).await?;
        if !self.schedules.update(id, &fields).await? {
            return Err(PortalError::ScheduleNotFound);
        }
        self.schedules
            .get(id)
            .await?
            .ok_or(PortalError::ScheduleNotFound)
    }
}

// ── DeleteSchedule ───────────────────────────────────────────────────────────

pub struct DeleteScheduleUseCase<S: ScheduleRepository> {
    pub schedules: S,
}

impl<S: ScheduleRepository> DeleteScheduleUseCase<S> {
    pub async fn execute(&self, id: i32) -> Result<(), PortalError> {
        if !self.schedules.delete(id).await? {
            return Err(PortalError::ScheduleNotFound);
        }
        Ok(())
    }
}
