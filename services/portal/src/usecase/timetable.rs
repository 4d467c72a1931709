use std::collections::BTreeMap;

use chrono::NaiveTime;

use portal_domain::weekday::DayOfWeek;

use crate::domain::repository::{EnrollmentRepository, ScheduleRepository};
use crate::domain::types::ScheduleEntry;
use crate::error::PortalError;

/// A student's weekly grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    /// Every slot, ordered by (day, start time, id).
    pub entries: Vec<ScheduleEntry>,
    /// Slots grouped by day. Only days with at least one slot are present.
    pub by_day: BTreeMap<DayOfWeek, Vec<ScheduleEntry>>,
    /// Distinct start times across all slots, ascending.
    pub start_times: Vec<NaiveTime>,
}

impl Timetable {
    pub fn assemble(mut entries: Vec<ScheduleEntry>) -> Self {
        entries.sort_by_key(|e| (e.day, e.start_time, e.id));

        let mut by_day: BTreeMap<DayOfWeek, Vec<ScheduleEntry>> = BTreeMap::new();
        for entry in &entries {
            by_day.entry(entry.day).or_default().push(entry.clone());
        }

        let mut start_times: Vec<NaiveTime> = entries.iter().map(|e| e.start_time).collect();
        start_times.sort_unstable();
        start_times.dedup();

        Self {
            entries,
            by_day,
            start_times,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct GetTimetableUseCase<E: EnrollmentRepository, S: ScheduleRepository> {
    pub enrollments: E,
    pub schedules: S,
}

impl<E: EnrollmentRepository, S: ScheduleRepository> GetTimetableUseCase<E, S> {
    pub async fn execute(&self, student_id: &str) -> Result<Timetable, PortalError> {
        let course_ids = self.enrollments.find_enrolled_course_ids(student_id).await?;
        if course_ids.is_empty() {
            return Ok(Timetable::default());
        }
        let entries = self.schedules.list_for_courses(&course_ids).await?;
        Ok(Timetable::assemble(entries))
    }
}
