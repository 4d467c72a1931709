use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use chrono::NaiveTime;

use portal::domain::repository::{CourseRepository, EnrollmentRepository, ScheduleRepository};
use portal::domain::types::{
    Course, CourseFields, EnrolledCourse, NewEnrollment, ScheduleEntry, ScheduleFields,
};
use portal::error::PortalError;
use portal_domain::pagination::PageRequest;
use portal_domain::weekday::DayOfWeek;

// ── MockEnrollmentRepo ───────────────────────────────────────────────────────

/// In-memory enrollment store. Every call yields to the scheduler first so
/// concurrent admissions interleave between their read and their write.
#[derive(Clone)]
pub struct MockEnrollmentRepo {
    pub rows: Arc<Mutex<Vec<NewEnrollment>>>,
}

impl MockEnrollmentRepo {
    pub fn new() -> Self {
        Self {
            rows: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Seed `course_ids` as existing enrollments of `student_id`.
    pub fn seeded(student_id: &str, course_ids: &[i32]) -> Self {
        let repo = Self::new();
        repo.rows.lock().unwrap().extend(course_ids.iter().map(|&course_id| NewEnrollment {
            student_id: student_id.to_owned(),
            course_id,
            enrolled_at: chrono::Utc::now(),
        }));
        repo
    }

    /// Returns a shared handle to the stored rows for post-execution inspection.
    pub fn rows_handle(&self) -> Arc<Mutex<Vec<NewEnrollment>>> {
        Arc::clone(&self.rows)
    }

    pub fn count_for(&self, student_id: &str) -> usize {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == student_id)
            .count()
    }
}

impl EnrollmentRepository for MockEnrollmentRepo {
    async fn find_enrolled_course_ids(&self, student_id: &str) -> Result<Vec<i32>, PortalError> {
        tokio::task::yield_now().await;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.student_id == student_id)
            .map(|r| r.course_id)
            .collect())
    }

    async fn insert_all(&self, rows: &[NewEnrollment]) -> Result<(), PortalError> {
        tokio::task::yield_now().await;
        self.rows.lock().unwrap().extend_from_slice(rows);
        Ok(())
    }

    async fn list_for_student(
        &self,
        _student_id: &str,
    ) -> Result<Vec<EnrolledCourse>, PortalError> {
        Ok(vec![])
    }
}

// ── MockCourseRepo ───────────────────────────────────────────────────────────

pub struct MockCourseRepo {
    pub courses: Vec<Course>,
}

impl MockCourseRepo {
    /// Courses `1..=count`, named `Course <id>`.
    pub fn numbered(count: i32) -> Self {
        Self {
            courses: (1..=count).map(test_course).collect(),
        }
    }
}

impl CourseRepository for MockCourseRepo {
    async fn find_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, PortalError> {
        Ok(self
            .courses
            .iter()
            .filter(|c| ids.contains(&c.id))
            .map(|c| (c.id, c.name.clone()))
            .collect())
    }

    async fn list(
        &self,
        _search: Option<&str>,
        _page: PageRequest,
    ) -> Result<Vec<Course>, PortalError> {
        Ok(self.courses.clone())
    }

    async fn get(&self, id: i32) -> Result<Option<Course>, PortalError> {
        Ok(self.courses.iter().find(|c| c.id == id).cloned())
    }

    async fn create(&self, _fields: &CourseFields) -> Result<Course, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }

    async fn update(
        &self,
        _id: i32,
        _fields: &CourseFields,
    ) -> Result<Option<Course>, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }

    async fn delete(&self, _id: i32) -> Result<bool, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }

    async fn is_referenced(&self, _id: i32) -> Result<bool, PortalError> {
        Ok(false)
    }
}

// ── MockScheduleRepo ─────────────────────────────────────────────────────────

pub struct MockScheduleRepo {
    pub entries: Vec<ScheduleEntry>,
    pub queries: Arc<AtomicUsize>,
}

impl MockScheduleRepo {
    pub fn new(entries: Vec<ScheduleEntry>) -> Self {
        Self {
            entries,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns a shared counter of schedule lookups.
    pub fn queries_handle(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.queries)
    }
}

impl ScheduleRepository for MockScheduleRepo {
    async fn list_all(&self) -> Result<Vec<ScheduleEntry>, PortalError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.clone())
    }

    async fn list_for_courses(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<ScheduleEntry>, PortalError> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .iter()
            .filter(|e| course_ids.contains(&e.course_id))
            .cloned()
            .collect())
    }

    async fn get(&self, id: i32) -> Result<Option<ScheduleEntry>, PortalError> {
        Ok(self.entries.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, _fields: &ScheduleFields) -> Result<i32, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }

    async fn update(&self, _id: i32, _fields: &ScheduleFields) -> Result<bool, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }

    async fn delete(&self, _id: i32) -> Result<bool, PortalError> {
        Err(anyhow::anyhow!("read-only mock").into())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_course(id: i32) -> Course {
    Course {
        id,
        code: format!("CS{id:03}"),
        name: format!("Course {id}"),
        faculty: "Computer Science".to_owned(),
        duration: "1 semester".to_owned(),
    }
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn schedule_entry(id: i32, course_id: i32, day: u8, start: NaiveTime) -> ScheduleEntry {
    ScheduleEntry {
        id,
        course_id,
        course_code: format!("CS{course_id:03}"),
        course_name: format!("Course {course_id}"),
        teacher_id: 1,
        teacher_name: "Grace Hopper".to_owned(),
        day: DayOfWeek::try_from(day).unwrap(),
        start_time: start,
        end_time: start + chrono::Duration::minutes(90),
        room: Some("A-101".to_owned()),
    }
}
