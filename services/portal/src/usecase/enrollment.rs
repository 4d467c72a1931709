use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;

use crate::domain::repository::{CourseRepository, EnrollmentRepository};
use crate::domain::types::{EnrolledCourse, MAX_ENROLLMENTS_PER_STUDENT, NewEnrollment};
use crate::error::PortalError;
use crate::infra::locks::StudentLocks;

// ── Admission planning ───────────────────────────────────────────────────────

/// Why a requested course was not admitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionReason {
    DuplicateEnrollment,
    CapacityExceeded,
}

impl RejectionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateEnrollment => "duplicate_enrollment",
            Self::CapacityExceeded => "capacity_exceeded",
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::DuplicateEnrollment => "already registered",
            Self::CapacityExceeded => "max course limit reached",
        }
    }
}

/// Per-item admission decisions, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdmissionPlan {
    pub admitted: Vec<i32>,
    pub rejected: Vec<(i32, RejectionReason)>,
}

/// Decide each requested course against the student's current enrollments.
///
/// Duplicates (including repeats within `requested`) never consume capacity.
/// The admitted total never exceeds [`MAX_ENROLLMENTS_PER_STUDENT`].
pub fn plan_admission(current: &[i32], requested: &[i32]) -> AdmissionPlan {
    let mut held: HashSet<i32> = current.iter().copied().collect();
    let mut plan = AdmissionPlan::default();
    for &course_id in requested {
        if held.contains(&course_id) {
            plan.rejected.push((course_id, RejectionReason::DuplicateEnrollment));
        } else if held.len() >= MAX_ENROLLMENTS_PER_STUDENT {
            plan.rejected.push((course_id, RejectionReason::CapacityExceeded));
        } else {
            held.insert(course_id);
            plan.admitted.push(course_id);
        }
    }
    plan
}

// ── Admission report ─────────────────────────────────────────────────────────

const UNKNOWN_COURSE: &str = "Unknown Course";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub course_id: i32,
    pub course_name: Option<String>,
    pub reason: RejectionReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmissionReport {
    pub admitted: Vec<i32>,
    pub rejected: Vec<Rejection>,
}

impl AdmissionReport {
    fn from_plan(plan: AdmissionPlan, names: &HashMap<i32, String>) -> Self {
        let rejected = plan
            .rejected
            .into_iter()
            .map(|(course_id, reason)| Rejection {
                course_id,
                course_name: names.get(&course_id).cloned(),
                reason,
            })
            .collect();
        Self {
            admitted: plan.admitted,
            rejected,
        }
    }

    pub fn admitted_count(&self) -> usize {
        self.admitted.len()
    }

    /// Human-readable summary shown to the student.
    pub fn message(&self) -> String {
        let items = self
            .rejected
            .iter()
            .map(|r| {
                format!(
                    "{} ({})",
                    r.course_name.as_deref().unwrap_or(UNKNOWN_COURSE),
                    r.reason.describe()
                )
            })
            .collect::<Vec<_>>()
            .join(", ");

        match (self.admitted.is_empty(), self.rejected.is_empty()) {
            (false, true) => self.success_sentence(),
            (false, false) => format!(
                "{} However, some courses could not be registered: {items}",
                self.success_sentence()
            ),
            (true, _) => format!("Some courses could not be registered: {items}"),
        }
    }

    fn success_sentence(&self) -> String {
        format!(
            "Successfully registered for {} course(s).",
            self.admitted_count()
        )
    }
}

// ── AdmitRegistrations ───────────────────────────────────────────────────────

pub struct AdmitRegistrationsUseCase<E: EnrollmentRepository, C: CourseRepository> {
    pub enrollments: E,
    pub courses: C,
    pub locks: Arc<StudentLocks>,
}

impl<E: EnrollmentRepository, C: CourseRepository> AdmitRegistrationsUseCase<E, C> {
    pub async fn execute(
        &self,
        student_id: &str,
        requested: &[i32],
    ) -> Result<AdmissionReport, PortalError> {
        if requested.is_empty() {
            return Err(PortalError::InvalidRequest(
                "at least one course must be selected".to_owned(),
            ));
        }

        let names = self.courses.find_names(requested).await?;
        if let Some(missing) = requested.iter().find(|id| !names.contains_key(*id)) {
            tracing::debug!(student_id, course_id = missing, "unknown course requested");
            return Err(PortalError::CourseNotFound);
        }

        let _guard = self.locks.acquire(student_id).await;

        let current = self.enrollments.find_enrolled_course_ids(student_id).await?;
        let plan = plan_admission(&current, requested);

        if !plan.admitted.is_empty() {
            let enrolled_at = Utc::now();
            let rows: Vec<NewEnrollment> = plan
                .admitted
                .iter()
                .map(|&course_id| NewEnrollment {
                    student_id: student_id.to_owned(),
                    course_id,
                    enrolled_at,
                })
                .collect();
            self.enrollments.insert_all(&rows).await?;
        }

        let report = AdmissionReport::from_plan(plan, &names);
        tracing::info!(
            student_id,
            admitted = report.admitted_count(),
            rejected = report.rejected.len(),
            "registration request processed"
        );
        Ok(report)
    }
}

// ── ListMyCourses ────────────────────────────────────────────────────────────

pub struct ListMyCoursesUseCase<E: EnrollmentRepository> {
    pub enrollments: E,
}

impl<E: EnrollmentRepository> ListMyCoursesUseCase<E> {
    pub async fn execute(&self, student_id: &str) -> Result<Vec<EnrolledCourse>, PortalError> {
        self.enrollments.list_for_student(student_id).await
    }
}
