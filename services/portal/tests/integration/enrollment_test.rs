use std::sync::Arc;

use portal::domain::types::MAX_ENROLLMENTS_PER_STUDENT;
use portal::error::PortalError;
use portal::infra::locks::StudentLocks;
use portal::usecase::enrollment::{AdmitRegistrationsUseCase, RejectionReason};

use crate::helpers::{MockCourseRepo, MockEnrollmentRepo};

const STUDENT: &str = "student-42";

fn admit(
    repo: &MockEnrollmentRepo,
    locks: &Arc<StudentLocks>,
) -> AdmitRegistrationsUseCase<MockEnrollmentRepo, MockCourseRepo> {
    AdmitRegistrationsUseCase {
        enrollments: repo.clone(),
        courses: MockCourseRepo::numbered(20),
        locks: Arc::clone(locks),
    }
}

#[tokio::test]
async fn should_admit_last_slot_and_reject_overflow() {
    let repo = MockEnrollmentRepo::seeded(STUDENT, &[1, 2, 3, 4, 5]);
    let locks = Arc::new(StudentLocks::new());

    let report = admit(&repo, &locks)
        .execute(STUDENT, &[10, 11])
        .await
        .unwrap();

    assert_eq!(report.admitted, vec![10]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].course_id, 11);
    assert_eq!(report.rejected[0].reason, RejectionReason::CapacityExceeded);
    assert_eq!(
        report.message(),
        "Successfully registered for 1 course(s). However, some courses could not be \
         registered: Course 11 (max course limit reached)"
    );
    assert_eq!(repo.count_for(STUDENT), MAX_ENROLLMENTS_PER_STUDENT);
}

#[tokio::test]
async fn should_admit_each_distinct_course_once() {
    let repo = MockEnrollmentRepo::new();
    let locks = Arc::new(StudentLocks::new());

    let report = admit(&repo, &locks)
        .execute(STUDENT, &[1, 1, 2])
        .await
        .unwrap();

    assert_eq!(report.admitted, vec![1, 2]);
    assert_eq!(report.rejected.len(), 1);
    assert_eq!(report.rejected[0].course_id, 1);
    assert_eq!(
        report.rejected[0].reason,
        RejectionReason::DuplicateEnrollment
    );

    let rows = repo.rows_handle();
    let stored: Vec<i32> = rows.lock().unwrap().iter().map(|r| r.course_id).collect();
    assert_eq!(stored, vec![1, 2]);
}

#[tokio::test]
async fn should_report_all_duplicates_on_retry() {
    let repo = MockEnrollmentRepo::new();
    let locks = Arc::new(StudentLocks::new());
    let uc = admit(&repo, &locks);

    uc.execute(STUDENT, &[3, 4]).await.unwrap();
    let retry = uc.execute(STUDENT, &[3, 4]).await.unwrap();

    assert!(retry.admitted.is_empty());
    assert!(
        retry
            .rejected
            .iter()
            .all(|r| r.reason == RejectionReason::DuplicateEnrollment)
    );
    assert_eq!(
        retry.message(),
        "Some courses could not be registered: Course 3 (already registered), \
         Course 4 (already registered)"
    );
    assert_eq!(repo.count_for(STUDENT), 2);
}

#[tokio::test]
async fn should_reject_unknown_course_without_writing() {
    let repo = MockEnrollmentRepo::new();
    let locks = Arc::new(StudentLocks::new());

    let result = admit(&repo, &locks).execute(STUDENT, &[1, 404]).await;

    assert!(matches!(result, Err(PortalError::CourseNotFound)));
    assert_eq!(repo.count_for(STUDENT), 0);
}

#[tokio::test]
async fn should_reject_empty_request_without_writing() {
    let repo = MockEnrollmentRepo::new();
    let locks = Arc::new(StudentLocks::new());

    let result = admit(&repo, &locks).execute(STUDENT, &[]).await;

    assert!(matches!(result, Err(PortalError::InvalidRequest(_))));
    assert_eq!(repo.count_for(STUDENT), 0);
}

#[tokio::test]
async fn should_keep_students_independent() {
    let repo = MockEnrollmentRepo::seeded("other", &[1, 2, 3, 4, 5, 6]);
    let locks = Arc::new(StudentLocks::new());

    let report = admit(&repo, &locks)
        .execute(STUDENT, &[1, 2])
        .await
        .unwrap();

    assert_eq!(report.admitted, vec![1, 2]);
    assert_eq!(repo.count_for("other"), 6);
}

// ── Concurrency ──────────────────────────────────────────────────────────────

/// Without a shared lock both admissions read a count of 5 before either
/// writes, so the student ends up over the cap.
#[tokio::test]
async fn should_exceed_cap_when_admissions_are_not_serialized() {
    let repo = MockEnrollmentRepo::seeded(STUDENT, &[1, 2, 3, 4, 5]);
    let first = admit(&repo, &Arc::new(StudentLocks::new()));
    let second = admit(&repo, &Arc::new(StudentLocks::new()));

    let (a, b) = tokio::join!(first.execute(STUDENT, &[10]), second.execute(STUDENT, &[11]));

    assert_eq!(a.unwrap().admitted, vec![10]);
    assert_eq!(b.unwrap().admitted, vec![11]);
    assert_eq!(repo.count_for(STUDENT), MAX_ENROLLMENTS_PER_STUDENT + 1);
}

#[tokio::test]
async fn should_respect_cap_when_admissions_share_student_lock() {
    let repo = MockEnrollmentRepo::seeded(STUDENT, &[1, 2, 3, 4, 5]);
    let locks = Arc::new(StudentLocks::new());
    let first = admit(&repo, &locks);
    let second = admit(&repo, &locks);

    let (a, b) = tokio::join!(first.execute(STUDENT, &[10]), second.execute(STUDENT, &[11]));
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(a.admitted_count() + b.admitted_count(), 1);
    let rejected: Vec<RejectionReason> = a
        .rejected
        .iter()
        .chain(&b.rejected)
        .map(|r| r.reason)
        .collect();
    assert_eq!(rejected, vec![RejectionReason::CapacityExceeded]);
    assert_eq!(repo.count_for(STUDENT), MAX_ENROLLMENTS_PER_STUDENT);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn should_never_exceed_cap_under_parallel_load() {
    let repo = MockEnrollmentRepo::new();
    let locks = Arc::new(StudentLocks::new());

    let handles: Vec<_> = (1..=12)
        .map(|course_id| {
            let uc = admit(&repo, &locks);
            tokio::spawn(async move { uc.execute(STUDENT, &[course_id]).await })
        })
        .collect();

    let mut admitted = 0;
    for handle in handles {
        admitted += handle.await.unwrap().unwrap().admitted_count();
    }

    assert_eq!(admitted, MAX_ENROLLMENTS_PER_STUDENT);
    assert_eq!(repo.count_for(STUDENT), MAX_ENROLLMENTS_PER_STUDENT);
}
