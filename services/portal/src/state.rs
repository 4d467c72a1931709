use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbCourseRepository, DbEnrollmentRepository, DbScheduleRepository, DbTeacherRepository,
};
use crate::infra::locks::StudentLocks;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub locks: Arc<StudentLocks>,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            locks: Arc::new(StudentLocks::new()),
        }
    }

    pub fn enrollment_repo(&self) -> DbEnrollmentRepository {
        DbEnrollmentRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn schedule_repo(&self) -> DbScheduleRepository {
        DbScheduleRepository {
            db: self.db.clone(),
        }
    }

    pub fn teacher_repo(&self) -> DbTeacherRepository {
        DbTeacherRepository {
            db: self.db.clone(),
        }
    }
}
