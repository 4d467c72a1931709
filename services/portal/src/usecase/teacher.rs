use crate::domain::repository::TeacherRepository;
use crate::domain::types::Teacher;
use crate::error::PortalError;

const NAME_MAX: usize = 100;

pub struct ListTeachersUseCase<T: TeacherRepository> {
    pub teachers: T,
}

impl<T: TeacherRepository> ListTeachersUseCase<T> {
    pub async fn execute(&self) -> Result<Vec<Teacher>, PortalError> {
        self.teachers.list().await
    }
}

pub struct CreateTeacherUseCase<T: TeacherRepository> {
    pub teachers: T,
}

impl<T: TeacherRepository> CreateTeacherUseCase<T> {
    pub async fn execute(&self, name: &str) -> Result<Teacher, PortalError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PortalError::InvalidTeacher("name is required".to_owned()));
        }
        if name.chars().count() > NAME_MAX {
            return Err(PortalError::InvalidTeacher(format!(
                "name must be at most {NAME_MAX} characters"
            )));
        }
        self.teachers.create(name).await
    }
}
