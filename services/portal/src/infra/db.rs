use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, FromQueryResult, IntoActiveModel as _, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, SqlErr,
    Statement, TransactionTrait,
    sea_query::{Expr, extension::postgres::PgExpr as _},
};

use portal_domain::pagination::PageRequest;
use portal_domain::weekday::DayOfWeek;
use portal_schema::{class_schedules, courses, enrollments, teachers};

use crate::domain::repository::{
    CourseRepository, EnrollmentRepository, ScheduleRepository, TeacherRepository,
};
use crate::domain::types::{
    Course, CourseFields, EnrolledCourse, MAX_ENROLLMENTS_PER_STUDENT, NewEnrollment,
    ScheduleEntry, ScheduleFields, Teacher,
};
use crate::error::PortalError;

// ── Enrollment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEnrollmentRepository {
    pub db: DatabaseConnection,
}

impl EnrollmentRepository for DbEnrollmentRepository {
    async fn find_enrolled_course_ids(&self, student_id: &str) -> Result<Vec<i32>, PortalError> {
        let ids = enrollments::Entity::find()
            .select_only()
            .column(enrollments::Column::CourseId)
            .filter(enrollments::Column::StudentId.eq(student_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await
            .context("find enrolled course ids")?;
        Ok(ids)
    }

    async fn insert_all(&self, rows: &[NewEnrollment]) -> Result<(), PortalError> {
        let Some(first) = rows.first() else {
            return Ok(());
        };
        let student_id = first.student_id.clone();
        let models: Vec<enrollments::ActiveModel> = rows
            .iter()
            .map(|row| enrollments::ActiveModel {
                student_id: Set(row.student_id.clone()),
                course_id: Set(row.course_id),
                enrolled_at: Set(row.enrolled_at),
                ..Default::default()
            })
            .collect();
        let incoming = models.len();

        self.db
            .transaction::<_, (), DbErr>(move |txn| {
                Box::pin(async move {
                    // Serializes admissions for one student across service instances
                    // until the transaction ends.
                    txn.execute(Statement::from_sql_and_values(
                        txn.get_database_backend(),
                        "SELECT pg_advisory_xact_lock(hashtext($1))",
                        [student_id.clone().into()],
                    ))
                    .await?;

                    let held = enrollments::Entity::find()
                        .filter(enrollments::Column::StudentId.eq(student_id.as_str()))
                        .count(txn)
                        .await?;
                    ensure_within_cap(&student_id, held, incoming)?;

                    enrollments::Entity::insert_many(models).exec(txn).await?;
                    Ok(())
                })
            })
            .await
            .context("insert enrollments")?;
        Ok(())
    }

    async fn list_for_student(
        &self,
        student_id: &str,
    ) -> Result<Vec<EnrolledCourse>, PortalError> {
        let rows = enrollments::Entity::find()
            .filter(enrollments::Column::StudentId.eq(student_id))
            .order_by_asc(enrollments::Column::EnrolledAt)
            .order_by_asc(enrollments::Column::Id)
            .find_also_related(courses::Entity)
            .all(&self.db)
            .await
            .context("list enrollments for student")?;
        Ok(rows
            .into_iter()
            .filter_map(|(enrollment, course)| {
                course.map(|course| EnrolledCourse {
                    enrollment_id: enrollment.id,
                    course: course_from_model(course),
                    enrolled_at: enrollment.enrolled_at,
                })
            })
            .collect())
    }
}

/// Cap re-check run inside the insert transaction, after the advisory lock.
fn ensure_within_cap(student_id: &str, held: u64, incoming: usize) -> Result<(), DbErr> {
    let held = usize::try_from(held).unwrap_or(usize::MAX);
    if held.saturating_add(incoming) > MAX_ENROLLMENTS_PER_STUDENT {
        return Err(DbErr::Custom(format!(
            "enrollment cap exceeded for student {student_id}: {held} held, {incoming} incoming"
        )));
    }
    Ok(())
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl CourseRepository for DbCourseRepository {
    async fn find_names(&self, ids: &[i32]) -> Result<HashMap<i32, String>, PortalError> {
        let rows = courses::Entity::find()
            .select_only()
            .column(courses::Column::Id)
            .column(courses::Column::Name)
            .filter(courses::Column::Id.is_in(ids.iter().copied()))
            .into_tuple::<(i32, String)>()
            .all(&self.db)
            .await
            .context("find course names")?;
        Ok(rows.into_iter().collect())
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: PageRequest,
    ) -> Result<Vec<Course>, PortalError> {
        let mut query = courses::Entity::find();
        if let Some(text) = search {
            let pattern = format!("%{}%", escape_like(text));
            query = query.filter(
                Condition::any()
                    .add(Expr::col((courses::Entity, courses::Column::Code)).ilike(&pattern))
                    .add(Expr::col((courses::Entity, courses::Column::Name)).ilike(&pattern))
                    .add(Expr::col((courses::Entity, courses::Column::Faculty)).ilike(&pattern)),
            );
        }
        let page = page.clamped();
        let models = query
            .order_by_asc(courses::Column::Id)
            .offset(page.offset())
            .limit(u64::from(page.per_page))
            .all(&self.db)
            .await
            .context("list courses")?;
        Ok(models.into_iter().map(course_from_model).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Course>, PortalError> {
        let model = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course by id")?;
        Ok(model.map(course_from_model))
    }

    async fn create(&self, fields: &CourseFields) -> Result<Course, PortalError> {
        let model = courses::ActiveModel {
            code: Set(fields.code.clone()),
            name: Set(fields.name.clone()),
            faculty: Set(fields.faculty.clone()),
            duration: Set(fields.duration.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create course")?;
        Ok(course_from_model(model))
    }

    async fn update(
        &self,
        id: i32,
        fields: &CourseFields,
    ) -> Result<Option<Course>, PortalError> {
        let Some(model) = courses::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find course for update")?
        else {
            return Ok(None);
        };
        let mut am = model.into_active_model();
        am.code = Set(fields.code.clone());
        am.name = Set(fields.name.clone());
        am.faculty = Set(fields.faculty.clone());
        am.duration = Set(fields.duration.clone());
        let model = am.update(&self.db).await.context("update course")?;
        Ok(Some(course_from_model(model)))
    }

    async fn delete(&self, id: i32) -> Result<bool, PortalError> {
        let result = courses::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(course_delete_error)?;
        Ok(result.rows_affected > 0)
    }

    async fn is_referenced(&self, id: i32) -> Result<bool, PortalError> {
        let enrolled = enrollments::Entity::find()
            .filter(enrollments::Column::CourseId.eq(id))
            .count(&self.db)
            .await
            .context("count enrollments for course")?;
        if enrolled > 0 {
            return Ok(true);
        }
        let scheduled = class_schedules::Entity::find()
            .filter(class_schedules::Column::CourseId.eq(id))
            .count(&self.db)
            .await
            .context("count schedules for course")?;
        Ok(scheduled > 0)
    }
}

fn course_from_model(model: courses::Model) -> Course {
    Course {
        id: model.id,
        code: model.code,
        name: model.name,
        faculty: model.faculty,
        duration: model.duration,
    }
}

/// A foreign-key violation on delete means a row began referencing the course
/// after the reference check ran.
fn course_delete_error(err: DbErr) -> PortalError {
    if matches!(err.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) {
        tracing::debug!(error = %err, "course gained a reference before delete");
        return PortalError::CourseInUse;
    }
    anyhow::Error::new(err).context("delete course").into()
}

/// Escape `LIKE` wildcards so search text matches literally.
fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

// ── Schedule repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbScheduleRepository {
    pub db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct ScheduleRow {
    id: i32,
    course_id: i32,
    teacher_id: i32,
    day_of_week: i16,
    start_time: chrono::NaiveTime,
    end_time: chrono::NaiveTime,
    room: Option<String>,
    course_code: String,
    course_name: String,
    teacher_name: String,
}

impl DbScheduleRepository {
    async fn select(&self, filter: Condition) -> Result<Vec<ScheduleEntry>, PortalError> {
        let rows = class_schedules::Entity::find()
            .select_only()
            .columns([
                class_schedules::Column::Id,
                class_schedules::Column::CourseId,
                class_schedules::Column::TeacherId,
                class_schedules::Column::DayOfWeek,
                class_schedules::Column::StartTime,
                class_schedules::Column::EndTime,
                class_schedules::Column::Room,
            ])
            .column_as(courses::Column::Code, "course_code")
            .column_as(courses::Column::Name, "course_name")
            .column_as(teachers::Column::Name, "teacher_name")
            .join(JoinType::InnerJoin, class_schedules::Relation::Course.def())
            .join(JoinType::InnerJoin, class_schedules::Relation::Teacher.def())
            .filter(filter)
            .order_by_asc(class_schedules::Column::DayOfWeek)
            .order_by_asc(class_schedules::Column::StartTime)
            .order_by_asc(class_schedules::Column::Id)
            .into_model::<ScheduleRow>()
            .all(&self.db)
            .await
            .context("select class schedules")?;
        rows.into_iter().map(schedule_from_row).collect()
    }
}

impl ScheduleRepository for DbScheduleRepository {
    async fn list_all(&self) -> Result<Vec<ScheduleEntry>, PortalError> {
        self.select(Condition::all()).await
    }

    async fn list_for_courses(
        &self,
        course_ids: &[i32],
    ) -> Result<Vec<ScheduleEntry>, PortalError> {
        if course_ids.is_empty() {
            return Ok(vec![]);
        }
        self.select(
            Condition::all().add(class_schedules::Column::CourseId.is_in(course_ids.iter().copied())),
        )
        .await
    }

    async fn get(&self, id: i32) -> Result<Option<ScheduleEntry>, PortalError> {
        let mut rows = self
            .select(Condition::all().add(class_schedules::Column::Id.eq(id)))
            .await?;
        Ok(rows.pop())
    }

    async fn create(&self, fields: &ScheduleFields) -> Result<i32, PortalError> {
        let model = class_schedules::ActiveModel {
            course_id: Set(fields.course_id),
            teacher_id: Set(fields.teacher_id),
            day_of_week: Set(i16::from(fields.day_of_week)),
            start_time: Set(fields.start_time),
            end_time: Set(fields.end_time),
            room: Set(fields.room.clone()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create class schedule")?;
        Ok(model.id)
    }

    async fn update(&self, id: i32, fields: &ScheduleFields) -> Result<bool, PortalError> {
        let Some(model) = class_schedules::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find class schedule for update")?
        else {
            return Ok(false);
        };
        let mut am = model.into_active_model();
        am.course_id = Set(fields.course_id);
        am.teacher_id = Set(fields.teacher_id);
        am.day_of_week = Set(i16::from(fields.day_of_week));
        am.start_time = Set(fields.start_time);
        am.end_time = Set(fields.end_time);
        am.room = Set(fields.room.clone());
        am.update(&self.db)
            .await
            .context("update class schedule")?;
        Ok(true)
    }

    async fn delete(&self, id: i32) -> Result<bool, PortalError> {
        let result = class_schedules::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete class schedule")?;
        Ok(result.rows_affected > 0)
    }
}

fn schedule_from_row(row: ScheduleRow) -> Result<ScheduleEntry, PortalError> {
    let day = u8::try_from(row.day_of_week)
        .ok()
        .and_then(|d| DayOfWeek::try_from(d).ok())
        .with_context(|| {
            format!(
                "class schedule {} has invalid day_of_week {}",
                row.id, row.day_of_week
            )
        })?;
    Ok(ScheduleEntry {
        id: row.id,
        course_id: row.course_id,
        course_code: row.course_code,
        course_name: row.course_name,
        teacher_id: row.teacher_id,
        teacher_name: row.teacher_name,
        day,
        start_time: row.start_time,
        end_time: row.end_time,
        room: row.room,
    })
}

// ── Teacher repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbTeacherRepository {
    pub db: DatabaseConnection,
}

impl TeacherRepository for DbTeacherRepository {
    async fn list(&self) -> Result<Vec<Teacher>, PortalError> {
        let models = teachers::Entity::find()
            .order_by_asc(teachers::Column::Name)
            .order_by_asc(teachers::Column::Id)
            .all(&self.db)
            .await
            .context("list teachers")?;
        Ok(models.into_iter().map(teacher_from_model).collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Teacher>, PortalError> {
        let model = teachers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find teacher by id")?;
        Ok(model.map(teacher_from_model))
    }

    async fn create(&self, name: &str) -> Result<Teacher, PortalError> {
        let model = teachers::ActiveModel {
            name: Set(name.to_owned()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .context("create teacher")?;
        Ok(teacher_from_model(model))
    }
}

fn teacher_from_model(model: teachers::Model) -> Teacher {
    Teacher {
        id: model.id,
        name: model.name,
    }
}
