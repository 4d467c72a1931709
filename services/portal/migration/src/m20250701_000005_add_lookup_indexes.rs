use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::CourseId)
                    .name("idx_class_schedules_course_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ClassSchedules::Table)
                    .col(ClassSchedules::TeacherId)
                    .name("idx_class_schedules_teacher_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Enrollments::Table)
                    .col(Enrollments::CourseId)
                    .name("idx_enrollments_course_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_enrollments_course_id").to_owned())
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_teacher_id")
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_class_schedules_course_id")
                    .to_owned(),
            )
            .await
    }
}

#[derive(Iden)]
enum ClassSchedules {
    Table,
    CourseId,
    TeacherId,
}

#[derive(Iden)]
enum Enrollments {
    Table,
    CourseId,
}
