use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ClassSchedules::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassSchedules::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassSchedules::CourseId).integer().not_null())
                    .col(ColumnDef::new(ClassSchedules::TeacherId).integer().not_null())
                    .col(
                        ColumnDef::new(ClassSchedules::DayOfWeek)
                            .small_integer()
                            .not_null()
                            .check(
                                Expr::col(ClassSchedules::DayOfWeek)
                                    .gte(1)
                                    .and(Expr::col(ClassSchedules::DayOfWeek).lte(7)),
                            ),
                    )
                    .col(ColumnDef::new(ClassSchedules::StartTime).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::EndTime).time().not_null())
                    .col(ColumnDef::new(ClassSchedules::Room).string_len(50).null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassSchedules::Table, ClassSchedules::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ClassSchedules::Table, ClassSchedules::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClassSchedules::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ClassSchedules {
    Table,
    Id,
    CourseId,
    TeacherId,
    DayOfWeek,
    StartTime,
    EndTime,
    Room,
}

#[derive(Iden)]
enum Courses {
    Table,
    Id,
}

#[derive(Iden)]
enum Teachers {
    Table,
    Id,
}
