use sea_orm_migration::prelude::*;

mod m20250701_000001_create_courses;
mod m20250701_000002_create_teachers;
mod m20250701_000003_create_class_schedules;
mod m20250701_000004_create_enrollments;
mod m20250701_000005_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250701_000001_create_courses::Migration),
            Box::new(m20250701_000002_create_teachers::Migration),
            Box::new(m20250701_000003_create_class_schedules::Migration),
            Box::new(m20250701_000004_create_enrollments::Migration),
            Box::new(m20250701_000005_add_lookup_indexes::Migration),
        ]
    }
}
