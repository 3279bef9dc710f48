pub use sea_orm_migration::prelude::*;

mod m20250101_000000_members;
mod m20250101_000100_membership_details;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000000_members::Migration),
            Box::new(m20250101_000100_membership_details::Migration),
        ]
    }
}
