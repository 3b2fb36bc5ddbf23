use sea_orm_migration::prelude::*;

mod m20240101_000001_create_batch_requests_table;
mod m20240101_000002_create_batch_domains_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_batch_requests_table::Migration),
            Box::new(m20240101_000002_create_batch_domains_table::Migration),
        ]
    }
}
