use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_batch_requests_table::BatchRequests;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BatchDomains::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatchDomains::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BatchDomains::BatchRequestId)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BatchDomains::Domain).string().not_null())
                    .col(
                        ColumnDef::new(BatchDomains::Status)
                            .string()
                            .not_null()
                            .default("waiting"),
                    )
                    .col(ColumnDef::new(BatchDomains::WebResult).text().null())
                    .col(ColumnDef::new(BatchDomains::MailResult).text().null())
                    .col(
                        ColumnDef::new(BatchDomains::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_batch_domains_batch_request_id")
                            .from(BatchDomains::Table, BatchDomains::BatchRequestId)
                            .to(BatchRequests::Table, BatchRequests::RequestId)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batch_domains_batch_request_id")
                    .table(BatchDomains::Table)
                    .col(BatchDomains::BatchRequestId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .unique()
                    .name("idx_batch_domains_request_domain")
                    .table(BatchDomains::Table)
                    .col(BatchDomains::BatchRequestId)
                    .col(BatchDomains::Domain)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BatchDomains::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BatchDomains {
    Table,
    Id,
    BatchRequestId,
    Domain,
    Status,
    WebResult,
    MailResult,
    UpdatedAt,
}
