use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BatchRequests::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BatchRequests::RequestId)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BatchRequests::Owner).string().not_null())
                    .col(ColumnDef::new(BatchRequests::Name).string().not_null())
                    .col(
                        ColumnDef::new(BatchRequests::RequestType)
                            .string()
                            .not_null()
                            .default("web"),
                    )
                    .col(
                        ColumnDef::new(BatchRequests::Status)
                            .string()
                            .not_null()
                            .default("registering"),
                    )
                    .col(
                        ColumnDef::new(BatchRequests::SubmitDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BatchRequests::FinishedDate)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(BatchRequests::ReportFile).string().null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batch_requests_owner")
                    .table(BatchRequests::Table)
                    .col(BatchRequests::Owner)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_batch_requests_submit_date")
                    .table(BatchRequests::Table)
                    .col(BatchRequests::SubmitDate)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BatchRequests::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(super) enum BatchRequests {
    Table,
    RequestId,
    Owner,
    Name,
    RequestType,
    Status,
    SubmitDate,
    FinishedDate,
    ReportFile,
}
