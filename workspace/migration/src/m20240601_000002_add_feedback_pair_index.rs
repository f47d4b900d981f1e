use sea_orm_migration::prelude::*;

use crate::m20240601_000001_create_table::Feedbacks;

const INDEX_NAME: &str = "idx_feedbacks_from_user_addressed_user";

/// One feedback per sender and recipient, whatever the event.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .name(INDEX_NAME)
                    .table(Feedbacks::Table)
                    .col(Feedbacks::FromUserId)
                    .col(Feedbacks::AddressedUserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name(INDEX_NAME).table(Feedbacks::Table).to_owned())
            .await
    }
}
