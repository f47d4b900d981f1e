use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(pk_auto(Users::Id))
                    .col(string(Users::Username).unique_key())
                    .col(string(Users::Email).unique_key())
                    .col(string(Users::PasswordHash))
                    .col(string_len(Users::Role, 10))
                    .col(string_len_null(Users::Phone, 15))
                    .col(boolean_null(Users::Solo))
                    .col(decimal_null(Users::HourPrice).decimal_len(16, 4))
                    .to_owned(),
            )
            .await?;

        // Create auth_tokens table
        manager
            .create_table(
                Table::create()
                    .table(AuthTokens::Table)
                    .if_not_exists()
                    .col(string(AuthTokens::Key).primary_key())
                    .col(integer(AuthTokens::UserId).unique_key())
                    .col(timestamp_with_time_zone(AuthTokens::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_auth_tokens_user")
                            .from(AuthTokens::Table, AuthTokens::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create addresses table
        manager
            .create_table(
                Table::create()
                    .table(Addresses::Table)
                    .if_not_exists()
                    .col(pk_auto(Addresses::Id))
                    .col(string_len(Addresses::Street, 255))
                    .col(string_len(Addresses::Neighbourhood, 255))
                    .col(integer(Addresses::Number))
                    .col(string_len(Addresses::City, 255))
                    .col(string_len(Addresses::State, 255))
                    .to_owned(),
            )
            .await?;

        // Create music_styles table
        manager
            .create_table(
                Table::create()
                    .table(MusicStyles::Table)
                    .if_not_exists()
                    .col(pk_auto(MusicStyles::Id))
                    .col(string_len(MusicStyles::Name, 100).unique_key())
                    .to_owned(),
            )
            .await?;

        // Create events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(pk_auto(Events::Id))
                    .col(timestamp_with_time_zone(Events::Datetime))
                    .col(string_len(Events::RepeatEvent, 10).default("None"))
                    .col(integer(Events::AddressId))
                    .col(integer(Events::OwnerId))
                    .col(text(Events::Details))
                    .col(decimal(Events::BasePrice).decimal_len(16, 4))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_address")
                            .from(Events::Table, Events::AddressId)
                            .to(Addresses::Table, Addresses::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_owner")
                            .from(Events::Table, Events::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create events_music_styles table (join table)
        manager
            .create_table(
                Table::create()
                    .table(EventsMusicStyles::Table)
                    .if_not_exists()
                    .col(integer(EventsMusicStyles::EventId))
                    .col(integer(EventsMusicStyles::MusicStyleId))
                    .primary_key(
                        Index::create()
                            .name("pk_events_music_styles")
                            .col(EventsMusicStyles::EventId)
                            .col(EventsMusicStyles::MusicStyleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_music_styles_event")
                            .from(EventsMusicStyles::Table, EventsMusicStyles::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_events_music_styles_style")
                            .from(EventsMusicStyles::Table, EventsMusicStyles::MusicStyleId)
                            .to(MusicStyles::Table, MusicStyles::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create event_candidatures table (join table)
        manager
            .create_table(
                Table::create()
                    .table(EventCandidatures::Table)
                    .if_not_exists()
                    .col(integer(EventCandidatures::EventId))
                    .col(integer(EventCandidatures::ArtistId))
                    .primary_key(
                        Index::create()
                            .name("pk_event_candidatures")
                            .col(EventCandidatures::EventId)
                            .col(EventCandidatures::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_candidatures_event")
                            .from(EventCandidatures::Table, EventCandidatures::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_candidatures_artist")
                            .from(EventCandidatures::Table, EventCandidatures::ArtistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create event_lineup table (join table with payload)
        manager
            .create_table(
                Table::create()
                    .table(EventLineup::Table)
                    .if_not_exists()
                    .col(integer(EventLineup::EventId))
                    .col(integer(EventLineup::ArtistId))
                    .col(timestamp_with_time_zone(EventLineup::PerformanceDatetime))
                    .primary_key(
                        Index::create()
                            .name("pk_event_lineup")
                            .col(EventLineup::EventId)
                            .col(EventLineup::ArtistId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_lineup_event")
                            .from(EventLineup::Table, EventLineup::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_lineup_artist")
                            .from(EventLineup::Table, EventLineup::ArtistId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Create feedbacks table
        manager
            .create_table(
                Table::create()
                    .table(Feedbacks::Table)
                    .if_not_exists()
                    .col(pk_auto(Feedbacks::Id))
                    .col(integer(Feedbacks::FromUserId))
                    .col(integer(Feedbacks::AddressedUserId))
                    .col(integer(Feedbacks::EventId))
                    .col(text(Feedbacks::Description))
                    .col(integer(Feedbacks::Stars))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedbacks_from_user")
                            .from(Feedbacks::Table, Feedbacks::FromUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedbacks_addressed_user")
                            .from(Feedbacks::Table, Feedbacks::AddressedUserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_feedbacks_event")
                            .from(Feedbacks::Table, Feedbacks::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop tables in reverse order to avoid foreign key constraints
        manager
            .drop_table(Table::drop().table(Feedbacks::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EventLineup::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EventCandidatures::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(EventsMusicStyles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Events::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(MusicStyles::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Addresses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AuthTokens::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    Role,
    Phone,
    Solo,
    HourPrice,
}

#[derive(DeriveIden)]
enum AuthTokens {
    Table,
    Key,
    UserId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Addresses {
    Table,
    Id,
    Street,
    Neighbourhood,
    Number,
    City,
    State,
}

#[derive(DeriveIden)]
enum MusicStyles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Events {
    Table,
    Id,
    Datetime,
    RepeatEvent,
    AddressId,
    OwnerId,
    Details,
    BasePrice,
}

#[derive(DeriveIden)]
enum EventsMusicStyles {
    Table,
    EventId,
    MusicStyleId,
}

#[derive(DeriveIden)]
enum EventCandidatures {
    Table,
    EventId,
    ArtistId,
}

#[derive(DeriveIden)]
enum EventLineup {
    Table,
    EventId,
    ArtistId,
    PerformanceDatetime,
}

#[derive(DeriveIden)]
pub(crate) enum Feedbacks {
    Table,
    FromUserId,
    AddressedUserId,
    Id,
    EventId,
    Description,
    Stars,
}
