use super::{address, candidature, event_music_style, feedback, lineup_entry, music_style, user};
use sea_orm::entity::prelude::*;

/// How often an event repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum RepeatEvent {
    #[sea_orm(string_value = "Weekly")]
    Weekly,
    #[sea_orm(string_value = "Monthly")]
    Monthly,
    #[sea_orm(string_value = "None")]
    None,
}

impl From<common::RepeatEvent> for RepeatEvent {
    fn from(repeat: common::RepeatEvent) -> Self {
        match repeat {
            common::RepeatEvent::Weekly => RepeatEvent::Weekly,
            common::RepeatEvent::Monthly => RepeatEvent::Monthly,
            common::RepeatEvent::None => RepeatEvent::None,
        }
    }
}

impl From<RepeatEvent> for common::RepeatEvent {
    fn from(repeat: RepeatEvent) -> Self {
        match repeat {
            RepeatEvent::Weekly => common::RepeatEvent::Weekly,
            RepeatEvent::Monthly => common::RepeatEvent::Monthly,
            RepeatEvent::None => common::RepeatEvent::None,
        }
    }
}

/// A live-music event created by an owner.
///
/// The lineup and the candidature pool are kept in the `event_lineup` and
/// `event_candidatures` join tables; an artist is never in both for the same event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub datetime: DateTimeUtc,
    pub repeat_event: RepeatEvent,
    pub address_id: i32,
    /// Set at creation and never changed.
    pub owner_id: i32,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub base_price: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerId",
        to = "super::user::Column::Id"
    )]
    Owner,
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::AddressId",
        to = "super::address::Column::Id"
    )]
    Address,
    #[sea_orm(has_many = "super::event_music_style::Entity")]
    EventMusicStyle,
    #[sea_orm(has_many = "super::candidature::Entity")]
    Candidature,
    #[sea_orm(has_many = "super::lineup_entry::Entity")]
    LineupEntry,
    #[sea_orm(has_many = "super::feedback::Entity")]
    Feedback,
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}

impl Related<music_style::Entity> for Entity {
    fn to() -> RelationDef {
        event_music_style::Relation::MusicStyle.def()
    }
    fn via() -> Option<RelationDef> {
        Some(event_music_style::Relation::Event.def().rev())
    }
}

impl Related<event_music_style::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EventMusicStyle.def()
    }
}

impl Related<candidature::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Candidature.def()
    }
}

impl Related<lineup_entry::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LineupEntry.def()
    }
}

impl Related<feedback::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Feedback.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
