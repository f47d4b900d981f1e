use super::event;
use sea_orm::entity::prelude::*;

/// Rating and comment left by one participant of an event for another.
///
/// Sender and recipient always have different roles, and a sender addresses
/// a given recipient at most once.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedbacks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub from_user_id: i32,
    pub addressed_user_id: i32,
    pub event_id: i32,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub stars: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FromUserId",
        to = "super::user::Column::Id"
    )]
    FromUser,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AddressedUserId",
        to = "super::user::Column::Id"
    )]
    AddressedUser,
    #[sea_orm(
        belongs_to = "event::Entity",
        from = "Column::EventId",
        to = "event::Column::Id"
    )]
    Event,
}

impl Related<event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
