use super::{event, user};
use sea_orm::entity::prelude::*;

/// A pending application of an artist to an event.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "event_candidatures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub artist_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "event::Entity",
        from = "Column::EventId",
        to = "event::Column::Id"
    )]
    Event,
    #[sea_orm(
        belongs_to = "user::Entity",
        from = "Column::ArtistId",
        to = "user::Column::Id"
    )]
    Artist,
}

impl Related<event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Artist.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
