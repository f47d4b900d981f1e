use super::{event, music_style};
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "events_music_styles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub event_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub music_style_id: i32,
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
        belongs_to = "music_style::Entity",
        from = "Column::MusicStyleId",
        to = "music_style::Column::Id"
    )]
    MusicStyle,
}

impl Related<event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl Related<music_style::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MusicStyle.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
