use sea_orm::entity::prelude::*;

/// A music style label shared by many events.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "music_styles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event_music_style::Entity")]
    EventMusicStyle,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        super::event_music_style::Relation::Event.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::event_music_style::Relation::MusicStyle.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for common::MusicStyleName {
    fn from(model: Model) -> Self {
        Self { name: model.name }
    }
}
