use sea_orm::entity::prelude::*;

/// Street address of an event. Rows are shared by identical addresses.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub street: String,
    pub neighbourhood: String,
    pub number: i32,
    pub city: String,
    pub state: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for common::Address {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            street: model.street,
            neighbourhood: model.neighbourhood,
            number: model.number,
            city: model.city,
            state: model.state,
        }
    }
}
