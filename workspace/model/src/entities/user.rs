use sea_orm::entity::prelude::*;

/// Role of an account, stored as a short string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum Role {
    #[sea_orm(string_value = "owner")]
    Owner,
    #[sea_orm(string_value = "artist")]
    Artist,
}

impl From<common::Role> for Role {
    fn from(role: common::Role) -> Self {
        match role {
            common::Role::Owner => Role::Owner,
            common::Role::Artist => Role::Artist,
        }
    }
}

impl From<Role> for common::Role {
    fn from(role: Role) -> Self {
        match role {
            Role::Owner => common::Role::Owner,
            Role::Artist => common::Role::Artist,
        }
    }
}

/// Represents an account: either an event owner or a performing artist.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub username: String,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string.
    pub password_hash: String,
    /// Fixed at registration.
    pub role: Role,
    // Artist profile. Always empty for owners.
    pub phone: Option<String>,
    pub solo: Option<bool>,
    pub hour_price: Option<Decimal>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Events created by this user (owners only).
    #[sea_orm(has_many = "super::event::Entity")]
    Event,
    #[sea_orm(has_many = "super::auth_token::Entity")]
    AuthToken,
}

impl Related<super::auth_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AuthToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}
