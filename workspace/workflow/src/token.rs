use chrono::Utc;
use model::entities::auth_token;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;

/// Returns the user's token, issuing one on first login.
pub async fn get_or_create_token(db: &DatabaseConnection, user_id: i32) -> Result<String> {
    let txn = db.begin().await?;

    let existing = auth_token::Entity::find()
        .filter(auth_token::Column::UserId.eq(user_id))
        .one(&txn)
        .await?;
    let key = match existing {
        Some(token) => token.key,
        None => {
            let token = auth_token::ActiveModel {
                key: Set(Uuid::new_v4().simple().to_string()),
                user_id: Set(user_id),
                created_at: Set(Utc::now()),
            }
            .insert(&txn)
            .await?;
            debug!("Issued token for user {}", user_id);
            token.key
        }
    };

    txn.commit().await?;
    Ok(key)
}

pub async fn user_id_for_token(db: &DatabaseConnection, key: &str) -> Result<Option<i32>> {
    Ok(auth_token::Entity::find_by_id(key.to_string())
        .one(db)
        .await?
        .map(|token| token.user_id))
}
