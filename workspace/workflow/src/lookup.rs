//! Idempotent lookup-or-insert of the rows events share.
//!
//! Every function takes the caller's connection so it runs inside the same
//! transaction as the event write that needs it.

use common::AddressPayload;
use model::entities::{address, event, music_style};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
};
use tracing::{debug, trace};

use crate::error::Result;

/// Reuses an address matching every field, or inserts it.
pub async fn get_or_create_address<C: ConnectionTrait>(
    db: &C,
    payload: &AddressPayload,
) -> Result<address::Model> {
    trace!("Looking up address {:?}", payload);
    let existing = address::Entity::find()
        .filter(address::Column::Street.eq(payload.street.as_str()))
        .filter(address::Column::Neighbourhood.eq(payload.neighbourhood.as_str()))
        .filter(address::Column::Number.eq(payload.number))
        .filter(address::Column::City.eq(payload.city.as_str()))
        .filter(address::Column::State.eq(payload.state.as_str()))
        .one(db)
        .await?;

    if let Some(address) = existing {
        debug!("Reusing address with ID: {}", address.id);
        return Ok(address);
    }

    let address = address::ActiveModel {
        street: Set(payload.street.clone()),
        neighbourhood: Set(payload.neighbourhood.clone()),
        number: Set(payload.number),
        city: Set(payload.city.clone()),
        state: Set(payload.state.clone()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!("Created address with ID: {}", address.id);
    Ok(address)
}

pub async fn get_or_create_music_style<C: ConnectionTrait>(
    db: &C,
    name: &str,
) -> Result<music_style::Model> {
    let existing = music_style::Entity::find()
        .filter(music_style::Column::Name.eq(name))
        .one(db)
        .await?;

    match existing {
        Some(style) => Ok(style),
        None => {
            let style = music_style::ActiveModel {
                name: Set(name.to_string()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            debug!("Created music style '{}' with ID: {}", style.name, style.id);
            Ok(style)
        }
    }
}

/// Deletes the address when no event points at it any more.
pub async fn prune_address<C: ConnectionTrait>(db: &C, address_id: i32) -> Result<bool> {
    let users = event::Entity::find()
        .filter(event::Column::AddressId.eq(address_id))
        .count(db)
        .await?;
    if users > 0 {
        return Ok(false);
    }

    address::Entity::delete_by_id(address_id).exec(db).await?;
    debug!("Removed orphaned address with ID: {}", address_id);
    Ok(true)
}
