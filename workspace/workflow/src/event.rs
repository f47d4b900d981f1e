//! Event workflow: event CRUD and the candidature → lineup state machine.
//!
//! Per (event, artist) pair the states are `none`, `candidate` and
//! `lineup_member`. Artists move themselves from `none` to `candidate`; only
//! the event owner moves a candidate to the lineup or back to `none`.
//! An artist is never a candidate and a lineup member of the same event.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use common::{EventPayload, LineupEntry};
use model::entities::{
    address, candidature, event, event_music_style, lineup_entry, music_style, user,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, ModelTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, trace, warn};

use crate::error::{Result, WorkflowError};
use crate::lookup;

/// Keys every create and full update must carry.
pub const REQUIRED_EVENT_FIELDS: [&str; 5] =
    ["datetime", "details", "base_price", "address", "music_styles"];

/// An event with everything its response shapes need.
#[derive(Debug, Clone)]
pub struct EventSnapshot {
    pub event: event::Model,
    pub owner: user::Model,
    pub address: address::Model,
    pub music_styles: Vec<music_style::Model>,
    /// Ordered by artist id.
    pub lineup: Vec<lineup_entry::Model>,
    /// Candidate artists, ordered by id.
    pub candidates: Vec<user::Model>,
}

impl EventSnapshot {
    pub async fn load<C: ConnectionTrait>(db: &C, event: event::Model) -> Result<Self> {
        trace!("Loading snapshot of event {}", event.id);
        let owner = user::Entity::find_by_id(event.owner_id)
            .one(db)
            .await?
            .ok_or_else(|| WorkflowError::not_found("User", event.owner_id))?;
        let address = event
            .find_related(address::Entity)
            .one(db)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Address", event.address_id))?;
        let music_styles = event
            .find_related(music_style::Entity)
            .order_by_asc(music_style::Column::Id)
            .all(db)
            .await?;
        let lineup = event
            .find_related(lineup_entry::Entity)
            .order_by_asc(lineup_entry::Column::ArtistId)
            .all(db)
            .await?;

        let candidate_ids: Vec<i32> = event
            .find_related(candidature::Entity)
            .all(db)
            .await?
            .into_iter()
            .map(|c| c.artist_id)
            .collect();
        let candidates = if candidate_ids.is_empty() {
            Vec::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(candidate_ids))
                .order_by_asc(user::Column::Id)
                .all(db)
                .await?
        };

        Ok(Self {
            event,
            owner,
            address,
            music_styles,
            lineup,
            candidates,
        })
    }

    pub fn is_owned_by(&self, user: &user::Model) -> bool {
        self.event.owner_id == user.id
    }
}

async fn find_model<C: ConnectionTrait>(db: &C, id: i32) -> Result<event::Model> {
    event::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| WorkflowError::not_found("Event", id))
}

fn ensure_owner(event: &event::Model, actor: &user::Model) -> Result<()> {
    if event.owner_id != actor.id {
        warn!("User {} is not the owner of event {}", actor.id, event.id);
        return Err(WorkflowError::PermissionDenied(
            "Only the event owner can do this".to_string(),
        ));
    }
    Ok(())
}

/// Links the event to the named styles, in payload order, skipping repeats.
async fn link_music_styles<C: ConnectionTrait>(
    db: &C,
    event_id: i32,
    payload: &EventPayload,
) -> Result<()> {
    let mut seen = HashSet::new();
    for style in &payload.music_styles {
        if !seen.insert(style.name.as_str()) {
            continue;
        }
        let style = lookup::get_or_create_music_style(db, &style.name).await?;
        event_music_style::ActiveModel {
            event_id: Set(event_id),
            music_style_id: Set(style.id),
        }
        .insert(db)
        .await?;
    }
    Ok(())
}

pub async fn find_event(db: &DatabaseConnection, id: i32) -> Result<EventSnapshot> {
    let event = find_model(db, id).await?;
    EventSnapshot::load(db, event).await
}

/// Only owners create events.
pub fn ensure_can_create(actor: &user::Model) -> Result<()> {
    if actor.is_owner() {
        Ok(())
    } else {
        Err(WorkflowError::PermissionDenied(
            "Only owners can create events".to_string(),
        ))
    }
}

/// Creates an event owned by `actor`, resolving the address and music styles
/// in the same transaction.
#[instrument(skip(db, actor, payload), fields(actor_id = actor.id))]
pub async fn create_event(
    db: &DatabaseConnection,
    actor: &user::Model,
    payload: EventPayload,
) -> Result<EventSnapshot> {
    ensure_can_create(actor)?;
    debug!("Creating event at {} for owner {}", payload.datetime, actor.id);

    let txn = db.begin().await?;
    let address = lookup::get_or_create_address(&txn, &payload.address).await?;
    let event = event::ActiveModel {
        datetime: Set(payload.datetime),
        repeat_event: Set(payload.repeat_event.into()),
        address_id: Set(address.id),
        owner_id: Set(actor.id),
        details: Set(payload.details.clone()),
        base_price: Set(payload.base_price),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    link_music_styles(&txn, event.id, &payload).await?;
    txn.commit().await?;

    info!("Event created with ID: {}", event.id);
    EventSnapshot::load(db, event).await
}

/// Replaces every editable field of the event. Owner and workflow state are kept.
///
/// The new date may not fall before a day already booked in the lineup.
#[instrument(skip(db, actor, payload), fields(actor_id = actor.id))]
pub async fn update_event(
    db: &DatabaseConnection,
    actor: &user::Model,
    id: i32,
    payload: EventPayload,
) -> Result<EventSnapshot> {
    let existing = find_model(db, id).await?;
    ensure_owner(&existing, actor)?;

    let txn = db.begin().await?;
    let new_day = payload.datetime.date_naive();
    let booked = lineup_entry::Entity::find()
        .filter(lineup_entry::Column::EventId.eq(existing.id))
        .order_by_asc(lineup_entry::Column::ArtistId)
        .all(&txn)
        .await?;
    if let Some(slot) = booked
        .iter()
        .find(|slot| slot.performance_datetime.date_naive() > new_day)
    {
        return Err(WorkflowError::InvalidTransition(format!(
            "Performance datetime day is after event day for artist with id {}",
            slot.artist_id
        )));
    }

    let old_address_id = existing.address_id;
    let address = lookup::get_or_create_address(&txn, &payload.address).await?;

    let mut active = existing.into_active_model();
    active.datetime = Set(payload.datetime);
    active.repeat_event = Set(payload.repeat_event.into());
    active.address_id = Set(address.id);
    active.details = Set(payload.details.clone());
    active.base_price = Set(payload.base_price);
    let event = active.update(&txn).await?;

    event_music_style::Entity::delete_many()
        .filter(event_music_style::Column::EventId.eq(event.id))
        .exec(&txn)
        .await?;
    link_music_styles(&txn, event.id, &payload).await?;

    if old_address_id != address.id {
        lookup::prune_address(&txn, old_address_id).await?;
    }
    txn.commit().await?;

    info!("Event {} updated", event.id);
    EventSnapshot::load(db, event).await
}

#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn delete_event(db: &DatabaseConnection, actor: &user::Model, id: i32) -> Result<()> {
    let event = find_model(db, id).await?;
    ensure_owner(&event, actor)?;

    let txn = db.begin().await?;
    let address_id = event.address_id;
    event.delete(&txn).await?;
    lookup::prune_address(&txn, address_id).await?;
    txn.commit().await?;

    info!("Event {} deleted", id);
    Ok(())
}

/// Events owned by `owner`, soonest first.
pub async fn owned_events(
    db: &DatabaseConnection,
    owner: &user::Model,
) -> Result<Vec<EventSnapshot>> {
    let events = event::Entity::find()
        .filter(event::Column::OwnerId.eq(owner.id))
        .order_by_asc(event::Column::Datetime)
        .order_by_asc(event::Column::Id)
        .all(db)
        .await?;
    load_all(db, events).await
}

/// Events starting at or after `now`, soonest first.
pub async fn upcoming_events(
    db: &DatabaseConnection,
    now: DateTime<Utc>,
) -> Result<Vec<EventSnapshot>> {
    let events = event::Entity::find()
        .filter(event::Column::Datetime.gte(now))
        .order_by_asc(event::Column::Datetime)
        .order_by_asc(event::Column::Id)
        .all(db)
        .await?;
    load_all(db, events).await
}

async fn load_all(db: &DatabaseConnection, events: Vec<event::Model>) -> Result<Vec<EventSnapshot>> {
    let mut snapshots = Vec::with_capacity(events.len());
    for event in events {
        snapshots.push(EventSnapshot::load(db, event).await?);
    }
    Ok(snapshots)
}

/// Artist applies to an event: `none → candidate`.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn apply(db: &DatabaseConnection, actor: &user::Model, id: i32) -> Result<()> {
    let event = find_model(db, id).await?;
    if actor.is_owner() {
        return Err(WorkflowError::PermissionDenied(
            "Only artists can apply to events".to_string(),
        ));
    }

    let key = (event.id, actor.id);
    if lineup_entry::Entity::find_by_id(key).one(db).await?.is_some() {
        return Err(WorkflowError::Conflict(
            "Artist already in the lineup".to_string(),
        ));
    }
    if candidature::Entity::find_by_id(key).one(db).await?.is_some() {
        return Err(WorkflowError::Conflict(
            "Artist already applied to this event".to_string(),
        ));
    }

    candidature::ActiveModel {
        event_id: Set(event.id),
        artist_id: Set(actor.id),
    }
    .insert(db)
    .await
    .map_err(|err| WorkflowError::from_insert(err, "Artist already applied to this event"))?;

    info!("Artist {} applied to event {}", actor.id, event.id);
    Ok(())
}

/// Owner rejects candidates: `candidate → none`. Ids that are not
/// candidates are skipped, ids of unknown users are an error.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn remove_candidatures(
    db: &DatabaseConnection,
    actor: &user::Model,
    id: i32,
    artist_ids: &[i32],
) -> Result<EventSnapshot> {
    let event = find_model(db, id).await?;
    ensure_owner(&event, actor)?;

    let txn = db.begin().await?;
    for &artist_id in artist_ids {
        user::Entity::find_by_id(artist_id)
            .one(&txn)
            .await?
            .ok_or_else(|| WorkflowError::not_found("User", artist_id))?;
        let removed = candidature::Entity::delete_by_id((event.id, artist_id))
            .exec(&txn)
            .await?;
        debug!(
            "Removed {} candidature(s) of artist {} from event {}",
            removed.rows_affected, artist_id, event.id
        );
    }
    txn.commit().await?;

    EventSnapshot::load(db, event).await
}

/// Owner promotes candidates: `candidate → lineup_member`.
///
/// All entries are applied in one transaction; the first failing entry
/// aborts the request and nothing is changed.
#[instrument(skip(db, actor, entries), fields(actor_id = actor.id, entries = entries.len()))]
pub async fn promote(
    db: &DatabaseConnection,
    actor: &user::Model,
    id: i32,
    entries: &[LineupEntry],
) -> Result<EventSnapshot> {
    let event = find_model(db, id).await?;
    ensure_owner(&event, actor)?;
    let event_day = event.datetime.date_naive();

    let txn = db.begin().await?;
    for entry in entries {
        let artist = user::Entity::find_by_id(entry.artist_id)
            .one(&txn)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Artist", entry.artist_id))?;

        let candidature = candidature::Entity::find_by_id((event.id, artist.id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                WorkflowError::InvalidTransition(format!(
                    "Artist with id {} not in candidatures",
                    artist.id
                ))
            })?;

        if entry.performance_datetime.date_naive() > event_day {
            return Err(WorkflowError::InvalidTransition(format!(
                "Performance datetime day is after event day for artist with id {}",
                artist.id
            )));
        }

        candidature.delete(&txn).await?;
        lineup_entry::ActiveModel {
            event_id: Set(event.id),
            artist_id: Set(artist.id),
            performance_datetime: Set(entry.performance_datetime),
        }
        .insert(&txn)
        .await?;
        debug!("Artist {} moved to the lineup of event {}", artist.id, event.id);
    }
    txn.commit().await?;

    info!("Promoted {} artist(s) on event {}", entries.len(), event.id);
    EventSnapshot::load(db, event).await
}
