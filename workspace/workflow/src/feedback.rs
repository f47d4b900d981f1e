use std::collections::HashMap;

use common::{CreateFeedbackRequest, FeedbackQuery};
use model::entities::{event, feedback, lineup_entry, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WorkflowError};
use crate::event::{EventSnapshot, find_event};

/// Keys every feedback body must carry.
pub const REQUIRED_FEEDBACK_FIELDS: [&str; 3] = ["description", "stars", "addressed_user"];

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;

/// A feedback row with its event and both users loaded.
#[derive(Debug, Clone)]
pub struct FeedbackSnapshot {
    pub feedback: feedback::Model,
    pub event: EventSnapshot,
    pub from_user: user::Model,
    pub addressed_user: user::Model,
}

/// Owner of the event or one of its lineup members. Candidates do not count.
async fn took_part(db: &DatabaseConnection, event: &event::Model, user_id: i32) -> Result<bool> {
    if event.owner_id == user_id {
        return Ok(true);
    }
    Ok(lineup_entry::Entity::find_by_id((event.id, user_id))
        .one(db)
        .await?
        .is_some())
}

/// Leaves feedback from `actor` to a counterpart on the same event.
#[instrument(skip(db, actor, request), fields(actor_id = actor.id, addressed_user = request.addressed_user))]
pub async fn create_feedback(
    db: &DatabaseConnection,
    actor: &user::Model,
    event_id: i32,
    request: CreateFeedbackRequest,
) -> Result<FeedbackSnapshot> {
    let event = find_event(db, event_id).await?;
    let addressed = user::Entity::find_by_id(request.addressed_user)
        .one(db)
        .await?
        .ok_or_else(|| WorkflowError::not_found("User", request.addressed_user))?;

    if !took_part(db, &event.event, actor.id).await? {
        warn!("User {} did not take part in event {}", actor.id, event_id);
        return Err(WorkflowError::PermissionDenied(
            "Only the event owner or lineup members can leave feedback".to_string(),
        ));
    }
    if actor.role == addressed.role {
        return Err(WorkflowError::Validation(
            "cannot feedback same type of user".to_string(),
        ));
    }
    if !took_part(db, &event.event, addressed.id).await? {
        return Err(WorkflowError::Validation(format!(
            "User with id {} did not take part in this event",
            addressed.id
        )));
    }

    let existing = feedback::Entity::find()
        .filter(feedback::Column::FromUserId.eq(actor.id))
        .filter(feedback::Column::AddressedUserId.eq(addressed.id))
        .count(db)
        .await?;
    if existing > 0 {
        debug!("User {} already addressed user {}", actor.id, addressed.id);
        return Err(WorkflowError::Conflict(
            "Feedback already sent to this user".to_string(),
        ));
    }

    let feedback = feedback::ActiveModel {
        from_user_id: Set(actor.id),
        addressed_user_id: Set(addressed.id),
        event_id: Set(event.event.id),
        description: Set(request.description),
        stars: Set(request.stars),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| WorkflowError::from_insert(err, "Feedback already sent to this user"))?;

    info!("Feedback created with ID: {}", feedback.id);
    Ok(FeedbackSnapshot {
        feedback,
        event,
        from_user: actor.clone(),
        addressed_user: addressed,
    })
}

/// All feedback left on an event, oldest first.
pub async fn list_for_event(
    db: &DatabaseConnection,
    event_id: i32,
) -> Result<Vec<FeedbackSnapshot>> {
    let event = find_event(db, event_id).await?;
    let rows = feedback::Entity::find()
        .filter(feedback::Column::EventId.eq(event_id))
        .order_by_asc(feedback::Column::Id)
        .all(db)
        .await?;

    let mut cache = HashMap::from([(event_id, event)]);
    load_all(db, rows, &mut cache).await
}

/// Filtered, paginated listing. `sent` restricts to feedback sent by `actor`.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn list_filtered(
    db: &DatabaseConnection,
    actor: &user::Model,
    query: &FeedbackQuery,
) -> Result<Vec<FeedbackSnapshot>> {
    let mut condition = Condition::all();
    if query.sent == Some(true) {
        condition = condition.add(feedback::Column::FromUserId.eq(actor.id));
    }
    if let Some(from_user) = query.from_user {
        condition = condition.add(feedback::Column::FromUserId.eq(from_user));
    }
    if let Some(addressed_user) = query.addressed_user {
        condition = condition.add(feedback::Column::AddressedUserId.eq(addressed_user));
    }

    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).max(1);
    debug!("Listing feedback page {} with limit {}", page, limit);

    let rows = feedback::Entity::find()
        .filter(condition)
        .order_by_asc(feedback::Column::Id)
        .paginate(db, limit)
        .fetch_page(page - 1)
        .await?;

    let mut cache = HashMap::new();
    load_all(db, rows, &mut cache).await
}

async fn load_all(
    db: &DatabaseConnection,
    rows: Vec<feedback::Model>,
    events: &mut HashMap<i32, EventSnapshot>,
) -> Result<Vec<FeedbackSnapshot>> {
    let mut snapshots = Vec::with_capacity(rows.len());
    for feedback in rows {
        let event = match events.get(&feedback.event_id) {
            Some(event) => event.clone(),
            None => {
                let event = find_event(db, feedback.event_id).await?;
                events.insert(feedback.event_id, event.clone());
                event
            }
        };
        let from_user = load_user(db, feedback.from_user_id).await?;
        let addressed_user = load_user(db, feedback.addressed_user_id).await?;
        snapshots.push(FeedbackSnapshot {
            feedback,
            event,
            from_user,
            addressed_user,
        });
    }
    Ok(snapshots)
}

async fn load_user(db: &DatabaseConnection, id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| WorkflowError::not_found("User", id))
}
