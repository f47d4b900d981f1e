use common::{CreateAccountRequest, Role, UpdateAccountRequest};
use model::entities::{event, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::error::{Result, WorkflowError};
use crate::fields;

/// Keys every registration must carry.
pub const REQUIRED_ACCOUNT_FIELDS: [&str; 4] = ["username", "password", "email", "role"];
/// Additional keys for anything that is not an owner.
pub const REQUIRED_ARTIST_FIELDS: [&str; 3] = ["phone", "solo", "hour_price"];

const DUPLICATE_USER: &str = "User already exists!";

/// Checks a raw registration body for absent keys.
///
/// The artist profile keys are required unless the body explicitly asks for
/// the owner role.
pub fn require_registration_fields(body: &Value) -> Result<()> {
    let mut missing = fields::missing(body, &REQUIRED_ACCOUNT_FIELDS);
    let is_owner = body.get("role").and_then(Value::as_str) == Some(Role::Owner.as_str());
    if !is_owner {
        missing.extend(fields::missing(body, &REQUIRED_ARTIST_FIELDS));
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::MissingFields(missing))
    }
}

/// Creates an account. The password must already be hashed.
#[instrument(skip(db, request, password_hash), fields(username = %request.username))]
pub async fn register(
    db: &DatabaseConnection,
    request: CreateAccountRequest,
    password_hash: String,
) -> Result<user::Model> {
    let (phone, solo, hour_price) = match request.role {
        Role::Owner => (None, None, None),
        Role::Artist => match (request.phone, request.solo, request.hour_price) {
            (Some(phone), Some(solo), Some(hour_price)) => {
                (Some(phone), Some(solo), Some(hour_price))
            }
            (phone, solo, hour_price) => {
                let missing = [
                    ("phone", phone.is_none()),
                    ("solo", solo.is_none()),
                    ("hour_price", hour_price.is_none()),
                ]
                .into_iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name.to_string())
                .collect();
                return Err(WorkflowError::MissingFields(missing));
            }
        },
    };

    ensure_unique(db, None, Some(&request.username), Some(&request.email)).await?;

    let account = user::ActiveModel {
        username: Set(request.username),
        email: Set(request.email),
        password_hash: Set(password_hash),
        role: Set(request.role.into()),
        phone: Set(phone),
        solo: Set(solo),
        hour_price: Set(hour_price),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| WorkflowError::from_insert(err, DUPLICATE_USER))?;

    info!(
        "Account created with ID: {} ({})",
        account.id,
        Role::from(account.role).as_str()
    );
    Ok(account)
}

pub async fn find(db: &DatabaseConnection, id: i32) -> Result<user::Model> {
    user::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| WorkflowError::not_found("User", id))
}

pub async fn find_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    Ok(user::Entity::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await?)
}

pub async fn list_by_role(db: &DatabaseConnection, role: Role) -> Result<Vec<user::Model>> {
    let role: user::Role = role.into();
    Ok(user::Entity::find()
        .filter(user::Column::Role.eq(role))
        .order_by_asc(user::Column::Id)
        .all(db)
        .await?)
}

/// Partial update of the caller's own account.
///
/// The role can be repeated but never changed. Artist profile fields are
/// ignored for owners.
#[instrument(skip(db, actor, request, password_hash), fields(actor_id = actor.id))]
pub async fn update(
    db: &DatabaseConnection,
    actor: &user::Model,
    id: i32,
    request: UpdateAccountRequest,
    password_hash: Option<String>,
) -> Result<user::Model> {
    let account = find(db, id).await?;
    if account.id != actor.id {
        warn!("User {} tried to update account {}", actor.id, id);
        return Err(WorkflowError::PermissionDenied(
            "You can only update your own account".to_string(),
        ));
    }

    if let Some(role) = request.role {
        if user::Role::from(role) != account.role {
            return Err(WorkflowError::Validation(
                "role field cannot change".to_string(),
            ));
        }
    }

    ensure_unique(
        db,
        Some(account.id),
        request.username.as_deref(),
        request.email.as_deref(),
    )
    .await?;

    let is_owner = account.is_owner();
    let mut active = account.into_active_model();
    if let Some(username) = request.username {
        active.username = Set(username);
    }
    if let Some(email) = request.email {
        active.email = Set(email);
    }
    if let Some(hash) = password_hash {
        active.password_hash = Set(hash);
    }
    if !is_owner {
        if let Some(phone) = request.phone {
            active.phone = Set(Some(phone));
        }
        if let Some(solo) = request.solo {
            active.solo = Set(Some(solo));
        }
        if let Some(hour_price) = request.hour_price {
            active.hour_price = Set(Some(hour_price));
        }
    }

    let updated = active
        .update(db)
        .await
        .map_err(|err| WorkflowError::from_insert(err, DUPLICATE_USER))?;
    info!("Account {} updated", updated.id);
    Ok(updated)
}

/// Deletes the caller's own account together with its token, candidatures,
/// lineup slots and feedback. Owners must delete their events first.
#[instrument(skip(db, actor), fields(actor_id = actor.id))]
pub async fn delete(db: &DatabaseConnection, actor: &user::Model, id: i32) -> Result<()> {
    let account = find(db, id).await?;
    if account.id != actor.id {
        warn!("User {} tried to delete account {}", actor.id, id);
        return Err(WorkflowError::PermissionDenied(
            "You can only delete your own account".to_string(),
        ));
    }

    let events = event::Entity::find()
        .filter(event::Column::OwnerId.eq(account.id))
        .count(db)
        .await?;
    if events > 0 {
        return Err(WorkflowError::Conflict(format!(
            "Owner still has {} event(s)",
            events
        )));
    }

    account.delete(db).await?;
    info!("Account {} deleted", id);
    Ok(())
}

async fn ensure_unique(
    db: &DatabaseConnection,
    exclude: Option<i32>,
    username: Option<&str>,
    email: Option<&str>,
) -> Result<()> {
    let mut any = Condition::any();
    if let Some(username) = username {
        any = any.add(user::Column::Username.eq(username));
    }
    if let Some(email) = email {
        any = any.add(user::Column::Email.eq(email));
    }
    if username.is_none() && email.is_none() {
        return Ok(());
    }

    let mut query = user::Entity::find().filter(any);
    if let Some(id) = exclude {
        query = query.filter(user::Column::Id.ne(id));
    }

    if query.count(db).await? > 0 {
        debug!("Duplicate username or email");
        return Err(WorkflowError::Conflict(DUPLICATE_USER.to_string()));
    }
    Ok(())
}
