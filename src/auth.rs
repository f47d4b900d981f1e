//! Password hashing and token authentication.
//!
//! Clients send `Authorization: Token <key>`. Keys map to user ids through a
//! short-lived cache; the user row itself is read on every request so role
//! and profile changes are seen immediately.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
};
use model::entities::user;
use tracing::{debug, trace, warn};
use workflow::{WorkflowError, account, token};

use crate::schemas::{ApiError, AppState, api_error, workflow_error};

const TOKEN_PREFIX: &str = "Token ";

fn hasher() -> Result<Argon2<'static>, argon2::Error> {
    let params = Params::new(19456, 2, 1, None)?;
    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Argon2id PHC string for `password`.
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    hasher()
        .map_err(|err| err.to_string())
        .and_then(|argon| {
            argon
                .hash_password(password.as_bytes(), &salt)
                .map(|hash| hash.to_string())
                .map_err(|err| err.to_string())
        })
        .map_err(|err| {
            warn!("Failed to hash password: {}", err);
            api_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "HASH_ERROR",
                "Failed to hash password",
            )
        })
}

/// False for a wrong password and for a malformed stored hash.
pub fn verify_password(password: &str, phc: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(phc) else {
        return false;
    };
    match hasher() {
        Ok(argon) => argon.verify_password(password.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

fn unauthorized(message: &str) -> ApiError {
    api_error(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", message)
}

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub user::Model);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let key = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix(TOKEN_PREFIX))
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| unauthorized("Authentication credentials were not provided"))?;

        let user_id = match state.token_cache.get(key).await {
            Some(user_id) => {
                trace!("Token cache hit for user {}", user_id);
                user_id
            }
            None => match token::user_id_for_token(&state.db, key).await {
                Ok(Some(user_id)) => {
                    state.token_cache.insert(key.to_string(), user_id).await;
                    user_id
                }
                Ok(None) => {
                    debug!("Unknown token presented");
                    return Err(unauthorized("Invalid token"));
                }
                Err(err) => return Err(workflow_error(err)),
            },
        };

        match account::find(&state.db, user_id).await {
            Ok(user) => Ok(AuthUser(user)),
            Err(WorkflowError::NotFound { .. }) => {
                state.token_cache.invalidate(key).await;
                Err(unauthorized("Invalid token"))
            }
            Err(err) => Err(workflow_error(err)),
        }
    }
}
