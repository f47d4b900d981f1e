use crate::auth::{AuthUser, hash_password, verify_password};
use crate::helpers::{
    converters::account_response,
    payload::{JsonBody, parse},
};
use crate::schemas::{ApiError, ApiResponse, AppState, api_error, workflow_error};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use common::{
    AccountResponse, CreateAccountRequest, LoginRequest, Role, TokenResponse,
    UpdateAccountRequest,
};
use tracing::{debug, error, info, instrument, trace, warn};
use workflow::{account, fields, token};

/// Register an owner or artist account
#[utoipa::path(
    post,
    path = "/api/accounts/",
    tag = "accounts",
    request_body = CreateAccountRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn create_account(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<ApiResponse<AccountResponse>>), ApiError> {
    trace!("Entering create_account function");
    account::require_registration_fields(&body).map_err(workflow_error)?;
    let request: CreateAccountRequest = parse(body)?;
    debug!(
        "Registering account '{}' with role {}",
        request.username,
        request.role.as_str()
    );

    let password_hash = hash_password(&request.password)?;
    match account::register(&state.db, request, password_hash).await {
        Ok(user) => {
            info!("Account created successfully with ID: {}", user.id);
            let response = ApiResponse::new(account_response(user), "Account created successfully");
            Ok((StatusCode::CREATED, Json(response)))
        }
        Err(err) => {
            warn!("Failed to create account: {}", err);
            Err(workflow_error(err))
        }
    }
}

/// Exchange credentials for an API token
#[utoipa::path(
    post,
    path = "/api/login/",
    tag = "accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<TokenResponse>),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 406, description = "Required fields missing", body = ErrorResponse),
        (status = 415, description = "Credentials must be strings", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    trace!("Entering login function");
    fields::require(&body, &["username", "password"]).map_err(workflow_error)?;
    let request: LoginRequest = serde_json::from_value(body).map_err(|err| {
        debug!("Malformed credentials: {}", err);
        api_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "UNSUPPORTED_CREDENTIALS",
            "username and password must be strings",
        )
    })?;

    let user = match account::find_by_username(&state.db, &request.username).await {
        Ok(Some(user)) if verify_password(&request.password, &user.password_hash) => user,
        Ok(_) => {
            warn!("Failed login for username '{}'", request.username);
            return Err(api_error(
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid username or password",
            ));
        }
        Err(err) => return Err(workflow_error(err)),
    };

    match token::get_or_create_token(&state.db, user.id).await {
        Ok(key) => {
            info!("User {} logged in", user.id);
            Ok(Json(ApiResponse::new(
                TokenResponse { token: key },
                "Login successful",
            )))
        }
        Err(err) => {
            error!("Failed to issue token for user {}: {}", user.id, err);
            Err(workflow_error(err))
        }
    }
}

async fn list_role(state: &AppState, role: Role) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    let users = account::list_by_role(&state.db, role)
        .await
        .map_err(workflow_error)?;
    debug!("Retrieved {} {} accounts", users.len(), role.as_str());
    let accounts: Vec<AccountResponse> = users.into_iter().map(account_response).collect();
    Ok(Json(ApiResponse::new(accounts, "Accounts retrieved successfully")))
}

/// List artist accounts
#[utoipa::path(
    get,
    path = "/api/accounts/artists/",
    tag = "accounts",
    responses(
        (status = 200, description = "Artists retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_artists(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    list_role(&state, Role::Artist).await
}

/// List owner accounts
#[utoipa::path(
    get,
    path = "/api/accounts/owners/",
    tag = "accounts",
    responses(
        (status = 200, description = "Owners retrieved successfully", body = ApiResponse<Vec<AccountResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn list_owners(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<AccountResponse>>>, ApiError> {
    list_role(&state, Role::Owner).await
}

/// Get an account by ID
#[utoipa::path(
    get,
    path = "/api/accounts/{account_id}/",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 200, description = "Account retrieved successfully", body = ApiResponse<AccountResponse>),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn get_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    caller: AuthUser,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    trace!("Entering get_account function for account_id: {}", account_id);
    match account::find(&state.db, account_id).await {
        Ok(user) => Ok(Json(ApiResponse::new(
            account_response(user),
            "Account retrieved successfully",
        ))),
        Err(err) => {
            warn!("Account {} requested by {}: {}", account_id, caller.0.id, err);
            Err(workflow_error(err))
        }
    }
}

/// Partially update the caller's own account
#[utoipa::path(
    put,
    path = "/api/accounts/{account_id}/",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    request_body = UpdateAccountRequest,
    responses(
        (status = 200, description = "Account updated successfully", body = ApiResponse<AccountResponse>),
        (status = 400, description = "Invalid request or role change", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 409, description = "Username or email already taken", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller, body))]
pub async fn update_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    JsonBody(body): JsonBody,
) -> Result<Json<ApiResponse<AccountResponse>>, ApiError> {
    trace!("Entering update_account function for account_id: {}", account_id);
    let request: UpdateAccountRequest = parse(body)?;
    let password_hash = match request.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    match account::update(&state.db, &caller, account_id, request, password_hash).await {
        Ok(user) => {
            info!("Account {} updated", user.id);
            Ok(Json(ApiResponse::new(
                account_response(user),
                "Account updated successfully",
            )))
        }
        Err(err) => {
            warn!("Failed to update account {}: {}", account_id, err);
            Err(workflow_error(err))
        }
    }
}

/// Delete the caller's own account
#[utoipa::path(
    delete,
    path = "/api/accounts/{account_id}/",
    tag = "accounts",
    params(
        ("account_id" = i32, Path, description = "Account ID"),
    ),
    responses(
        (status = 204, description = "Account deleted successfully"),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Not your account", body = ErrorResponse),
        (status = 404, description = "Account not found", body = ErrorResponse),
        (status = 409, description = "Owner still has events", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    security(("token" = []))
)]
#[instrument(skip(state, caller))]
pub async fn delete_account(
    Path(account_id): Path<i32>,
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<StatusCode, ApiError> {
    trace!("Entering delete_account function for account_id: {}", account_id);
    match account::delete(&state.db, &caller, account_id).await {
        Ok(()) => {
            info!("Account {} deleted", account_id);
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            warn!("Failed to delete account {}: {}", account_id, err);
            Err(workflow_error(err))
        }
    }
}
