use axum::{
    Json, async_trait,
    body::Bytes,
    extract::{
        FromRequest, FromRequestParts, Query, Request,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, request::Parts},
};
use axum_valid::{Valid, ValidRejection};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use validator::Validate;

use crate::schemas::{ApiError, api_error};

/// Raw JSON body whose rejections use the `ErrorResponse` envelope.
#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Value>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> ApiError {
    debug!("Rejected JSON body: {}", rejection.body_text());
    let code = match rejection {
        JsonRejection::MissingJsonContentType(_) => "UNSUPPORTED_MEDIA_TYPE",
        _ => "INVALID_JSON",
    };
    api_error(rejection.status(), code, rejection.body_text())
}

/// Validated query string; both parse and validation failures become
/// `ErrorResponse` bodies.
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Valid::<Query<T>>::from_request_parts(parts, state).await {
            Ok(Valid(Query(query))) => Ok(ValidQuery(query)),
            Err(rejection) => Err(query_rejection(rejection)),
        }
    }
}

fn query_rejection(rejection: ValidRejection<QueryRejection>) -> ApiError {
    match rejection {
        ValidRejection::Valid(errors) => {
            debug!("Query failed validation: {}", errors);
            api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", errors.to_string())
        }
        ValidRejection::Inner(inner) => {
            debug!("Rejected query string: {}", inner.body_text());
            api_error(inner.status(), "INVALID_QUERY", inner.body_text())
        }
    }
}

/// Converts a body whose required keys were already checked into `T` and
/// runs its validators.
pub fn parse<T: DeserializeOwned + Validate>(body: Value) -> Result<T, ApiError> {
    let parsed: T = serde_json::from_value(body).map_err(|err| {
        debug!("Rejected payload: {}", err);
        api_error(StatusCode::BAD_REQUEST, "INVALID_PAYLOAD", err.to_string())
    })?;
    parsed.validate().map_err(|err| {
        debug!("Payload failed validation: {}", err);
        api_error(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.to_string())
    })?;
    Ok(parsed)
}

/// Reads an optional JSON body. Empty or whitespace-only bodies become `{}`.
pub fn optional_json(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|err| {
        api_error(StatusCode::BAD_REQUEST, "INVALID_JSON", err.to_string())
    })
}
