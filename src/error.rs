use axum::{
    extract::{rejection::PathRejection, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

pub const INVALID_INPUT: &str = "invalid input";
pub const ITEM_NOT_FOUND: &str = "item not found";

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every client-side mistake collapses into the same `invalid input` payload;
/// the detail carried by the variant is only logged.
#[derive(Debug)]
pub enum ApiError {
    /// Path parameter is not an integer id
    InvalidId(String),
    /// Request body failed validation
    InvalidInput(String),
    /// No item stored under this id
    ItemNotFound(i32),
    /// Document store operation error
    DatabaseError(anyhow::Error),
    /// Request body is not a JSON item
    JsonError(serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidId(raw) => {
                tracing::debug!("Rejected non-integer item id: '{}'", raw);
                (StatusCode::BAD_REQUEST, INVALID_INPUT)
            }
            ApiError::InvalidInput(reason) => {
                tracing::debug!("Rejected item payload: {}", reason);
                (StatusCode::BAD_REQUEST, INVALID_INPUT)
            }
            ApiError::JsonError(err) => {
                tracing::debug!("Rejected malformed item JSON: {}", err);
                (StatusCode::BAD_REQUEST, INVALID_INPUT)
            }
            ApiError::ItemNotFound(id) => {
                tracing::debug!("Item not found: {}", id);
                (StatusCode::NOT_FOUND, ITEM_NOT_FOUND)
            }
            ApiError::DatabaseError(err) => {
                tracing::error!("Database error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::DatabaseError(err)
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::InvalidId(rejection.body_text())
    }
}

/// Parse an item id taken verbatim from the request path.
pub fn parse_item_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

/// Item id from the `{id}` path segment, including segments axum could not decode
pub fn item_id(path: Result<Path<String>, PathRejection>) -> Result<i32, ApiError> {
    let Path(raw) = path?;
    parse_item_id(&raw)
}
