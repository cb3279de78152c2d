use crate::error::{item_id, ApiError, ErrorResponse};
use crate::models::{Item, ItemPayload};
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    Json,
};

/// PUT /item/{id} handler - Replace the name, quantity and value of an item
///
/// The id in the path is authoritative. A body may leave `id` out, but a
/// body id that names a different item is rejected.
#[utoipa::path(
    put,
    path = routes::ITEM,
    params(
        ("id" = i32, Path, description = "Item id")
    ),
    request_body(content = ItemPayload, content_type = "application/json"),
    responses(
        (status = 200, description = "Item updated", body = Item),
        (status = 400, description = "Id is not an integer, or the body is invalid", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "item"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    body: Bytes,
) -> Result<(StatusCode, Json<Item>), ApiError> {
    let id = item_id(path)?;
    let payload: ItemPayload = serde_json::from_slice(&body)?;
    let changes = payload.into_changes(id)?;

    match state.items.update(id, changes).await? {
        Some(item) => {
            tracing::info!("Successfully updated item with id: {}", id);
            Ok((StatusCode::OK, Json(item)))
        }
        None => {
            tracing::info!("Cannot update missing item with id: {}", id);
            Err(ApiError::ItemNotFound(id))
        }
    }
}
