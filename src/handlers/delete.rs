use crate::error::{item_id, ApiError, ErrorResponse};
use crate::routes;
use crate::state::AppState;
use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
};

/// DELETE /item/{id} handler - Remove an item
///
/// Responds with an empty body on success.
#[utoipa::path(
    delete,
    path = routes::ITEM,
    params(
        ("id" = i32, Path, description = "Item id")
    ),
    responses(
        (status = 200, description = "Item deleted"),
        (status = 400, description = "Id is not an integer", body = ErrorResponse),
        (status = 404, description = "Item not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "item"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(path)?;

    if !state.items.delete(id).await? {
        tracing::info!("Cannot delete missing item with id: {}", id);
        return Err(ApiError::ItemNotFound(id));
    }

    tracing::info!("Successfully deleted item with id: {}", id);
    Ok(StatusCode::OK)
}
