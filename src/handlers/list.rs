use crate::error::{ApiError, ErrorResponse};
use crate::models::Item;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /item handler - List every stored item
///
/// Returns an empty array when the store holds no items.
#[utoipa::path(
    get,
    path = routes::ITEMS,
    responses(
        (status = 200, description = "All items, ordered by id", body = [Item]),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "item"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<Item>>), ApiError> {
    let items = state.items.get_all_items().await?;

    tracing::info!("Listed {} items", items.len());
    Ok((StatusCode::OK, Json(items)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hammer, memory_state, seeded_state, send, unavailable_state};
    use axum::{routing::get, Router};

    fn app(state: AppState) -> Router {
        Router::new()
            .route(routes::ITEMS, get(list_handler))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_list_endpoint_empty() {
        let response = send(app(memory_state()), "GET", "/item", None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(&response.body[..], b"[]");
    }

    #[tokio::test]
    async fn test_list_endpoint_with_data() {
        let second = Item {
            id: 2000,
            name: "wrench".to_string(),
            quantity: 0,
            value: 8.0,
        };
        let state = seeded_state(&[second.clone(), hammer()]).await;

        let response = send(app(state), "GET", "/item", None).await;

        assert_eq!(response.status, StatusCode::OK);
        let items: Vec<Item> = response.json();
        assert_eq!(items, vec![hammer(), second]);
    }

    #[tokio::test]
    async fn test_list_endpoint_store_unavailable() {
        let response = send(app(unavailable_state()), "GET", "/item", None).await;

        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.message.contains("store unavailable"));
    }
}
