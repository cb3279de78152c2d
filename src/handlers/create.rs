use crate::error::{ApiError, ErrorResponse};
use crate::models::{Item, ItemPayload};
use crate::routes;
use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, StatusCode},
    Json,
};

/// POST /item handler - Store a new item
///
/// The caller chooses the id. Saving under an id that is already taken
/// overwrites the existing item.
#[utoipa::path(
    post,
    path = routes::ITEMS,
    request_body(content = ItemPayload, content_type = "application/json"),
    responses(
        (status = 201, description = "Item created", body = Item,
            headers(("Location" = String, description = "Relative path of the new item"))),
        (status = 400, description = "Malformed JSON or invalid item fields", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "item"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<Item>), ApiError> {
    let payload: ItemPayload = serde_json::from_slice(&body)?;
    let item = payload.into_item()?;

    let created = state.items.create(item).await?;

    tracing::info!("Successfully created item with id: {}", created.id);
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, routes::item_location(created.id))],
        Json(created),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{hammer, memory_state, send};
    use axum::{routing::post, Router};

    fn app(state: AppState) -> Router {
        Router::new()
            .route(routes::ITEMS, post(create_handler))
            .with_state(state)
    }

    #[tokio::test]
    async fn test_create_endpoint_success() {
        let state = memory_state();
        let body = serde_json::to_string(&hammer()).unwrap();

        let response = send(app(state.clone()), "POST", "/item", Some(body)).await;

        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.headers["location"], "item/1234");
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.json::<Item>(), hammer());
        assert_eq!(state.items.find_by_id(1234).await.unwrap(), Some(hammer()));
    }

    #[tokio::test]
    async fn test_create_endpoint_echoes_body() {
        let body = r#"{"id":1234,"name":"hammer","quantity":12,"value":12.45}"#;

        let response = send(app(memory_state()), "POST", "/item", Some(body.to_string())).await;

        assert_eq!(response.status, StatusCode::CREATED);
        let echoed: serde_json::Value = response.json();
        let sent: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(echoed, sent);
    }

    #[tokio::test]
    async fn test_create_endpoint_empty_item() {
        let state = memory_state();
        let body = serde_json::to_string(&ItemPayload::default()).unwrap();

        let response = send(app(state.clone()), "POST", "/item", Some(body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.content_type(), Some("application/json"));
        assert_eq!(response.json::<ErrorResponse>().message, "invalid input");
        assert!(state.items.get_all_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_endpoint_partial_item() {
        let body = r#"{"id":1,"name":"saw"}"#.to_string();

        let response = send(app(memory_state()), "POST", "/item", Some(body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().message, "invalid input");
    }

    #[tokio::test]
    async fn test_create_endpoint_constraint_violation() {
        let body = r#"{"id":1,"name":"saw","quantity":-3,"value":4.5}"#.to_string();

        let response = send(app(memory_state()), "POST", "/item", Some(body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().message, "invalid input");
    }

    #[tokio::test]
    async fn test_create_endpoint_invalid_json() {
        let response = send(
            app(memory_state()),
            "POST",
            "/item",
            Some("{invalid json}".to_string()),
        )
        .await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().message, "invalid input");
    }

    #[tokio::test]
    async fn test_create_endpoint_wrong_field_type() {
        let body = r#"{"id":"abc","name":"saw","quantity":1,"value":4.5}"#.to_string();

        let response = send(app(memory_state()), "POST", "/item", Some(body)).await;

        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<ErrorResponse>().message, "invalid input");
    }
}
