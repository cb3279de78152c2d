use anyhow::{anyhow, Result};
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use std::sync::Arc;
use tower::ServiceExt;

use crate::config::{Config, StoreConfig};
use crate::models::Item;
use crate::repository::{InMemoryItemRepository, ItemRepository};
use crate::state::AppState;

/// State over an empty in-memory store
pub fn memory_state() -> AppState {
    memory_state_with(Arc::new(InMemoryItemRepository::new()))
}

pub fn memory_state_with(repository: Arc<dyn ItemRepository>) -> AppState {
    let config = Config {
        store: StoreConfig::Memory,
        service_port: 3000,
        service_host: "0.0.0.0".to_string(),
    };
    AppState::new(repository, config)
}

/// State whose store already holds the given items
pub async fn seeded_state(items: &[Item]) -> AppState {
    let repository = Arc::new(InMemoryItemRepository::new());
    for item in items {
        repository.save(item.clone()).await.unwrap();
    }
    memory_state_with(repository)
}

/// Repository whose every call fails as if the store were down
pub struct UnavailableRepository;

#[async_trait]
impl ItemRepository for UnavailableRepository {
    async fn find_all(&self) -> Result<Vec<Item>> {
        Err(anyhow!("store unavailable"))
    }

    async fn find_by_id(&self, _id: i32) -> Result<Option<Item>> {
        Err(anyhow!("store unavailable"))
    }

    async fn save(&self, _item: Item) -> Result<Item> {
        Err(anyhow!("store unavailable"))
    }

    async fn delete(&self, _item: &Item) -> Result<()> {
        Err(anyhow!("store unavailable"))
    }

    async fn health_check(&self) -> Result<()> {
        Err(anyhow!("store unavailable"))
    }
}

pub fn unavailable_state() -> AppState {
    memory_state_with(Arc::new(UnavailableRepository))
}

pub fn hammer() -> Item {
    Item {
        id: 1234,
        name: "hammer".to_string(),
        quantity: 12,
        value: 12.45,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get("content-type")
            .and_then(|value| value.to_str().ok())
    }
}

/// Drive one request through the router
pub async fn send(app: Router, method: &str, uri: &str, body: Option<String>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    TestResponse {
        status,
        headers,
        body,
    }
}
