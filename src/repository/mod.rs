//! Persistence for items, keyed by their integer id.

pub mod memory;
pub mod spanner;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::StoreConfig;
use crate::models::Item;

pub use memory::InMemoryItemRepository;
pub use spanner::SpannerItemRepository;

/// Document store holding one record per item id
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// All stored items, ordered by ascending id
    async fn find_all(&self) -> Result<Vec<Item>>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>>;

    /// Insert the item, or overwrite the record already stored under its id
    async fn save(&self, item: Item) -> Result<Item>;

    async fn delete(&self, item: &Item) -> Result<()>;

    /// Verify the store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Open the repository selected by the store configuration
pub async fn connect(store: &StoreConfig) -> Result<Arc<dyn ItemRepository>> {
    match store {
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory item store; data is lost on restart");
            Ok(Arc::new(InMemoryItemRepository::new()))
        }
        StoreConfig::Spanner(config) => {
            Ok(Arc::new(SpannerItemRepository::from_config(config).await?))
        }
    }
}
