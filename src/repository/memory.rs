use anyhow::Result;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use super::ItemRepository;
use crate::models::Item;

/// Item store kept in process memory
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: RwLock<BTreeMap<i32, Item>>,
}

impl InMemoryItemRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn save(&self, item: Item) -> Result<Item> {
        self.items.write().await.insert(item.id, item.clone());
        tracing::debug!("Saved item with id: {}", item.id);
        Ok(item)
    }

    async fn delete(&self, item: &Item) -> Result<()> {
        self.items.write().await.remove(&item.id);
        tracing::debug!("Deleted item with id: {}", item.id);
        Ok(())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}
