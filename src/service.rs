use anyhow::Result;
use std::sync::Arc;

use crate::models::{Item, ItemChanges};
use crate::repository::ItemRepository;

/// Item operations on top of the repository
///
/// Update and delete look the record up first; absence is reported as
/// `None`/`false` and left to the caller to turn into a not-found response.
#[derive(Clone)]
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
}

impl ItemService {
    pub fn new(repository: Arc<dyn ItemRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_items(&self) -> Result<Vec<Item>> {
        self.repository.find_all().await
    }

    /// Stores the item as given. An item already saved under the same id is
    /// overwritten.
    pub async fn create(&self, item: Item) -> Result<Item> {
        self.repository.save(item).await
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Item>> {
        self.repository.find_by_id(id).await
    }

    pub async fn update(&self, id: i32, changes: ItemChanges) -> Result<Option<Item>> {
        let Some(mut item) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        item.apply(changes);
        let saved = self.repository.save(item).await?;
        Ok(Some(saved))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        match self.repository.find_by_id(id).await? {
            Some(item) => {
                self.repository.delete(&item).await?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        self.repository.health_check().await
    }
}
