use crate::config::Config;
use crate::repository::ItemRepository;
use crate::service::ItemService;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub items: ItemService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repository: Arc<dyn ItemRepository>, config: Config) -> Self {
        Self {
            items: ItemService::new(repository),
            config: Arc::new(config),
        }
    }
}
