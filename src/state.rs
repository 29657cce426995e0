//! Shared application state: the injected store and the loaded config.

use crate::config::Config;
use crate::store::AnnouncementStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn AnnouncementStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(store: Arc<dyn AnnouncementStore>, config: Config) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
