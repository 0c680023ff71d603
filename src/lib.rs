pub mod client;
pub mod config;
pub mod rest;
pub mod store;

use std::sync::Arc;

use config::DaemonConfig;
use store::TodoStore;

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<DaemonConfig>,
    pub store: Arc<TodoStore>,
    pub started_at: std::time::Instant,
}

impl AppContext {
    pub fn new(config: DaemonConfig) -> Self {
        let store = if config.seed {
            TodoStore::seeded()
        } else {
            TodoStore::new()
        };
        Self {
            config: Arc::new(config),
            store: Arc::new(store),
            started_at: std::time::Instant::now(),
        }
    }
}
