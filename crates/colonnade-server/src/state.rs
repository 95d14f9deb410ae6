use std::sync::Arc;

use colonnade_storage::conversations::ConversationStore;
use colonnade_storage::engine::WideColumnStore;
use colonnade_storage::metrics::MetricStore;

/// Shared application state, injected into all route handlers via Axum state.
#[derive(Clone)]
pub struct AppState {
    pub chat: ConversationStore,
    pub sensors: MetricStore,
}

impl AppState {
    pub fn new(store: Arc<dyn WideColumnStore>, page_size: usize) -> Self {
        Self {
            chat: ConversationStore::new(Arc::clone(&store), page_size),
            sensors: MetricStore::new(store, page_size),
        }
    }
}
