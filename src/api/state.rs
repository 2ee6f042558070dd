use std::sync::Arc;

use crate::services::CatalogIndex;

/// Shared application state
///
/// The index is never mutated after startup, so handlers read it without locking.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<CatalogIndex>,
}

impl AppState {
    pub fn new(index: CatalogIndex) -> Self {
        Self {
            index: Arc::new(index),
        }
    }
}
