use std::sync::Arc;

use crate::catalog::{Catalog, InMemoryCatalog};
use crate::config::DEFAULT_DELIVERY_FEE_PERCENT;
use crate::store::MemoryStore;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn Catalog>,
    pub store: Arc<MemoryStore>,
    pub delivery_fee_percent: f64,
}

impl AppState {
    pub fn new(catalog: Arc<dyn Catalog>, delivery_fee_percent: f64) -> Self {
        Self {
            catalog,
            store: Arc::new(MemoryStore::new()),
            delivery_fee_percent,
        }
    }

    /// State backed by the sample catalog, used by `main` and tests.
    pub fn with_sample_catalog() -> Self {
        Self::new(
            Arc::new(InMemoryCatalog::with_sample_items()),
            DEFAULT_DELIVERY_FEE_PERCENT,
        )
    }
}
