use crate::loader::CaseDataLoader;
use crate::population::PopulationTable;
use std::sync::Arc;

/// Shared, read-only request context. Every request loads and derives its
/// own data; nothing here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub loader: Arc<CaseDataLoader>,
    pub populations: PopulationTable,
}

impl AppState {
    pub fn new(loader: CaseDataLoader) -> Self {
        Self {
            loader: Arc::new(loader),
            populations: PopulationTable::berlin(),
        }
    }
}
