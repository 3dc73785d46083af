//! Business logic services

pub mod reports;
pub mod seed;

use std::sync::Arc;

use crate::repository::LibraryStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services over the given store
    pub fn new(store: Arc<dyn LibraryStore>) -> Self {
        Self {
            reports: reports::ReportsService::new(store),
        }
    }
}
