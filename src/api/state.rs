//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use crate::dashboard::Dashboard;
use crate::dataset::Dataset;
use std::sync::Arc;
use std::time::Instant;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Interaction controller over the loaded dataset
    pub dashboard: Arc<Dashboard>,
    /// Where the dataset was loaded from, for health output
    pub source: String,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState
    pub fn new(dashboard: Dashboard, source: impl Into<String>) -> Self {
        Self {
            dashboard: Arc::new(dashboard),
            source: source.into(),
            start_time: Instant::now(),
        }
    }

    /// The read-only dataset
    pub fn dataset(&self) -> &Dataset {
        self.dashboard.dataset()
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
