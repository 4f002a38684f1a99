//! Application state management

use std::sync::Arc;

use crate::inference::ArtifactContext;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState {
    pub context: Arc<ArtifactContext>,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(context: Arc<ArtifactContext>) -> Self {
        Self {
            context,
            started_at: chrono::Utc::now(),
        }
    }

    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}
