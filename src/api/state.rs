//! Application State
//!
//! Shared state handed to every handler. Cloning is cheap: the connection is a
//! pool handle and the config sits behind an `Arc`.

use crate::config::settings::AppConfig;
use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Loaded configuration
    pub config: Arc<AppConfig>,
    /// Service start time
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state around an open connection.
    #[must_use]
    pub fn new(db: DatabaseConnection, config: AppConfig) -> Self {
        Self {
            db,
            config: Arc::new(config),
            started_at: Utc::now(),
        }
    }

    /// Seconds since the state was created.
    #[must_use]
    pub fn uptime_secs(&self) -> u64 {
        u64::try_from((Utc::now() - self.started_at).num_seconds()).unwrap_or(0)
    }
}
