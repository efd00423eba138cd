use std::sync::Arc;

use countdown_db::SettingsStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Per-shop settings persistence.
    pub store: Arc<dyn SettingsStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
