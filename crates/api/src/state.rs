use std::sync::Arc;

use assetboard_core::gateway::DataSource;

use crate::chat::ChatClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Backing store: PostgreSQL, in-memory, or the unconfigured stand-in.
    pub data: Arc<dyn DataSource>,
    /// Whether `data` is a real store. Reported by `/health`.
    pub configured: bool,
    pub config: Arc<ServerConfig>,
    /// `None` when no chat API key is configured.
    pub chat: Option<Arc<ChatClient>>,
}
