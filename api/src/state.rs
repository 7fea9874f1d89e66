use prometheus::Registry;
use std::sync::Arc;

use crate::config::ServerConfig;
use crate::events::EventSink;

/// Application state shared across handlers. Nothing in it is mutated per
/// request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub events: Arc<dyn EventSink>,
    pub registry: Registry,
}

impl AppState {
    pub fn new(config: ServerConfig, events: Arc<dyn EventSink>, registry: Registry) -> Self {
        Self {
            config: Arc::new(config),
            events,
            registry,
        }
    }
}
