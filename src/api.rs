//! HTTP API for the game
//!
//! JSON endpoints for the session actions plus the embedded page.

mod assets;
mod handlers;
mod types;

pub use handlers::create_router;

use crate::config::Variant;
use crate::llm::ModelRegistry;
use crate::runtime::SessionManager;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub manager: Arc<SessionManager>,
    pub variant: Variant,
    pub llm_registry: Arc<ModelRegistry>,
}

impl AppState {
    pub fn new(
        manager: SessionManager,
        variant: Variant,
        llm_registry: Arc<ModelRegistry>,
    ) -> Self {
        Self {
            manager: Arc::new(manager),
            variant,
            llm_registry,
        }
    }
}
