//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the single editor core for this server's fair. The initial loads
//! write into the core as they resolve, handlers read and click through it.

use std::sync::Arc;

use mapcore::engine::EditorCore;
use mapcore::projection::WebMercator;
use mapcore::viewport::Viewport;
use tokio::sync::RwLock;

use crate::config::Config;

/// Shared application state. Clone is required by Axum; the core is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub core: Arc<RwLock<EditorCore>>,
}

impl AppState {
    #[must_use]
    pub fn new(core: EditorCore) -> Self {
        Self { core: Arc::new(RwLock::new(core)) }
    }

    /// Fresh, not-yet-loaded editor sized per config.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let viewport = Viewport::new(config.viewport_width, config.viewport_height, WebMercator::new(config.tile_size));
        Self::new(EditorCore::new(viewport))
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
