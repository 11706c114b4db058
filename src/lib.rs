//! # Lexcast Site Engine
//!
//! ## Overview
//! This library implements the server-side engine for a Portuguese law
//! education podcast site: it renders the content taxonomy to HTML, filters
//! episodes with fuzzy free-text search, and owns the page's transient
//! interactive state (accordions, modals, toasts, forms).
//!
//! ## Architecture
//! The system is composed of several key modules:
//! - `taxonomy`: Static content data model (areas, subdivisions, topics,
//!   episodes, speakers)
//! - `catalog`: The built-in content catalog, in both page shapes
//! - `render`: HTML rendering and the renderer-built search index
//! - `matcher`: Edit-distance fuzzy text matching
//! - `search`: Filter engine producing the per-query page outcome
//! - `state`: Accordion, modal, toast and query state controllers
//! - `forms`: Contact and newsletter validation
//! - `debounce`: Trailing-edge input debouncing
//! - `api`: HTTP endpoints
//! - `config`: Configuration management and settings
//! - `errors`: Centralized error handling and types
//!
//! ## Input/Output Specification
//! - **Input**: The built-in catalog, search queries, form submissions
//! - **Output**: Rendered HTML, filter outcomes, state transitions
//! - **Behavior**: Deterministic; repeating a query reproduces its outcome
//!
//! ## Usage
//! ```rust,no_run
//! use lexcast_engine::{AppState, Config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config.toml")?;
//!     let state = AppState::from_config(config)?;
//!     println!("{} episodes indexed", state.page.index.len());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod api;
pub mod catalog;
pub mod config;
pub mod debounce;
pub mod errors;
pub mod forms;
pub mod matcher;
pub mod render;
pub mod search;
pub mod state;
pub mod taxonomy;

// Re-exports for convenience
pub use config::{Config, SiteMode};
pub use errors::{Result, SiteError};
pub use matcher::FuzzyMatcher;
pub use render::{HtmlRenderer, RenderedPage, SearchIndex};
pub use search::{FilterEngine, FilterOutcome};
pub use state::PageController;
pub use taxonomy::Catalog;

use parking_lot::RwLock;
use std::sync::Arc;

/// Application state shared across components. The catalog, rendered page
/// and filter engine are immutable after startup; only the page controller
/// is behind a lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub page: Arc<RenderedPage>,
    pub filter: Arc<FilterEngine>,
    pub controller: Arc<RwLock<PageController>>,
}

impl AppState {
    /// Build the full application state: validate the catalog, render the
    /// page once, and wire up the filter engine and controllers.
    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = catalog::builtin(config.render.prototype);
        catalog.validate()?;

        let page = HtmlRenderer::new(&config.render).render_page(&catalog)?;
        let filter = FilterEngine::new(&config);
        let controller = PageController::new(config.render.toast_dismiss_ms);

        Ok(Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
            page: Arc::new(page),
            filter: Arc::new(filter),
            controller: Arc::new(RwLock::new(controller)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_builds_from_defaults() {
        let state = AppState::from_config(Config::default()).unwrap();
        assert_eq!(state.page.index.len(), state.catalog.episode_count());
        assert!(!state.controller.read().modal.is_open());
    }
}
