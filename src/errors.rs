//! # Error Handling Module
//!
//! ## Purpose
//! Centralized error handling for the podcast site engine, providing structured
//! error types and conversion utilities for all system components.
//!
//! ## Input/Output Specification
//! - **Input**: Error conditions from rendering, search, configuration, API
//! - **Output**: Structured error types with context
//! - **Error Categories**: Catalog, Render, Search, Forms, Configuration, API
//!
//! ## Key Features
//! - Hierarchical error types with detailed context
//! - Automatic conversion from common library errors
//! - Fail-soft classification: features that can degrade without taking down
//!   the rest of the page are marked as such
//! - Structured logging integration

use thiserror::Error;

/// Result type used throughout the application
pub type Result<T> = std::result::Result<T, SiteError>;

/// Error types for the podcast site engine
#[derive(Debug, Error)]
pub enum SiteError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation failed for field '{field}': {reason}")]
    ValidationFailed { field: String, reason: String },

    /// Catalog integrity errors (duplicate episode numbers, empty dataset)
    #[error("Catalog integrity error: {details}")]
    CatalogIntegrity { details: String },

    /// Rendering errors
    #[error("Failed to render '{section}': {details}")]
    RenderFailed { section: String, details: String },

    /// Search query rejected before filtering
    #[error("Invalid search query: {query} - {reason}")]
    InvalidSearchQuery { query: String, reason: String },

    /// A required page element or feature hook is absent. Initialization of
    /// the affected feature is aborted; everything else keeps working.
    #[error("Required element '{element}' not found")]
    MissingElement { element: String },

    /// Internal system errors
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Generic I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl SiteError {
    /// Get error category for metrics and logging
    pub fn category(&self) -> &'static str {
        match self {
            SiteError::Config { .. } | SiteError::Toml(_) => "configuration",
            SiteError::CatalogIntegrity { .. } => "catalog",
            SiteError::RenderFailed { .. } => "render",
            SiteError::InvalidSearchQuery { .. } => "search",
            SiteError::MissingElement { .. } => "page",
            SiteError::ValidationFailed { .. } => "validation",
            SiteError::Internal { .. } | SiteError::Io(_) | SiteError::Json(_) => "system",
        }
    }

    /// Whether the error only disables one feature rather than the whole
    /// page. Callers log these and continue with partial functionality.
    pub fn is_fail_soft(&self) -> bool {
        matches!(
            self,
            SiteError::MissingElement { .. } | SiteError::InvalidSearchQuery { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err = SiteError::CatalogIntegrity {
            details: "duplicate".to_string(),
        };
        assert_eq!(err.category(), "catalog");

        let err = SiteError::MissingElement {
            element: "episode-search-form".to_string(),
        };
        assert_eq!(err.category(), "page");
        assert!(err.is_fail_soft());
    }

    #[test]
    fn test_render_failure_is_not_fail_soft() {
        let err = SiteError::RenderFailed {
            section: "law-areas".to_string(),
            details: "empty catalog".to_string(),
        };
        assert!(!err.is_fail_soft());
    }
}
