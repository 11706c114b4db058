//! # Configuration Management Module
//!
//! ## Purpose
//! Centralized configuration for the podcast site engine, loaded from TOML
//! files with environment variable overrides, validation and defaults.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration files (TOML), environment variables
//! - **Output**: Validated configuration structs with defaults and overrides
//! - **Validation**: Type checking, range validation, mode consistency
//!
//! ## Configuration Sources (in order of precedence)
//! 1. Environment variables (`LEXCAST_*`)
//! 2. Configuration file
//! 3. Default values
//!
//! The page shape and the prototype flag are resolved here exactly once and
//! passed down to the renderer and filter engine; no feature re-probes them.

use crate::errors::{Result, SiteError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which page shape the engine serves. The two shapes are mutually
/// exclusive and decided at startup, never re-detected per feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SiteMode {
    /// Single grid of independent episode cards; filtering toggles card
    /// visibility in place.
    FlatCards,
    /// Episodes nested inside collapsible area/subdivision containers;
    /// filtering synthesizes a consolidated results block.
    Grouped,
}

/// Main configuration structure containing all system settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server and API configuration
    pub server: ServerConfig,
    /// Search and fuzzy matching behavior
    pub search: SearchConfig,
    /// Rendering behavior
    pub render: RenderConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server and API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address
    pub host: String,
    /// Server port
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

/// Search and fuzzy matching configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Queries up to this many characters are "short" and must match words
    /// within `short_query_threshold` edits; longer queries get
    /// `long_query_threshold`.
    pub short_query_max_len: usize,
    /// Per-word edit distance threshold for short queries
    pub short_query_threshold: usize,
    /// Per-word edit distance threshold for long queries
    pub long_query_threshold: usize,
    /// Whole-text edit distance threshold, applied only to long queries
    pub whole_text_threshold: usize,
    /// Debounce delay between keystrokes and a filter pass, in milliseconds
    pub debounce_ms: u64,
    /// Maximum accepted query length in characters
    pub max_query_length: usize,
}

/// Rendering configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Page shape served by this instance
    pub mode: SiteMode,
    /// Prototype flag: render nested topic sections with speakers instead of
    /// flat episode lists under each subdivision
    pub prototype: bool,
    /// Video identifier used when an episode carries none
    pub fallback_video_id: String,
    /// Toast auto-dismiss delay in milliseconds
    pub toast_dismiss_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Enable structured JSON logging
    pub json_format: bool,
}

impl Config {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::from_file("config.toml")
    }

    /// Load configuration from a specific file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::warn!("Configuration file not found: {:?}, using defaults", path);
            let mut config = Self::default();
            config.apply_env_overrides()?;
            config.validate()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(path).map_err(|e| SiteError::Config {
            message: format!("Failed to read config file {:?}: {}", path, e),
        })?;

        let mut config: Config = toml::from_str(&content).map_err(|e| SiteError::Config {
            message: format!("Failed to parse config file {:?}: {}", path, e),
        })?;

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("LEXCAST_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("LEXCAST_PORT") {
            self.server.port = port.parse().map_err(|_| SiteError::Config {
                message: "Invalid port number in LEXCAST_PORT".to_string(),
            })?;
        }
        if let Ok(mode) = std::env::var("LEXCAST_MODE") {
            self.render.mode = match mode.as_str() {
                "flat_cards" => SiteMode::FlatCards,
                "grouped" => SiteMode::Grouped,
                other => {
                    return Err(SiteError::Config {
                        message: format!("Invalid site mode in LEXCAST_MODE: {}", other),
                    })
                }
            };
        }
        if let Ok(level) = std::env::var("LEXCAST_LOG_LEVEL") {
            self.logging.level = level;
        }
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(SiteError::ValidationFailed {
                field: "server.port".to_string(),
                reason: "Port cannot be zero".to_string(),
            });
        }

        if self.search.short_query_threshold > self.search.long_query_threshold {
            return Err(SiteError::ValidationFailed {
                field: "search.short_query_threshold".to_string(),
                reason: "Short-query threshold cannot exceed long-query threshold".to_string(),
            });
        }

        if self.search.short_query_max_len == 0 {
            return Err(SiteError::ValidationFailed {
                field: "search.short_query_max_len".to_string(),
                reason: "Short-query cutoff must be greater than zero".to_string(),
            });
        }

        if self.search.max_query_length == 0 {
            return Err(SiteError::ValidationFailed {
                field: "search.max_query_length".to_string(),
                reason: "Maximum query length must be greater than zero".to_string(),
            });
        }

        if self.render.fallback_video_id.trim().is_empty() {
            return Err(SiteError::ValidationFailed {
                field: "render.fallback_video_id".to_string(),
                reason: "Fallback video identifier cannot be empty".to_string(),
            });
        }

        // Nested topics only exist on the grouped page shape
        if self.render.prototype && self.render.mode == SiteMode::FlatCards {
            return Err(SiteError::ValidationFailed {
                field: "render.prototype".to_string(),
                reason: "Prototype (nested topics) rendering requires grouped mode".to_string(),
            });
        }

        Ok(())
    }

    /// Get configuration as TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SiteError::Config {
            message: format!("Failed to serialize config to TOML: {}", e),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                enable_cors: true,
                request_timeout_seconds: 30,
            },
            search: SearchConfig {
                short_query_max_len: 6,
                short_query_threshold: 1,
                long_query_threshold: 2,
                whole_text_threshold: 3,
                debounce_ms: 200,
                max_query_length: 200,
            },
            render: RenderConfig {
                mode: SiteMode::Grouped,
                prototype: true,
                fallback_video_id: "mCFMn0UkRt0".to_string(),
                toast_dismiss_ms: 5000,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                json_format: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.search.debounce_ms, 200);
        assert_eq!(config.render.fallback_video_id, "mCFMn0UkRt0");
    }

    #[test]
    fn test_zero_port_rejected() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_prototype_requires_grouped_mode() {
        let mut config = Config::default();
        config.render.mode = SiteMode::FlatCards;
        config.render.prototype = true;
        assert!(config.validate().is_err());

        config.render.prototype = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_round_trip_through_file() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(toml.as_bytes()).unwrap();

        let loaded = Config::from_file(file.path()).unwrap();
        assert_eq!(loaded.server.port, config.server.port);
        assert_eq!(loaded.render.mode, SiteMode::Grouped);
        assert!(loaded.render.prototype);
    }
}
