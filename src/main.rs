//! # Lexcast Server Main Driver
//!
//! ## Purpose
//! Main entry point for the podcast site engine. Loads configuration,
//! builds and validates the catalog, renders the page once, and starts the
//! web server.
//!
//! ## Input/Output Specification
//! - **Input**: Configuration file, command line arguments, environment
//!   variables
//! - **Output**: Running web server serving the page and its API
//!
//! ## Architecture Flow
//! 1. Parse command line arguments and load configuration
//! 2. Initialize logging and tracing
//! 3. Build and validate the catalog, render the page
//! 4. Start the web API server
//! 5. Handle shutdown signals gracefully

use clap::{Arg, Command};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lexcast_engine::{
    api::ApiServer,
    config::{Config, SiteMode},
    errors::{Result, SiteError},
    AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("lexcast-server")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Lexcast Team")
        .about("Server-side engine for the Lexcast law podcast site")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .value_name("PORT")
                .help("Server port")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("mode")
                .long("mode")
                .value_name("MODE")
                .help("Page shape: flat_cards or grouped"),
        )
        .arg(
            Arg::new("check-catalog")
                .long("check-catalog")
                .help("Validate the catalog and exit")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    // Load configuration
    let config_path = matches
        .get_one::<String>("config")
        .ok_or_else(|| SiteError::Config {
            message: "Missing config argument".to_string(),
        })?;
    let mut config = Config::from_file(config_path)?;

    // Apply command line overrides
    if let Some(port) = matches.get_one::<u16>("port") {
        config.server.port = *port;
    }
    if let Some(mode) = matches.get_one::<String>("mode") {
        config.render.mode = match mode.as_str() {
            "flat_cards" => SiteMode::FlatCards,
            "grouped" => SiteMode::Grouped,
            other => {
                return Err(SiteError::Config {
                    message: format!("Invalid site mode: {}", other),
                })
            }
        };
        if config.render.mode == SiteMode::FlatCards {
            config.render.prototype = false;
        }
        config.validate()?;
    }

    // Initialize logging
    init_logging(&config)?;

    info!("Starting Lexcast engine v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration loaded from: {}", config_path);

    if matches.get_flag("check-catalog") {
        return run_catalog_check(&config);
    }

    // Build catalog, render the page, wire up the state
    let app_state = AppState::from_config(config)?;
    info!(
        "Catalog ready: {} episodes, {} speakers, {} accordion sections",
        app_state.page.index.len(),
        app_state.catalog.speaker_count(),
        app_state.page.section_ids.len()
    );

    // Start the API server
    let server = ApiServer::new(app_state.clone());
    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Server error: {}", e);
        }
    });

    info!(
        "Lexcast engine started on {}:{}",
        app_state.config.server.host, app_state.config.server.port
    );

    // Wait for shutdown signal
    tokio::select! {
        _ = signal::ctrl_c() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = server_handle => {
            warn!("Server stopped unexpectedly");
        }
    }

    info!("Lexcast engine shut down successfully");
    Ok(())
}

/// Initialize logging and tracing
fn init_logging(config: &Config) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.logging.level.clone()));

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.json_format {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true).json())
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .init();
    }

    info!("Logging initialized with level: {}", config.logging.level);
    Ok(())
}

/// Validate the catalog and report its shape, then exit
fn run_catalog_check(config: &Config) -> Result<()> {
    info!("Running catalog checks...");

    let catalog = lexcast_engine::catalog::builtin(config.render.prototype);
    catalog.validate()?;
    info!("✓ Catalog is valid");

    let page = lexcast_engine::HtmlRenderer::new(&config.render).render_page(&catalog)?;
    info!(
        "✓ Rendered {} episodes into {} sections",
        page.index.len(),
        page.section_ids.len()
    );

    info!("All catalog checks passed!");
    Ok(())
}
