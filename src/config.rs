//! Application configuration.
//!
//! Values are layered the same way throughout: config.toml > environment
//! (via .env) > built-in default.

use serde::Deserialize;
use std::path::PathBuf;

use crate::chat::gateway::GatewayConfig;
use crate::revision::RevisionSchedule;

/// Configuration file structure for config.toml
#[derive(Debug, Deserialize)]
struct AppConfig {
    database: Option<DatabaseConfig>,
    revision: Option<RevisionConfig>,
    gateway: Option<GatewaySection>,
}

#[derive(Debug, Deserialize)]
struct DatabaseConfig {
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RevisionConfig {
    intervals: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
struct GatewaySection {
    url: Option<String>,
    model: Option<String>,
}

fn read_config_file() -> Option<AppConfig> {
    let contents = std::fs::read_to_string("config.toml").ok()?;
    match toml::from_str::<AppConfig>(&contents) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed config.toml: {}", e);
            None
        }
    }
}

// ==================== Database Configuration ====================

/// Load database path with priority: config.toml > .env > default
pub fn load_database_path() -> PathBuf {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Priority 1: config.toml
    if let Some(config) = read_config_file() {
        if let Some(path) = config.database.and_then(|db| db.path) {
            tracing::info!("Using database from config.toml: {}", path);
            return PathBuf::from(path);
        }
    }

    // Priority 2: .env DATABASE_PATH
    if let Ok(path) = std::env::var("DATABASE_PATH") {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        return PathBuf::from(path);
    }

    // Default
    let default = PathBuf::from("data/revisio.db");
    tracing::info!("Using default database path: {}", default.display());
    default
}

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Server port
pub const SERVER_PORT: u16 = 3000;

/// Get the full server bind address
pub fn server_bind_addr() -> String {
    format!("{}:{}", SERVER_ADDR, SERVER_PORT)
}

// ==================== Revision Schedule ====================

/// Load the revision interval schedule, config.toml [revision] intervals
/// taking priority over the built-in default. An empty or missing override
/// falls back to the default rather than failing startup.
pub fn load_revision_schedule() -> RevisionSchedule {
    if let Some(config) = read_config_file() {
        if let Some(intervals) = config.revision.and_then(|r| r.intervals) {
            match RevisionSchedule::new(intervals) {
                Some(schedule) => {
                    tracing::info!(
                        "Using revision intervals from config.toml: {:?}",
                        schedule.intervals()
                    );
                    return schedule;
                }
                None => {
                    tracing::warn!("Empty [revision] intervals in config.toml, using default");
                }
            }
        }
    }
    RevisionSchedule::default()
}

// ==================== LLM Gateway ====================

/// Load LLM gateway settings: config.toml > env > default. The API key is
/// env-only (LLM_GATEWAY_API_KEY) so it stays out of checked-in files.
pub fn load_gateway_config() -> GatewayConfig {
    let section = read_config_file().and_then(|c| c.gateway);

    let url = section
        .as_ref()
        .and_then(|g| g.url.clone())
        .or_else(|| std::env::var("LLM_GATEWAY_URL").ok())
        .unwrap_or_else(|| GatewayConfig::DEFAULT_URL.to_string());

    let model = section
        .as_ref()
        .and_then(|g| g.model.clone())
        .or_else(|| std::env::var("LLM_GATEWAY_MODEL").ok())
        .unwrap_or_else(|| GatewayConfig::DEFAULT_MODEL.to_string());

    let api_key = std::env::var("LLM_GATEWAY_API_KEY").ok();

    GatewayConfig {
        url,
        model,
        api_key,
    }
}

// ==================== Form Limits ====================

/// Maximum length for department, course, and topic names
pub const MAX_NAME_LEN: usize = 120;
