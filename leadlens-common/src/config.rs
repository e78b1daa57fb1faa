//! Configuration loading and config file resolution
//!
//! The config file location follows a priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (handled by the CLI layer)
//! 3. User config directory (~/.config/leadlens/config.toml)
//! 4. System config (/etc/leadlens/config.toml)
//! A missing file is not an error: compiled-in defaults carry the known
//! alias and route tables, so the service starts with no config at all.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::scope::{RouteScope, DEFAULT_MIN_TOKEN_MATCHES};
use crate::{Error, Result};

/// One configured data source: provenance label plus SQLite file path.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    pub label: String,
    pub path: PathBuf,
}

/// Service configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Mandatory primary source; its failure fails a request.
    pub primary: SourceConfig,
    /// Optional secondary sources; best-effort merged.
    pub secondaries: Vec<SourceConfig>,
    /// Alias spelling → canonical seller name.
    pub aliases: HashMap<String, String>,
    /// Named per-route visibility scopes.
    pub routes: Vec<RouteScope>,
    /// Fuzzy name-match threshold for the visibility filter.
    pub min_token_matches: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5740,
            primary: SourceConfig {
                label: "principal".to_string(),
                path: PathBuf::from("leadlens.db"),
            },
            secondaries: Vec::new(),
            aliases: default_aliases(),
            routes: default_routes(),
            min_token_matches: DEFAULT_MIN_TOKEN_MATCHES,
        }
    }
}

/// Known alias spellings observed in upstream seller data.
fn default_aliases() -> HashMap<String, String> {
    HashMap::from([
        ("María Isabel Calle".to_string(), "María Calle".to_string()),
        ("Maria Calle".to_string(), "María Calle".to_string()),
        ("José Luis Herrera".to_string(), "José Herrera".to_string()),
        ("Jose Herrera".to_string(), "José Herrera".to_string()),
        (
            "Carolina Pérez Gómez".to_string(),
            "Carolina Pérez".to_string(),
        ),
    ])
}

/// Fixed route → allow-list table.
fn default_routes() -> Vec<RouteScope> {
    vec![
        RouteScope {
            name: "norte".to_string(),
            allowed_sellers: vec!["María Calle".to_string(), "José Herrera".to_string()],
        },
        RouteScope {
            name: "sur".to_string(),
            allowed_sellers: vec!["Carolina Pérez".to_string(), "Andrés Rueda".to_string()],
        },
    ]
}

impl AppConfig {
    /// Load configuration, resolving the file location when none is
    /// given explicitly. Falls back to compiled-in defaults when no
    /// file exists anywhere in the priority order.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => resolve_config_path(),
        };

        match path {
            Some(p) if p.exists() => Self::from_file(&p),
            Some(p) if explicit_path.is_some() => Err(Error::Config(format!(
                "config file not found: {}",
                p.display()
            ))),
            _ => Ok(Self::default()),
        }
    }

    fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }
}

/// Locate a config file in the user config directory, then the system
/// directory.
fn resolve_config_path() -> Option<PathBuf> {
    if let Some(user_config) = dirs::config_dir().map(|d| d.join("leadlens").join("config.toml")) {
        if user_config.exists() {
            return Some(user_config);
        }
    }

    let system_config = PathBuf::from("/etc/leadlens/config.toml");
    if system_config.exists() {
        return Some(system_config);
    }

    None
}
