// Configuration loading and validation (config/dashboard.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use t20stats_core::views::{ComparisonSelection, Tab};
use thiserror::Error;

/// Shipped defaults, written to `config/` when no config file exists yet.
pub const DEFAULT_DASHBOARD_TOML: &str = include_str!("../defaults/dashboard.toml");

const DASHBOARD_FILE: &str = "dashboard.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// dashboard.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub dashboard: DashboardSection,
    pub comparison: ComparisonSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSection {
    pub tabs: Vec<Tab>,
    #[serde(default)]
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ComparisonSection {
    pub focus: String,
    #[serde(default)]
    pub players: Vec<String>,
}

impl ComparisonSection {
    pub fn selection(&self) -> ComparisonSelection {
        ComparisonSelection::new(self.focus.clone(), self.players.clone())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSection {
    pub filter: String,
    pub dir: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "t20stats=info,warn".into(),
            dir: "logs".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/dashboard.toml` relative to `base_dir`.
///
/// `known_players` is the set of names the comparison section may refer to.
/// Does not create missing files; see [`ensure_config_files`].
pub fn load_config_from(base_dir: &Path, known_players: &[&str]) -> Result<Config, ConfigError> {
    let path = base_dir.join("config").join(DASHBOARD_FILE);
    let text = read_file(&path)?;
    let config: Config = toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        source: e,
    })?;

    validate(&config, known_players)?;

    Ok(config)
}

/// Write the shipped defaults into `config/` for any file that is missing.
/// Returns the files that were created.
pub fn ensure_config_files(base_dir: &Path) -> Result<Vec<PathBuf>, ConfigError> {
    let config_dir = base_dir.join("config");
    std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to create config directory: {e}"),
    })?;

    let mut created = Vec::new();
    let target = config_dir.join(DASHBOARD_FILE);

    match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(mut dest) => {
            std::io::Write::write_all(&mut dest, DEFAULT_DASHBOARD_TOML.as_bytes()).map_err(|e| {
                ConfigError::DefaultsCopyError {
                    message: format!("failed to write {}: {e}", target.display()),
                }
            })?;
            created.push(target);
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            // Keep the user's file
        }
        Err(e) => {
            return Err(ConfigError::DefaultsCopyError {
                message: format!("failed to create {}: {e}", target.display()),
            });
        }
    }

    Ok(created)
}

/// Convenience wrapper: loads config relative to the current working directory,
/// creating it from defaults first if needed.
pub fn load_config(known_players: &[&str]) -> Result<Config, ConfigError> {
    let cwd = std::env::current_dir().map_err(|_| ConfigError::FileNotFound {
        path: PathBuf::from("."),
    })?;
    ensure_config_files(&cwd)?;
    load_config_from(&cwd, known_players)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(config: &Config, known_players: &[&str]) -> Result<(), ConfigError> {
    let tabs = &config.dashboard.tabs;
    if tabs.is_empty() {
        return Err(ConfigError::ValidationError {
            field: "dashboard.tabs".into(),
            message: "must list at least one tab".into(),
        });
    }
    for (i, tab) in tabs.iter().enumerate() {
        if tabs[..i].contains(tab) {
            return Err(ConfigError::ValidationError {
                field: "dashboard.tabs".into(),
                message: format!("tab `{}` listed more than once", tab.key()),
            });
        }
    }

    let comparison = &config.comparison;
    if !known_players.contains(&comparison.focus.as_str()) {
        return Err(ConfigError::ValidationError {
            field: "comparison.focus".into(),
            message: format!("unknown player `{}`", comparison.focus),
        });
    }

    for (i, name) in comparison.players.iter().enumerate() {
        if !known_players.contains(&name.as_str()) {
            return Err(ConfigError::ValidationError {
                field: "comparison.players".into(),
                message: format!("unknown player `{name}`"),
            });
        }
        if *name == comparison.focus {
            return Err(ConfigError::ValidationError {
                field: "comparison.players".into(),
                message: format!("`{name}` is the focus player and is always included"),
            });
        }
        if comparison.players[..i].contains(name) {
            return Err(ConfigError::ValidationError {
                field: "comparison.players".into(),
                message: format!("`{name}` listed more than once"),
            });
        }
    }

    if config.logging.filter.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "logging.filter".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
