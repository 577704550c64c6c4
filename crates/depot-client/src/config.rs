//! # Console Configuration
//!
//! Where the catalog API lives, where the session token is kept, and how
//! the console behaves after a form submit.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     DEPOT_API_URL=https://catalog.example.com                          │
//! │     DEPOT_TOKEN_FILE=/run/depot/token                                  │
//! │     DEPOT_REDIRECT_DELAY_MS=0                                          │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/depot-console/depot.toml (Linux)                         │
//! │     ~/Library/Application Support/com.depot.console/depot.toml (macOS) │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://localhost:4000, 1000 ms redirect delay                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The configuration is read once at startup; nothing reloads it.
//!
//! ## Configuration File Format
//! ```toml
//! # depot.toml
//! [api]
//! base_url = "http://localhost:4000"
//!
//! [session]
//! token_file = "/home/ops/.local/share/depot-console/auth_token"
//! token_env = "DEPOT_SESSION_TOKEN"
//!
//! [console]
//! redirect_delay_ms = 1000
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::{ClientError, ClientResult};

/// Env var consulted for a session-scoped token when none is persisted.
pub const DEFAULT_SESSION_TOKEN_ENV: &str = "DEPOT_SESSION_TOKEN";

// =============================================================================
// Sections
// =============================================================================

/// `[api]`: the catalog server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Server origin; the `/api/...` paths are appended to it.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    "http://localhost:4000".to_string()
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// `[session]`: where the bearer token lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Persistent token file. `None` means the platform data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_file: Option<PathBuf>,

    /// Environment variable holding a session-only token.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

fn default_token_env() -> String {
    DEFAULT_SESSION_TOKEN_ENV.to_string()
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            token_file: None,
            token_env: default_token_env(),
        }
    }
}

/// `[console]`: presentation behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleSettings {
    /// Pause between a successful submit and returning to the list.
    #[serde(default = "default_redirect_delay_ms")]
    pub redirect_delay_ms: u64,
}

fn default_redirect_delay_ms() -> u64 {
    depot_core::DEFAULT_REDIRECT_DELAY_MS
}

impl Default for ConsoleSettings {
    fn default() -> Self {
        Self {
            redirect_delay_ms: default_redirect_delay_ms(),
        }
    }
}

// =============================================================================
// Depot Config
// =============================================================================

/// Complete console configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepotConfig {
    #[serde(default)]
    pub api: ApiSettings,

    #[serde(default)]
    pub session: SessionSettings,

    #[serde(default)]
    pub console: ConsoleSettings,
}

impl DepotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration: defaults, then the file (if present), then env
    /// vars, then `api_url` from the command line. Validation runs last, so
    /// an explicit `api_url` replaces a bad URL from the file or environment.
    pub fn load(config_path: Option<PathBuf>, api_url: Option<&str>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(format!("{}: {}", path.display(), e)))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        if let Some(url) = api_url {
            debug!(url = %url, "Overriding API URL from command line");
            config.api.base_url = url.to_string();
        }
        config.validate()?;

        Ok(config)
    }

    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Console config saved");
        Ok(())
    }

    pub fn validate(&self) -> ClientResult<()> {
        let url = Url::parse(&self.api.base_url)?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ClientError::InvalidUrl(format!(
                "API URL must start with http:// or https://, got: {}",
                self.api.base_url
            )));
        }

        if self.session.token_env.trim().is_empty() {
            return Err(ClientError::InvalidConfig(
                "session.token_env must not be empty".into(),
            ));
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `DEPOT_*` overrides read through `lookup`.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("DEPOT_API_URL") {
            debug!(url = %url, "Overriding API URL from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup("DEPOT_TOKEN_FILE") {
            debug!(path = %path, "Overriding token file from environment");
            self.session.token_file = Some(PathBuf::from(path));
        }

        if let Some(delay) = lookup("DEPOT_REDIRECT_DELAY_MS") {
            match delay.parse::<u64>() {
                Ok(ms) => self.console.redirect_delay_ms = ms,
                Err(_) => warn!(value = %delay, "Ignoring non-numeric DEPOT_REDIRECT_DELAY_MS"),
            }
        }
    }

    fn project_dirs() -> Option<directories::ProjectDirs> {
        directories::ProjectDirs::from("com", "depot", "console")
    }

    fn default_config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("depot.toml"))
    }

    /// The persistent token file, resolved against the platform data dir.
    pub fn token_path(&self) -> Option<PathBuf> {
        self.session
            .token_file
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("auth_token")))
    }

    pub fn base_url(&self) -> &str {
        &self.api.base_url
    }

    pub fn redirect_delay_ms(&self) -> u64 {
        self.console.redirect_delay_ms
    }
}
