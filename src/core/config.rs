//! Configuration management for the prompthub service.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.
//! Command-line flags are layered on top by the CLI adapter.

use crate::core::error::{PromptHubError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "prompthub.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub resources: ResourcesConfig,
    #[serde(default)]
    pub stream: StreamConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Access token configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// Accepted access tokens
    #[serde(default)]
    pub tokens: Vec<String>,
}

/// Resource catalog configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResourcesConfig {
    /// Directory scanned for markdown documents
    #[serde(default = "default_resources_root")]
    pub root: PathBuf,

    /// File extensions treated as markdown
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

/// Event stream configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StreamConfig {
    /// Interval between SSE keep-alive comments
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_resources_root() -> PathBuf {
    PathBuf::from("example")
}

fn default_extensions() -> Vec<String> {
    vec!["md".to_string()]
}

fn default_keep_alive_secs() -> u64 {
    15
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            root: default_resources_root(),
            extensions: default_extensions(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            keep_alive_secs: default_keep_alive_secs(),
        }
    }
}

/// Split a comma-separated token list
pub fn parse_tokens(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Tokens travel verbatim in URL path segments and headers, so they
/// are limited to the RFC 3986 unreserved set
fn is_token_safe(token: &str) -> bool {
    token
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'))
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| PromptHubError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// The result is not validated; callers apply their own overrides
    /// first and then call [`Config::validate`].
    ///
    /// File lookup order:
    /// 1. `explicit` path (from the command line)
    /// 2. PROMPTHUB_CONFIG env var
    /// 3. ./prompthub.toml
    /// 4. Defaults
    ///
    /// Environment variables are merged on top of whichever was used.
    pub fn load_from(explicit: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit {
            Self::from_file(path)?
        } else if let Ok(path) = env::var("PROMPTHUB_CONFIG") {
            Self::from_file(path)?
        } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.merge_env();
        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        if let Ok(host) = env::var("HOST") {
            if !host.trim().is_empty() {
                self.server.host = host;
            }
        }
        if let Ok(port) = env::var("PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(tokens) = env::var("TOKENS") {
            self.auth.tokens = parse_tokens(&tokens);
        }

        if let Ok(dir) = env::var("RESOURCES_DIR") {
            self.resources.root = PathBuf::from(dir);
        }

        if let Ok(secs) = env::var("PROMPTHUB_KEEP_ALIVE_SECS") {
            if let Ok(s) = secs.parse() {
                self.stream.keep_alive_secs = s;
            }
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(PromptHubError::ConfigError(
                "Port must be non-zero".to_string(),
            ));
        }

        if self.auth.tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(PromptHubError::ConfigError(
                "Access tokens must not be empty".to_string(),
            ));
        }

        if let Some(bad) = self.auth.tokens.iter().find(|t| !is_token_safe(t)) {
            return Err(PromptHubError::ConfigError(format!(
                "Access token of length {} contains characters other than \
                 ASCII letters, digits, '-', '.', '_' and '~'",
                bad.len()
            )));
        }

        if self.resources.extensions.is_empty() {
            return Err(PromptHubError::ConfigError(
                "At least one resource extension is required".to_string(),
            ));
        }

        if self
            .resources
            .extensions
            .iter()
            .any(|e| e.trim_start_matches('.').is_empty())
        {
            return Err(PromptHubError::ConfigError(
                "Resource extensions must not be empty".to_string(),
            ));
        }

        if self.stream.keep_alive_secs == 0 {
            return Err(PromptHubError::ConfigError(
                "Keep-alive interval must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Listen address as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration (token values are never logged)
    pub fn log_config(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen: {}", self.bind_addr());
        tracing::info!("  Resources root: {:?}", self.resources.root);
        tracing::info!("  Extensions: {}", self.resources.extensions.join(", "));
        tracing::info!("  Keep-alive: {}s", self.stream.keep_alive_secs);
        if self.auth.tokens.is_empty() {
            tracing::warn!("  Tokens configured: none (every request will be rejected)");
        } else {
            tracing::info!("  Tokens configured: {}", self.auth.tokens.len());
        }
    }
}
