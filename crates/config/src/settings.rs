//! Runtime settings
//!
//! Layered: built-in defaults, then an optional config file, then
//! environment variables with the `FARM_ADVISOR__` prefix
//! (e.g. `FARM_ADVISOR__SERVER__PORT=8080`).

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Top-level settings tree
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub translate: TranslateConfig,
    #[serde(default)]
    pub chat: ChatConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub cors_enabled: bool,
    #[serde(default)]
    pub cors_origins: Vec<String>,
    #[serde(default)]
    pub auth: AuthConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_enabled: true,
            cors_origins: Vec::new(),
            auth: AuthConfig::default(),
        }
    }
}

/// Bearer/JWT authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Require a valid token on protected paths
    #[serde(default)]
    pub enabled: bool,
    /// HS256 signing secret
    #[serde(default)]
    pub jwt_secret: Option<String>,
    /// Token lifetime in hours
    #[serde(default = "default_token_ttl")]
    pub token_ttl_hours: u64,
    /// Paths that bypass authentication
    #[serde(default = "default_public_paths")]
    pub public_paths: Vec<String>,
}

fn default_token_ttl() -> u64 {
    24
}

fn default_public_paths() -> Vec<String> {
    vec!["/health".to_string(), "/ready".to_string(), "/auth".to_string()]
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            jwt_secret: None,
            token_ttl_hours: default_token_ttl(),
            public_paths: default_public_paths(),
        }
    }
}

/// Knowledge engine endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_engine_url")]
    pub url: String,
    /// Per-call timeout in seconds
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_url() -> String {
    "http://127.0.0.1:9621/query".to_string()
}

fn default_engine_timeout() -> u64 {
    60
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { url: default_engine_url(), timeout_secs: default_engine_timeout() }
    }
}

/// Translation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_translate_url")]
    pub url: String,
    #[serde(default = "default_translate_timeout")]
    pub timeout_secs: u64,
}

fn default_translate_url() -> String {
    "http://127.0.0.1:9622/translate".to_string()
}

fn default_translate_timeout() -> u64 {
    30
}

impl Default for TranslateConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            url: default_translate_url(),
            timeout_secs: default_translate_timeout(),
        }
    }
}

/// Chat behavior tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Window of recent messages the extractor scans
    #[serde(default = "default_history_window")]
    pub history_window: usize,
    /// Words taken from the first message for the session title
    #[serde(default = "default_title_words")]
    pub title_words: usize,
    /// User turns pulled into follow-up-reference context prompts
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

fn default_history_window() -> usize {
    10
}

fn default_title_words() -> usize {
    6
}

fn default_context_turns() -> usize {
    3
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_window: default_history_window(),
            title_words: default_title_words(),
            context_turns: default_context_turns(),
        }
    }
}

/// Load settings from files and environment.
pub fn load_settings() -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name("config/local").required(false))
        .add_source(
            config::Environment::with_prefix("FARM_ADVISOR")
                .separator("__")
                .try_parsing(true),
        );

    let settings: Settings = builder.build()?.try_deserialize()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.engine.timeout_secs, 60);
        assert_eq!(settings.chat.history_window, 10);
        assert!(!settings.server.auth.enabled);
        assert!(settings.server.auth.public_paths.contains(&"/health".to_string()));
    }

    #[test]
    fn test_deserialize_partial() {
        let settings: Settings =
            serde_yaml::from_str("server:\n  port: 9000\nengine:\n  timeout_secs: 15\n").unwrap();
        assert_eq!(settings.server.port, 9000);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.engine.timeout_secs, 15);
    }
}
