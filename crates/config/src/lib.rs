//! Configuration for the farm advisor
//!
//! Supports loading runtime settings from:
//! - YAML/TOML files
//! - Environment variables (FARM_ADVISOR__ prefix)
//!
//! Also hosts the static domain tables every classifier and extractor
//! reads from:
//! - The centralized multilingual keyword table (one versioned table,
//!   category -> language -> phrases)
//! - Response templates (greetings, follow-up questions, fallbacks,
//!   engine prompt framings)
//! - The agricultural domain-term glossary

pub mod glossary;
pub mod keywords;
pub mod settings;
pub mod templates;

pub use glossary::DomainGlossary;
pub use keywords::{KeywordCategory, KeywordTable};
pub use settings::{
    load_settings, AuthConfig, ChatConfig, EngineConfig, ServerConfig, Settings, TranslateConfig,
};
pub use templates::{GreetingVariant, QuestionSlot, ResponseTemplates};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
