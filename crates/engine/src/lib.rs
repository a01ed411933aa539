//! HTTP implementations of the external collaborator traits
//!
//! - `HttpKnowledgeEngine`: the remote retrieval/answer-generation service
//! - `HttpTranslator` / `NoopTranslator`: machine translation

pub mod knowledge;
pub mod translate;

pub use knowledge::HttpKnowledgeEngine;
pub use translate::{HttpTranslator, NoopTranslator};

use thiserror::Error;

/// Engine client errors
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,
}

impl From<reqwest::Error> for EngineError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            EngineError::Timeout
        } else {
            EngineError::Network(err.to_string())
        }
    }
}

impl From<EngineError> for farm_advisor_core::Error {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Timeout => farm_advisor_core::Error::Timeout,
            other => farm_advisor_core::Error::Engine(other.to_string()),
        }
    }
}
