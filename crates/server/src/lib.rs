//! Farm Advisor Server
//!
//! HTTP endpoints marshalling request bodies into the chat engine, plus
//! session CRUD, message listing, JWT bearer authentication, and health
//! probes.

pub mod auth;
pub mod http;
pub mod state;

pub use auth::{auth_middleware, create_token, verify_token, AuthUser, Claims};
pub use http::create_router;
pub use state::AppState;

use thiserror::Error;

/// Server errors
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ServerError> for axum::http::StatusCode {
    fn from(err: ServerError) -> Self {
        match err {
            ServerError::Config(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            ServerError::Session(_) => axum::http::StatusCode::NOT_FOUND,
            ServerError::Auth(_) => axum::http::StatusCode::UNAUTHORIZED,
            ServerError::InvalidRequest(_) => axum::http::StatusCode::BAD_REQUEST,
            ServerError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<farm_advisor_core::Error> for ServerError {
    fn from(err: farm_advisor_core::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<farm_advisor_engine::EngineError> for ServerError {
    fn from(err: farm_advisor_engine::EngineError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl From<farm_advisor_agent::AgentError> for ServerError {
    fn from(err: farm_advisor_agent::AgentError) -> Self {
        ServerError::Internal(err.to_string())
    }
}
