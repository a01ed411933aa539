//! Error types shared across the workspace

use thiserror::Error;

/// Core errors
#[derive(Error, Debug)]
pub enum Error {
    #[error("Knowledge engine error: {0}")]
    Engine(String),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Timeout")]
    Timeout,
}

/// Core result alias
pub type Result<T> = std::result::Result<T, Error>;
