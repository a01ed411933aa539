//! Conversational routing core
//!
//! Features:
//! - Lexical intent classification over a shared multilingual keyword table
//! - Provided-information extraction from session history
//! - Bounded follow-up dialog control for diagnostic flows
//! - Turn orchestration with per-session serialization
//! - Dosage recap compilation and response cleaning
//! - Offline recommendation fallback when the knowledge engine has nothing

pub mod classify;
pub mod cleaner;
pub mod extract;
pub mod followup;
pub mod offline;
pub mod orchestrator;
pub mod summary;

pub use classify::{classify, select_branch, Branch, Classification};
pub use cleaner::clean;
pub use extract::ProvidedInfo;
pub use followup::{FollowupAction, FollowupController};
pub use orchestrator::ChatEngine;
pub use summary::extract_dosage_recap;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Session error: {0}")]
    Session(String),
}

impl From<farm_advisor_core::Error> for AgentError {
    fn from(err: farm_advisor_core::Error) -> Self {
        AgentError::Store(err.to_string())
    }
}
