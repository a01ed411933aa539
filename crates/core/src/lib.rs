//! Core traits and types for the farm advisor
//!
//! This crate provides foundational types used across all other crates:
//! - Language definitions with script-based detection
//! - Conversation types (roles, messages)
//! - Session state with named transitions for the diagnostic flow
//! - Traits for external collaborators (knowledge engine, translator, stores)
//! - In-memory store implementations
//! - Error types

pub mod conversation;
pub mod error;
pub mod language;
pub mod session;
pub mod store;
pub mod traits;

pub use conversation::{Message, TurnRole};
pub use error::{Error, Result};
pub use language::{Language, Script};
pub use session::{DiagnosticFlow, FlowKind, Session, MAX_FOLLOWUPS};
pub use store::{MemoryMessageStore, MemorySessionStore};

pub use traits::{
    // Knowledge engine
    EngineAnswer, EngineRequest, HistoryTurn, KnowledgeEngine, QueryMode, NO_CONTEXT,
    // Translation
    Translator,
    // Persistence
    MessageStore, SessionStore,
};
