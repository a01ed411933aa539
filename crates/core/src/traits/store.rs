//! Persistence traits for sessions and messages
//!
//! Backed by a key-value document store in production; the in-memory
//! implementations in [`crate::store`] cover tests and single-node
//! deployments. Turn handling serializes writes per session, so whole-
//! record `save` gives the read-modify-write consistency the session
//! counters need.

use async_trait::async_trait;

use crate::conversation::Message;
use crate::session::Session;
use crate::Result;

/// Session persistence.
#[async_trait]
pub trait SessionStore: Send + Sync + 'static {
    /// Insert a new session
    async fn insert(&self, session: &Session) -> Result<()>;

    /// Find a session by id
    async fn find_by_id(&self, id: &str) -> Result<Option<Session>>;

    /// Persist the full session record (upsert)
    async fn save(&self, session: &Session) -> Result<()>;

    /// List sessions owned by a user
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Session>>;

    /// Delete a session
    async fn delete(&self, id: &str) -> Result<()>;
}

/// Message persistence.
#[async_trait]
pub trait MessageStore: Send + Sync + 'static {
    /// Append a message
    async fn insert(&self, message: &Message) -> Result<()>;

    /// All messages of a session, ordered by creation time
    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Message>>;

    /// Number of messages in a session
    async fn count_by_session(&self, session_id: &str) -> Result<usize>;

    /// Delete all messages of a session
    async fn delete_by_session(&self, session_id: &str) -> Result<()>;
}
