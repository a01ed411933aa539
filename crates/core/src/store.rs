//! In-memory store implementations
//!
//! Default backends for tests and single-node deployments. Sessions live
//! in a `HashMap`; messages keep insertion order per session, which
//! matches their `created_at` order because turn handling is serialized
//! per session.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::conversation::Message;
use crate::session::Session;
use crate::traits::{MessageStore, SessionStore};
use crate::Result;

/// In-memory session store.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions
    pub fn count(&self) -> usize {
        self.sessions.read().len()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn insert(&self, session: &Session) -> Result<()> {
        self.sessions.write().insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().get(id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        self.sessions.write().insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Session>> {
        let mut sessions: Vec<Session> = self
            .sessions
            .read()
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(sessions)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.sessions.write().remove(id);
        Ok(())
    }
}

/// In-memory message store.
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: RwLock<HashMap<String, Vec<Message>>>,
}

impl MemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn insert(&self, message: &Message) -> Result<()> {
        self.messages
            .write()
            .entry(message.session_id.clone())
            .or_default()
            .push(message.clone());
        Ok(())
    }

    async fn find_by_session(&self, session_id: &str) -> Result<Vec<Message>> {
        let mut messages = self
            .messages
            .read()
            .get(session_id)
            .cloned()
            .unwrap_or_default();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }

    async fn count_by_session(&self, session_id: &str) -> Result<usize> {
        Ok(self.messages.read().get(session_id).map(|m| m.len()).unwrap_or(0))
    }

    async fn delete_by_session(&self, session_id: &str) -> Result<()> {
        self.messages.write().remove(session_id);
        Ok(())
    }
}
