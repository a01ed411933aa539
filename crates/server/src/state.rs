//! Shared application state

use std::sync::Arc;

use farm_advisor_agent::ChatEngine;
use farm_advisor_config::Settings;
use farm_advisor_core::{
    MemoryMessageStore, MemorySessionStore, MessageStore, SessionStore, Translator,
};
use farm_advisor_engine::{HttpKnowledgeEngine, HttpTranslator};

use crate::ServerError;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub chat: Arc<ChatEngine>,
    pub sessions: Arc<dyn SessionStore>,
    pub messages: Arc<dyn MessageStore>,
}

impl AppState {
    /// Wire up the default stack: HTTP knowledge engine, optional HTTP
    /// translator, in-memory stores.
    pub fn new(settings: Settings) -> Result<Self, ServerError> {
        let engine = Arc::new(HttpKnowledgeEngine::new(settings.engine.clone())?);
        let sessions: Arc<dyn SessionStore> = Arc::new(MemorySessionStore::new());
        let messages: Arc<dyn MessageStore> = Arc::new(MemoryMessageStore::new());

        let mut chat = ChatEngine::new(
            engine,
            sessions.clone(),
            messages.clone(),
            settings.chat.clone(),
        );
        if settings.translate.enabled {
            let translator: Arc<dyn Translator> =
                Arc::new(HttpTranslator::new(settings.translate.clone())?);
            chat = chat.with_translator(translator);
        }

        Ok(Self {
            settings: Arc::new(settings),
            chat: Arc::new(chat),
            sessions,
            messages,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_creation() {
        let state = AppState::new(Settings::default()).unwrap();
        assert!(!state.settings.server.auth.enabled);
    }

    #[test]
    fn test_state_creation_with_translator() {
        let mut settings = Settings::default();
        settings.translate.enabled = true;
        assert!(AppState::new(settings).is_ok());
    }
}
