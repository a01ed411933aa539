//! End-to-end turns through `ChatEngine` with a scripted engine.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use farm_advisor_agent::ChatEngine;
use farm_advisor_config::ChatConfig;
use farm_advisor_core::{
    EngineAnswer, EngineRequest, Error, KnowledgeEngine, Language, MemoryMessageStore,
    MemorySessionStore, Message, MessageStore, QueryMode, Result, Session, SessionStore,
    MAX_FOLLOWUPS, NO_CONTEXT,
};

/// Records every request and answers from a script, then a default.
struct MockEngine {
    calls: Mutex<Vec<EngineRequest>>,
    scripted: Mutex<VecDeque<std::result::Result<String, ()>>>,
    default_answer: String,
}

impl MockEngine {
    fn new(default_answer: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            scripted: Mutex::new(VecDeque::new()),
            default_answer: default_answer.to_string(),
        })
    }

    fn script(&self, answer: &str) {
        self.scripted.lock().push_back(Ok(answer.to_string()));
    }

    fn script_error(&self) {
        self.scripted.lock().push_back(Err(()));
    }

    fn calls(&self) -> Vec<EngineRequest> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl KnowledgeEngine for MockEngine {
    async fn query(&self, request: &EngineRequest) -> Result<EngineAnswer> {
        self.calls.lock().push(request.clone());
        match self.scripted.lock().pop_front() {
            Some(Ok(text)) => Ok(EngineAnswer::new(text)),
            Some(Err(())) => Err(Error::Engine("connection refused".to_string())),
            None => Ok(EngineAnswer::new(self.default_answer.clone())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

struct Harness {
    engine: Arc<MockEngine>,
    sessions: Arc<MemorySessionStore>,
    messages: Arc<MemoryMessageStore>,
    chat: ChatEngine,
}

fn harness() -> Harness {
    let engine = MockEngine::new("Here is some advice.");
    let sessions = Arc::new(MemorySessionStore::new());
    let messages = Arc::new(MemoryMessageStore::new());
    let chat = ChatEngine::new(
        engine.clone(),
        sessions.clone(),
        messages.clone(),
        ChatConfig::default(),
    );
    Harness { engine, sessions, messages, chat }
}

async fn seed_session(h: &Harness, id: &str) {
    h.sessions.insert(&Session::new(id, "u1")).await.unwrap();
}

#[tokio::test]
async fn greeting_skips_engine() {
    // Scenario A: "hi" on a fresh session.
    let h = harness();
    seed_session(&h, "s1").await;

    let reply = h.chat.handle_turn("s1", "hi").await.unwrap();

    assert!(reply.contains("FarmVaidya"));
    assert!(reply.starts_with("Hello!"));
    assert!(h.engine.calls().is_empty());
}

#[tokio::test]
async fn dosage_goes_direct_with_empty_history() {
    // Scenario B.
    let h = harness();
    seed_session(&h, "s1").await;
    h.engine.script("P-Factor: 500 ml per acre as a foliar spray.");

    let reply = h.chat.handle_turn("s1", "What is the dosage of P-Factor?").await.unwrap();

    assert!(reply.contains("500 ml"));
    let calls = h.engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mode, QueryMode::Direct);
    assert!(calls[0].history.is_empty());
}

#[tokio::test]
async fn diagnosis_with_crop_answers_same_turn() {
    // Scenario C: crop is named, so no question is emitted.
    let h = harness();
    seed_session(&h, "s1").await;
    h.engine.script("Yellowing in paddy usually indicates nitrogen deficiency.");

    let reply = h.chat.handle_turn("s1", "My paddy leaves are turning yellow").await.unwrap();

    assert!(reply.contains("nitrogen"));
    assert_eq!(h.engine.calls().len(), 1);

    let session = h.sessions.find_by_id("s1").await.unwrap().unwrap();
    assert_eq!(session.followup_count, MAX_FOLLOWUPS);
    assert!(!session.awaiting_followup);
}

#[tokio::test]
async fn diagnosis_without_crop_asks_and_never_repeats() {
    // Scenario D.
    let h = harness();
    seed_session(&h, "s1").await;

    let reply = h.chat.handle_turn("s1", "My crop has pests").await.unwrap();
    assert_eq!(reply, "Which crop are you seeing this problem on?");
    assert!(h.engine.calls().is_empty());

    let session = h.sessions.find_by_id("s1").await.unwrap().unwrap();
    assert_eq!(session.followup_count, 1);
    assert!(session.awaiting_followup);

    // A malformed retry must not re-send the same question.
    h.engine.script("Spray neem oil weekly until the infestation clears.");
    let second = h.chat.handle_turn("s1", "hmm not sure").await.unwrap();
    assert_ne!(second, "Which crop are you seeing this problem on?");

    let session = h.sessions.find_by_id("s1").await.unwrap().unwrap();
    assert!(!session.awaiting_followup);
}

#[tokio::test]
async fn summary_compiles_recap_without_engine() {
    // Scenario E: dosages already sit in assistant history.
    let h = harness();
    seed_session(&h, "s1").await;
    for (role_user, text) in [
        (true, "what is the dosage of Invictus"),
        (false, "Invictus: 2 liters per acre."),
        (true, "and Poshak?"),
        (false, "Poshak: 1 kg per acre."),
    ] {
        let message = if role_user {
            Message::user("s1", text)
        } else {
            Message::assistant("s1", text)
        };
        h.messages.insert(&message).await.unwrap();
    }

    let reply = h.chat.handle_turn("s1", "list all dosages discussed").await.unwrap();

    assert!(reply.contains("• Invictus: 2 liters"));
    assert!(reply.contains("• Poshak: 1 kg"));
    assert!(h.engine.calls().is_empty());
}

#[tokio::test]
async fn no_context_falls_back_to_offline_tables() {
    let h = harness();
    seed_session(&h, "s1").await;

    // Walk the full general flow, then have the engine return the sentinel.
    h.chat.handle_turn("s1", "how can I improve my yield").await.unwrap();
    h.chat.handle_turn("s1", "coconut at mid stage").await.unwrap();
    h.chat.handle_turn("s1", "red soil with drip").await.unwrap();
    h.engine.script(NO_CONTEXT);
    let reply = h.chat.handle_turn("s1", "urea only").await.unwrap();

    assert!(reply.contains("COCONUT YIELD IMPROVEMENT PLAN"));
    assert!(reply.contains("Urea: 1.2-1.5 kg/tree/year"));
}

#[tokio::test]
async fn engine_error_degrades_to_fallback_message() {
    let h = harness();
    seed_session(&h, "s1").await;
    h.engine.script_error();

    let reply = h.chat.handle_turn("s1", "What is the dosage of Poshak?").await.unwrap();
    assert!(reply.contains("consult your local agricultural officer"));
}

#[tokio::test]
async fn title_and_language_persisted() {
    let h = harness();
    seed_session(&h, "s1").await;
    h.engine.script("వరి పంటకు నత్రజని లోపం కారణం కావచ్చు.");

    h.chat.handle_turn("s1", "నా వరి ఆకులు పసుపు రంగులోకి మారుతున్నాయి").await.unwrap();

    let session = h.sessions.find_by_id("s1").await.unwrap().unwrap();
    assert_eq!(session.language, Language::Telugu);
    assert!(session.title.starts_with("నా వరి"));
}

#[tokio::test]
async fn missing_session_still_answers() {
    let h = harness();
    // No session seeded at all.
    let reply = h.chat.handle_turn("ghost", "hello").await.unwrap();
    assert!(!reply.is_empty());
    // The turn persisted both messages.
    assert_eq!(h.messages.count_by_session("ghost").await.unwrap(), 2);
}

#[tokio::test]
async fn knowledge_answer_gets_crop_nudge() {
    let h = harness();
    seed_session(&h, "s1").await;
    h.engine.script("Poshak is an organic nutrient booster.");

    let reply = h.chat.handle_turn("s1", "Tell me the benefits of Poshak").await.unwrap();

    assert!(reply.contains("organic nutrient booster"));
    assert!(reply.contains("which crop this is for"));
    let calls = h.engine.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].mode, QueryMode::Mix);
}

#[tokio::test]
async fn concurrent_turns_serialize_per_session() {
    let h = harness();
    seed_session(&h, "s1").await;
    let chat = Arc::new(h.chat);

    // Rapid double-submit of the same diagnosis message. Serialized turns
    // mean exactly one flow starts and the counter stays consistent.
    let a = {
        let chat = chat.clone();
        tokio::spawn(async move { chat.handle_turn("s1", "My crop has pests").await.unwrap() })
    };
    let b = {
        let chat = chat.clone();
        tokio::spawn(async move { chat.handle_turn("s1", "My crop has pests").await.unwrap() })
    };
    a.await.unwrap();
    b.await.unwrap();

    let session = h.sessions.find_by_id("s1").await.unwrap().unwrap();
    assert!(session.followup_count <= MAX_FOLLOWUPS);
    assert_eq!(h.messages.count_by_session("s1").await.unwrap(), 4);
}
