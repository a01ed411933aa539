//! Knowledge engine trait
//!
//! The retrieval/answer-generation backend is a single request/response
//! call. The engine may answer with a sentinel substring meaning "no
//! relevant indexed information"; callers must treat that (and empty
//! answers) as no answer and fall back locally.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::{Message, TurnRole};
use crate::Result;

/// Sentinel substring the engine returns when nothing relevant is indexed.
pub const NO_CONTEXT: &str = "[no-context]";

/// Retrieval/answer-generation backend.
///
/// Implementations:
/// - `HttpKnowledgeEngine` - remote engine over HTTP with bounded timeout
/// - test mocks with scripted answers
#[async_trait]
pub trait KnowledgeEngine: Send + Sync + 'static {
    /// Issue one query and return the freeform answer.
    async fn query(&self, request: &EngineRequest) -> Result<EngineAnswer>;

    /// Engine name for logging
    fn name(&self) -> &str;
}

/// Query mode forwarded to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Blended retrieval, the default for open questions
    #[default]
    Mix,
    /// Local/entity retrieval; does not force a guess when nothing matches
    Local,
    /// Skip retrieval, answer from the prompt alone
    Bypass,
    /// Direct lookup for narrow factual asks (dosages)
    Direct,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Mix => "mix",
            QueryMode::Local => "local",
            QueryMode::Bypass => "bypass",
            QueryMode::Direct => "direct",
        }
    }
}

/// One prior turn handed to the engine as conversation history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryTurn {
    pub role: String,
    pub content: String,
}

impl From<&Message> for HistoryTurn {
    fn from(message: &Message) -> Self {
        Self {
            role: message.role.as_str().to_string(),
            content: message.content.clone(),
        }
    }
}

impl HistoryTurn {
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self { role: role.as_str().to_string(), content: content.into() }
    }
}

/// A single engine request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineRequest {
    /// Query text
    pub query: String,
    /// Ordered conversation history (may be empty on purpose)
    #[serde(default)]
    pub history: Vec<HistoryTurn>,
    /// Query mode
    #[serde(default)]
    pub mode: QueryMode,
}

impl EngineRequest {
    /// Create a request with empty history and the default mode.
    pub fn new(query: impl Into<String>) -> Self {
        Self { query: query.into(), history: Vec::new(), mode: QueryMode::default() }
    }

    /// Set the query mode
    pub fn with_mode(mut self, mode: QueryMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach conversation history
    pub fn with_history(mut self, history: Vec<HistoryTurn>) -> Self {
        self.history = history;
        self
    }
}

/// Engine answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineAnswer {
    pub text: String,
}

impl EngineAnswer {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// True when the engine found nothing relevant: the explicit sentinel
    /// or an empty answer.
    pub fn is_no_context(&self) -> bool {
        self.text.trim().is_empty() || self.text.contains(NO_CONTEXT)
    }
}
