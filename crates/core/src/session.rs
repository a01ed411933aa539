//! Session state for one ongoing conversation
//!
//! The session is an explicit struct with documented defaults, and every
//! mutation of the diagnostic-flow state goes through a named transition.
//! `followup_count` only moves forward while a flow is active; starting a
//! genuinely new flow resets it, and finalizing force-sets it to the
//! completion threshold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::language::Language;

/// Completion threshold: at most this many clarifying questions per flow.
pub const MAX_FOLLOWUPS: u32 = 3;

/// Default title before the first user message arrives.
pub const DEFAULT_TITLE: &str = "New Chat";

/// Which question schedule a diagnostic flow runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Symptom diagnosis: only the crop-name question is ever asked; the
    /// symptom description already carries the rest.
    Diagnosis,
    /// General advisory (yield improvement and the like): the full
    /// crop+stage, soil+irrigation, fertilizers schedule.
    General,
}

/// An active (or finished) diagnostic flow.
///
/// `start_index` is the position of the user message that opened the flow
/// within the session's ordered history, so the flow's question/answer
/// pairs are looked up by reference instead of re-derived by scanning the
/// whole history backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticFlow {
    pub kind: FlowKind,
    pub start_index: usize,
}

/// One ongoing conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique id (externally generated)
    pub id: String,
    /// Owning user
    pub user_id: String,
    /// Short human label, set once from the first user message
    pub title: String,
    /// Last-detected language, updated every turn
    pub language: Language,
    /// A clarifying question is outstanding
    pub awaiting_followup: bool,
    /// Questions asked in the current flow, bounded by [`MAX_FOLLOWUPS`]
    pub followup_count: u32,
    /// Current diagnostic flow, if one was ever started
    pub flow: Option<DiagnosticFlow>,
    /// Timestamp of last activity
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create a session with documented defaults.
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            title: DEFAULT_TITLE.to_string(),
            language: Language::English,
            awaiting_followup: false,
            followup_count: 0,
            flow: None,
            updated_at: Utc::now(),
        }
    }

    /// Update language and activity timestamp. Called every turn.
    pub fn touch(&mut self, language: Language) {
        self.language = language;
        self.updated_at = Utc::now();
    }

    /// Derive and set the title from the first user message: the first
    /// `max_words` words, first letter capitalized. No-op once a title has
    /// been set.
    pub fn set_title_from(&mut self, text: &str, max_words: usize) {
        if self.title != DEFAULT_TITLE {
            return;
        }
        let head: Vec<&str> = text.split_whitespace().take(max_words).collect();
        if head.is_empty() {
            return;
        }
        let joined = head.join(" ");
        let mut chars = joined.chars();
        self.title = match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => joined,
        };
    }

    /// Begin a new diagnostic flow. Resets the question counter; any prior
    /// flow is replaced.
    pub fn start_flow(&mut self, kind: FlowKind, start_index: usize) {
        self.followup_count = 0;
        self.awaiting_followup = false;
        self.flow = Some(DiagnosticFlow { kind, start_index });
    }

    /// Skip the first scheduled question (its information arrived with the
    /// message that opened the flow).
    pub fn skip_first_question(&mut self) {
        self.followup_count = self.followup_count.max(1);
    }

    /// Record that a clarifying question was just sent.
    pub fn record_followup_asked(&mut self) {
        self.followup_count = (self.followup_count + 1).min(MAX_FOLLOWUPS);
        self.awaiting_followup = true;
    }

    /// No more questions are needed: jump to the completion threshold.
    pub fn finalize_flow(&mut self) {
        self.followup_count = MAX_FOLLOWUPS;
        self.awaiting_followup = false;
    }

    /// The flow has collected enough (or was force-completed).
    pub fn can_finalize(&self) -> bool {
        self.followup_count >= MAX_FOLLOWUPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let session = Session::new("s1", "u1");
        assert_eq!(session.title, DEFAULT_TITLE);
        assert_eq!(session.language, Language::English);
        assert!(!session.awaiting_followup);
        assert_eq!(session.followup_count, 0);
        assert!(session.flow.is_none());
    }

    #[test]
    fn test_title_set_once() {
        let mut session = Session::new("s1", "u1");
        session.set_title_from("my paddy leaves are turning yellow today", 6);
        assert_eq!(session.title, "My paddy leaves are turning yellow");

        session.set_title_from("a different message", 6);
        assert_eq!(session.title, "My paddy leaves are turning yellow");
    }

    #[test]
    fn test_followup_count_bounded() {
        let mut session = Session::new("s1", "u1");
        session.start_flow(FlowKind::General, 0);
        for _ in 0..10 {
            session.record_followup_asked();
        }
        assert_eq!(session.followup_count, MAX_FOLLOWUPS);
        assert!(session.can_finalize());
    }

    #[test]
    fn test_finalize_forces_threshold() {
        let mut session = Session::new("s1", "u1");
        session.start_flow(FlowKind::Diagnosis, 2);
        session.finalize_flow();
        assert_eq!(session.followup_count, MAX_FOLLOWUPS);
        assert!(!session.awaiting_followup);
        assert!(session.can_finalize());
    }

    #[test]
    fn test_new_flow_resets_counter() {
        let mut session = Session::new("s1", "u1");
        session.start_flow(FlowKind::General, 0);
        session.record_followup_asked();
        session.finalize_flow();

        session.start_flow(FlowKind::Diagnosis, 8);
        assert_eq!(session.followup_count, 0);
        assert_eq!(
            session.flow,
            Some(DiagnosticFlow { kind: FlowKind::Diagnosis, start_index: 8 })
        );
    }

    #[test]
    fn test_skip_first_question() {
        let mut session = Session::new("s1", "u1");
        session.start_flow(FlowKind::General, 0);
        session.skip_first_question();
        assert_eq!(session.followup_count, 1);
        // Does not move backwards.
        session.record_followup_asked();
        session.skip_first_question();
        assert_eq!(session.followup_count, 2);
    }
}
