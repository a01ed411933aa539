//! Turn orchestration
//!
//! `ChatEngine::handle_turn` is the top-level per-message transaction:
//! persist the user turn, update the session, pick exactly one branch,
//! produce a reply, persist it, return it. Turns are serialized per
//! session through a keyed async mutex, so the session counters always
//! see read-modify-write consistency even under a rapid double-submit.
//!
//! The engine never propagates a knowledge-engine failure to the caller:
//! a no-context sentinel, an empty answer, or a transport error all
//! degrade to the offline recommendation tables, and failing those, to a
//! generic consult-local-experts reply.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;

use farm_advisor_config::{
    ChatConfig, DomainGlossary, GreetingVariant, KeywordCategory, KeywordTable, QuestionSlot,
    ResponseTemplates,
};
use farm_advisor_core::{
    EngineRequest, FlowKind, HistoryTurn, KnowledgeEngine, Language, Message, MessageStore,
    QueryMode, Session, SessionStore, Translator, TurnRole,
};

use crate::classify::{classify, flow_kind, select_branch, Branch, Classification};
use crate::cleaner::clean;
use crate::extract::ProvidedInfo;
use crate::followup::{FollowupAction, FollowupController};
use crate::offline::{synthesize_plan, GrowthStage, IrrigationMethod, SoilType};
use crate::summary::extract_dosage_recap;
use crate::AgentError;

/// Placeholder recorded for a follow-up slot the farmer never answered.
const NOT_PROVIDED: &str = "not provided";

/// The per-message routing brain.
pub struct ChatEngine {
    engine: Arc<dyn KnowledgeEngine>,
    translator: Option<Arc<dyn Translator>>,
    sessions: Arc<dyn SessionStore>,
    messages: Arc<dyn MessageStore>,
    table: &'static KeywordTable,
    templates: ResponseTemplates,
    glossary: DomainGlossary,
    config: ChatConfig,
    turn_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl ChatEngine {
    pub fn new(
        engine: Arc<dyn KnowledgeEngine>,
        sessions: Arc<dyn SessionStore>,
        messages: Arc<dyn MessageStore>,
        config: ChatConfig,
    ) -> Self {
        Self {
            engine,
            translator: None,
            sessions,
            messages,
            table: KeywordTable::shared(),
            templates: ResponseTemplates::new(),
            glossary: DomainGlossary::new(),
            config,
            turn_locks: DashMap::new(),
        }
    }

    /// Attach a translator for answer-language reconciliation.
    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Handle one user message and produce the assistant reply.
    pub async fn handle_turn(&self, session_id: &str, user_text: &str) -> Result<String, AgentError> {
        // One turn at a time per session; concurrent submits queue here.
        let lock = self
            .turn_locks
            .entry(session_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let _guard = lock.lock().await;

        // A missing session is not fatal: proceed with defaults.
        let mut session = match self.sessions.find_by_id(session_id).await? {
            Some(session) => session,
            None => Session::new(session_id, ""),
        };

        self.messages.insert(&Message::user(session_id, user_text)).await?;

        let language = Language::detect(user_text);
        session.touch(language);

        if self.messages.count_by_session(session_id).await? == 1 {
            session.set_title_from(user_text, self.config.title_words);
        }

        let classification = classify(user_text, self.table);
        let branch = select_branch(&classification, session.awaiting_followup);
        tracing::info!(
            session_id,
            branch = ?branch,
            language = language.code(),
            "branch selected"
        );

        let history = self.messages.find_by_session(session_id).await?;

        let reply = match branch {
            Branch::Greeting => self.greeting_reply(user_text, language),
            Branch::Factual => self.factual_answer(user_text, language).await,
            Branch::Dosage => {
                self.dosage_answer(user_text, &history, &classification, language).await
            }
            Branch::Knowledge => {
                self.knowledge_answer(user_text, &history, &classification, language).await
            }
            Branch::Summary => self.summary_answer(user_text, &history, language).await,
            Branch::Diagnosis => {
                let kind = flow_kind(user_text, self.table);
                let controller =
                    FollowupController::new(self.table, &self.templates, self.config.history_window);
                match controller.next_action(&mut session, &history, user_text, kind) {
                    // A question short-circuits the turn.
                    FollowupAction::Ask { question, .. } => question,
                    FollowupAction::Complete => {
                        self.finalize_answer(&session, &history, language).await
                    }
                }
            }
            Branch::Default => self.default_answer(user_text, &history, language).await,
        };

        self.messages.insert(&Message::assistant(session_id, &reply)).await?;
        self.sessions.save(&session).await?;

        Ok(reply)
    }

    /// Canned, language-matched reply; the knowledge engine is not
    /// involved. The time-of-day variant comes from the message itself so
    /// replies stay deterministic.
    fn greeting_reply(&self, text: &str, language: Language) -> String {
        let lower = text.to_lowercase();

        let variant = if lower.contains("good morning")
            || lower.contains("శుభోదయం")
            || lower.contains("शुभ प्रभात")
        {
            GreetingVariant::Morning
        } else if lower.contains("good afternoon") {
            GreetingVariant::Afternoon
        } else if lower.contains("good evening")
            || lower.contains("good night")
            || lower.contains("శుభ రాత్రి")
            || lower.contains("शुभ रात्रि")
        {
            GreetingVariant::Evening
        } else if self.is_acknowledgment(&lower) {
            GreetingVariant::Thanks
        } else {
            GreetingVariant::Neutral
        };

        self.templates.greeting(variant, language).to_string()
    }

    fn is_acknowledgment(&self, lower: &str) -> bool {
        let bare = lower.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());
        self.table.phrases(KeywordCategory::Acknowledgment).any(|phrase| {
            if phrase.split_whitespace().count() > 1 {
                lower.contains(phrase)
            } else {
                bare == phrase
            }
        })
    }

    /// Factual/company question: empty history to avoid cross-entity
    /// bleed, and a mode that does not force a guess.
    async fn factual_answer(&self, text: &str, language: Language) -> String {
        let query = format!(
            "{}\n\n{}",
            self.templates.factual_framing(),
            self.glossary.to_english(text)
        );
        let request = EngineRequest::new(query).with_mode(QueryMode::Local);

        match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => self.templates.consult_fallback(language).to_string(),
        }
    }

    /// Dosage question: no broad history. A follow-up reference pulls the
    /// last few user-only turns into the prompt; assistant text stays out
    /// to avoid language and formatting contamination.
    async fn dosage_answer(
        &self,
        text: &str,
        history: &[Message],
        classification: &Classification,
        language: Language,
    ) -> String {
        let question = self.glossary.to_english(text);

        let query = if classification.followup_reference {
            let prior_user: Vec<String> = history
                [..history.len().saturating_sub(1)]
                .iter()
                .filter(|m| m.role == TurnRole::User)
                .rev()
                .take(self.config.context_turns)
                .map(|m| self.glossary.to_english(&m.content))
                .collect();
            let mut context: Vec<String> = prior_user.into_iter().rev().collect();
            context.push(question);
            format!(
                "The farmer previously said: {}. Give the dosage for the product under discussion.",
                context.join(" | ")
            )
        } else {
            question
        };

        let request = EngineRequest::new(query).with_mode(QueryMode::Direct);

        match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => self.templates.consult_fallback(language).to_string(),
        }
    }

    /// Direct product-knowledge question.
    async fn knowledge_answer(
        &self,
        text: &str,
        history: &[Message],
        classification: &Classification,
        language: Language,
    ) -> String {
        let question = self.glossary.to_english(text);

        let query = if classification.followup_reference {
            let recent = recent_lines(history, self.config.history_window);
            format!(
                "{}\n\nRecent conversation:\n{}\n\nThe farmer now asks: {}",
                self.templates.knowledge_framing(),
                recent,
                question
            )
        } else {
            format!("{}\n\n{}", self.templates.knowledge_framing(), question)
        };

        let request = EngineRequest::new(query).with_mode(QueryMode::Mix);

        let answer = match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => return self.templates.consult_fallback(language).to_string(),
        };

        // Nudge for a crop name when none was ever mentioned, so the next
        // answer can be specific.
        let info = ProvidedInfo::extract(history, self.table);
        if !info.crop && !classification.followup_reference {
            format!("{}{}", answer, self.templates.crop_nudge(language))
        } else {
            answer
        }
    }

    /// Summary request: compile the recap locally when dosage figures can
    /// be extracted from this conversation; only fall back to the engine
    /// when nothing extracts.
    async fn summary_answer(&self, text: &str, history: &[Message], language: Language) -> String {
        if let Some(recap) = extract_dosage_recap(history, &self.templates, language) {
            tracing::debug!("summary compiled locally, engine skipped");
            return recap;
        }

        let request = EngineRequest::new(format!(
            "Summarize only the products and recommendations discussed in this conversation, \
             with exact dosages. {}",
            self.glossary.to_english(text)
        ))
        .with_mode(QueryMode::Mix)
        .with_history(history_turns(history, self.config.history_window));

        match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => self.templates.consult_fallback(language).to_string(),
        }
    }

    /// Finalize a diagnostic flow: one comprehensive query combining the
    /// original problem statement with every answer collected since the
    /// flow began. Slots never answered get an explicit placeholder.
    async fn finalize_answer(
        &self,
        session: &Session,
        history: &[Message],
        language: Language,
    ) -> String {
        let (kind, start) = session
            .flow
            .map(|f| (f.kind, f.start_index.min(history.len().saturating_sub(1))))
            .unwrap_or((FlowKind::General, history.len().saturating_sub(1)));
        let flow_messages = &history[start..];

        let problem = flow_messages
            .iter()
            .find(|m| m.role == TurnRole::User)
            .map(|m| self.glossary.to_english(&m.content))
            .unwrap_or_default();

        let schedule = match kind {
            FlowKind::Diagnosis => QuestionSlot::diagnosis_schedule(),
            FlowKind::General => QuestionSlot::full_schedule(),
        };

        let mut details = String::new();
        for slot in schedule {
            let answer = self
                .answer_for_slot(*slot, flow_messages)
                .map(|a| self.glossary.to_english(&a))
                .unwrap_or_else(|| NOT_PROVIDED.to_string());
            details.push_str(&format!("- {}: {}\n", slot_label(*slot), answer));
        }

        let framing = match kind {
            FlowKind::Diagnosis => self.templates.diagnosis_framing(),
            FlowKind::General => self.templates.advisory_framing(),
        };
        let query = format!("{framing}\n\nFarmer's question: {problem}\n\nDetails collected:\n{details}");

        let request = EngineRequest::new(query)
            .with_mode(QueryMode::Mix)
            .with_history(flow_messages.iter().map(HistoryTurn::from).collect());

        match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => {
                tracing::info!(session_id = %session.id, "engine had no context, using offline tables");
                self.offline_fallback(flow_messages, language).await
            }
        }
    }

    /// Default branch: context-aware engine call with the recent window.
    async fn default_answer(&self, text: &str, history: &[Message], language: Language) -> String {
        let request = EngineRequest::new(self.glossary.to_english(text))
            .with_mode(QueryMode::Mix)
            .with_history(history_turns(history, self.config.history_window));

        match self.engine_query(request).await {
            Some(answer) => self.finish_answer(answer, language).await,
            None => self.offline_fallback(history, language).await,
        }
    }

    /// The farmer's answer following the exact text of a scheduled
    /// question within this flow.
    fn answer_for_slot(&self, slot: QuestionSlot, flow_messages: &[Message]) -> Option<String> {
        let asked_at = flow_messages.iter().position(|m| {
            m.role == TurnRole::Assistant
                && self.templates.question_variants(slot).any(|q| m.content == q)
        })?;
        flow_messages[asked_at + 1..]
            .iter()
            .find(|m| m.role == TurnRole::User)
            .map(|m| m.content.clone())
    }

    /// Deterministic recommendation from the offline tables, keyed by
    /// whatever soil/stage/irrigation facts the farmer gave. When the key
    /// is incomplete the generic consult-local-experts reply goes out.
    async fn offline_fallback(&self, messages: &[Message], language: Language) -> String {
        let blob: String = messages
            .iter()
            .filter(|m| m.role == TurnRole::User)
            .map(|m| self.glossary.to_english(&m.content).to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");

        let soil = SoilType::parse(&blob);
        let stage = GrowthStage::parse(&blob);
        let irrigation = IrrigationMethod::parse(&blob);

        match (soil, stage, irrigation) {
            (Some(soil), Some(stage), Some(irrigation)) => {
                let fertilizers = self
                    .answer_for_slot(QuestionSlot::FertilizersUsed, messages)
                    .unwrap_or_else(|| NOT_PROVIDED.to_string());
                let plan = synthesize_plan(soil, stage, irrigation, &fertilizers);
                self.ensure_language_match(plan, language).await
            }
            _ => self.templates.consult_fallback(language).to_string(),
        }
    }

    /// One engine call; `None` covers sentinel, empty, and transport
    /// failure alike.
    async fn engine_query(&self, request: EngineRequest) -> Option<String> {
        match self.engine.query(&request).await {
            Ok(answer) if !answer.is_no_context() => Some(answer.text),
            Ok(_) => {
                tracing::warn!(engine = self.engine.name(), "engine returned no context");
                None
            }
            Err(error) => {
                tracing::warn!(engine = self.engine.name(), %error, "engine call failed");
                None
            }
        }
    }

    /// Clean and reconcile the answer language with the farmer's.
    async fn finish_answer(&self, text: String, language: Language) -> String {
        let cleaned = clean(&text);
        self.ensure_language_match(cleaned, language).await
    }

    async fn ensure_language_match(&self, text: String, language: Language) -> String {
        if Language::detect(&text) == language {
            return text;
        }
        let Some(translator) = &self.translator else {
            return text;
        };
        match translator.translate(&text, None, language).await {
            Ok(translated) => self.glossary.to_native(&translated, language),
            Err(error) => {
                // Untranslated is better than no answer.
                tracing::warn!(translator = translator.name(), %error, "translation failed");
                text
            }
        }
    }
}

/// History turns for the engine, windowed to the last `limit` messages.
fn history_turns(history: &[Message], limit: usize) -> Vec<HistoryTurn> {
    history
        .iter()
        .skip(history.len().saturating_sub(limit))
        .map(HistoryTurn::from)
        .collect()
}

/// Recent history formatted for an in-prompt context block.
fn recent_lines(history: &[Message], limit: usize) -> String {
    history
        .iter()
        .skip(history.len().saturating_sub(limit))
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}

fn slot_label(slot: QuestionSlot) -> &'static str {
    match slot {
        QuestionSlot::CropStage => "Crop and growth stage",
        QuestionSlot::SoilIrrigation => "Soil type and irrigation",
        QuestionSlot::FertilizersUsed => "Fertilizers already used",
        QuestionSlot::CropOnly => "Crop",
    }
}
