//! Follow-up dialog controller
//!
//! Decides, per turn, whether to ask another clarifying question, which
//! one, in which language, or to declare the dialog complete. Owns the
//! question schedules, the asked/not-asked bookkeeping, and the
//! completion threshold. Every code path either emits exactly one
//! question (incrementing the session counter) or completes; the counter
//! never exceeds [`MAX_FOLLOWUPS`](farm_advisor_core::MAX_FOLLOWUPS).

use farm_advisor_config::{KeywordTable, QuestionSlot, ResponseTemplates};
use farm_advisor_core::{FlowKind, Message, Session, TurnRole};

use crate::extract::ProvidedInfo;

/// Controller verdict for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FollowupAction {
    /// Send this question and wait for the answer.
    Ask { slot: QuestionSlot, question: String },
    /// No further question; generate the final answer this same turn.
    Complete,
}

/// The dialog state machine over `Session::{followup_count,
/// awaiting_followup, flow}`.
pub struct FollowupController<'a> {
    table: &'a KeywordTable,
    templates: &'a ResponseTemplates,
    history_window: usize,
}

impl<'a> FollowupController<'a> {
    pub fn new(table: &'a KeywordTable, templates: &'a ResponseTemplates, history_window: usize) -> Self {
        Self { table, templates, history_window }
    }

    /// Decide the next action.
    ///
    /// `history` is the ordered session history including the
    /// just-persisted current user message; `current` is that message's
    /// text. `kind_hint` selects the schedule when a new flow starts and
    /// is ignored while one is active.
    pub fn next_action(
        &self,
        session: &mut Session,
        history: &[Message],
        current: &str,
        kind_hint: FlowKind,
    ) -> FollowupAction {
        if session.awaiting_followup {
            return self.resume(session, history);
        }

        // A genuinely new flow: reset and anchor at the current message.
        let start_index = history.len().saturating_sub(1);
        session.start_flow(kind_hint, start_index);

        let prior_start = start_index.saturating_sub(self.history_window);
        let prior = ProvidedInfo::extract(&history[prior_start..start_index], self.table);
        let current_info = ProvidedInfo::extract_text(&current.to_lowercase(), self.table);

        // Essential info already present: no questions at all. For a
        // diagnosis the symptom description is already in hand, so the
        // crop name alone suffices, wherever it appeared.
        let sufficient = (prior.crop && prior.stage)
            || (prior.soil && prior.irrigation)
            || (kind_hint == FlowKind::Diagnosis && (prior.crop || current_info.crop));
        if sufficient {
            tracing::debug!(session_id = %session.id, kind = ?kind_hint, "essential info present, skipping follow-ups");
            session.finalize_flow();
            return FollowupAction::Complete;
        }

        // Crop and stage arrived with the opening message: skip the first
        // scheduled question and ask the next missing one.
        if kind_hint == FlowKind::General && current_info.crop && current_info.stage {
            session.skip_first_question();
        }

        self.ask_next(session, history, prior.or(current_info))
    }

    /// An answer to an outstanding question just arrived.
    fn resume(&self, session: &mut Session, history: &[Message]) -> FollowupAction {
        if session.can_finalize() {
            session.finalize_flow();
            return FollowupAction::Complete;
        }

        let window_start = history.len().saturating_sub(self.history_window);
        let known = ProvidedInfo::extract(&history[window_start..], self.table);
        self.ask_next(session, history, known)
    }

    /// Ask the first scheduled question whose information is missing and
    /// whose exact text was not already sent within this flow.
    fn ask_next(
        &self,
        session: &mut Session,
        history: &[Message],
        known: ProvidedInfo,
    ) -> FollowupAction {
        let (kind, flow_start) = session
            .flow
            .map(|f| (f.kind, f.start_index.min(history.len())))
            .unwrap_or((FlowKind::General, 0));

        let schedule = match kind {
            FlowKind::Diagnosis => QuestionSlot::diagnosis_schedule(),
            FlowKind::General => QuestionSlot::full_schedule(),
        };
        let flow_messages = &history[flow_start..];

        for slot in schedule {
            if session.can_finalize() {
                break;
            }
            if slot_provided(*slot, known) {
                continue;
            }
            if self.already_asked(*slot, flow_messages) {
                continue;
            }

            let question = self.templates.question(*slot, session.language).to_string();
            session.record_followup_asked();
            tracing::info!(
                session_id = %session.id,
                slot = ?slot,
                count = session.followup_count,
                "asking follow-up question"
            );
            return FollowupAction::Ask { slot: *slot, question };
        }

        session.finalize_flow();
        FollowupAction::Complete
    }

    /// Idempotence guard: a scheduled question is recognized by exact
    /// text (any language variant) among this flow's assistant turns, so
    /// re-entry never repeats it.
    fn already_asked(&self, slot: QuestionSlot, flow_messages: &[Message]) -> bool {
        flow_messages
            .iter()
            .filter(|m| m.role == TurnRole::Assistant)
            .any(|m| self.templates.question_variants(slot).any(|q| m.content == q))
    }
}

fn slot_provided(slot: QuestionSlot, known: ProvidedInfo) -> bool {
    match slot {
        QuestionSlot::CropStage => known.crop && known.stage,
        QuestionSlot::SoilIrrigation => known.soil && known.irrigation,
        QuestionSlot::FertilizersUsed => known.fertilizer,
        QuestionSlot::CropOnly => known.crop,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_advisor_core::{Language, MAX_FOLLOWUPS};

    fn controller<'a>(templates: &'a ResponseTemplates) -> FollowupController<'a> {
        FollowupController::new(KeywordTable::shared(), templates, 10)
    }

    fn user(text: &str) -> Message {
        Message::user("s1", text)
    }

    fn assistant(text: &str) -> Message {
        Message::assistant("s1", text)
    }

    #[test]
    fn test_diagnosis_with_crop_completes_immediately() {
        // Scenario C: symptom message already names the crop.
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let text = "My paddy leaves are turning yellow";
        let history = vec![user(text)];

        let action = c.next_action(&mut session, &history, text, FlowKind::Diagnosis);
        assert_eq!(action, FollowupAction::Complete);
        assert_eq!(session.followup_count, MAX_FOLLOWUPS);
        assert!(!session.awaiting_followup);
    }

    #[test]
    fn test_diagnosis_without_crop_asks_crop_question() {
        // Scenario D: no crop named.
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let text = "My crop has pests";
        let history = vec![user(text)];

        let action = c.next_action(&mut session, &history, text, FlowKind::Diagnosis);
        match action {
            FollowupAction::Ask { slot, question } => {
                assert_eq!(slot, QuestionSlot::CropOnly);
                assert_eq!(question, templates.question(QuestionSlot::CropOnly, Language::English));
            }
            other => panic!("expected Ask, got {other:?}"),
        }
        assert_eq!(session.followup_count, 1);
        assert!(session.awaiting_followup);
    }

    #[test]
    fn test_crop_question_never_repeated() {
        // Scenario D continued: malformed retry does not re-send the question.
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let mut history = vec![user("My crop has pests")];

        let first = c.next_action(&mut session, &history, "My crop has pests", FlowKind::Diagnosis);
        let question = match first {
            FollowupAction::Ask { question, .. } => question,
            other => panic!("expected Ask, got {other:?}"),
        };
        history.push(assistant(&question));

        // The farmer replies with something that names no crop.
        history.push(user("I am not sure"));
        let second = c.next_action(&mut session, &history, "I am not sure", FlowKind::Diagnosis);
        assert_eq!(second, FollowupAction::Complete);
    }

    #[test]
    fn test_general_flow_walks_full_schedule() {
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let mut history = vec![user("how to improve yield")];

        let a1 = c.next_action(&mut session, &history, "how to improve yield", FlowKind::General);
        let q1 = match a1 {
            FollowupAction::Ask { slot, question } => {
                assert_eq!(slot, QuestionSlot::CropStage);
                question
            }
            other => panic!("expected Ask, got {other:?}"),
        };
        history.push(assistant(&q1));
        assert_eq!(session.followup_count, 1);

        history.push(user("coconut, mid stage"));
        let a2 = c.next_action(&mut session, &history, "coconut, mid stage", FlowKind::General);
        let q2 = match a2 {
            FollowupAction::Ask { slot, question } => {
                assert_eq!(slot, QuestionSlot::SoilIrrigation);
                question
            }
            other => panic!("expected Ask, got {other:?}"),
        };
        history.push(assistant(&q2));
        assert_eq!(session.followup_count, 2);

        history.push(user("red soil with drip"));
        let a3 = c.next_action(&mut session, &history, "red soil with drip", FlowKind::General);
        let q3 = match a3 {
            FollowupAction::Ask { slot, question } => {
                assert_eq!(slot, QuestionSlot::FertilizersUsed);
                question
            }
            other => panic!("expected Ask, got {other:?}"),
        };
        history.push(assistant(&q3));
        assert_eq!(session.followup_count, MAX_FOLLOWUPS);

        history.push(user("urea only"));
        let a4 = c.next_action(&mut session, &history, "urea only", FlowKind::General);
        assert_eq!(a4, FollowupAction::Complete);
        assert!(!session.awaiting_followup);
    }

    #[test]
    fn test_crop_stage_in_opening_message_skips_first_question() {
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let text = "how to improve yield of coconut at mid stage";
        let history = vec![user(text)];

        let action = c.next_action(&mut session, &history, text, FlowKind::General);
        match action {
            FollowupAction::Ask { slot, .. } => assert_eq!(slot, QuestionSlot::SoilIrrigation),
            other => panic!("expected Ask, got {other:?}"),
        }
        // Started at 1 (crop/stage skipped), one ask brings it to 2.
        assert_eq!(session.followup_count, 2);
    }

    #[test]
    fn test_prior_soil_irrigation_sufficient() {
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let history = vec![
            user("my field is black soil with sprinkler irrigation"),
            assistant("Noted."),
            user("now the yield is dropping"),
        ];

        let action = c.next_action(&mut session, &history, "now the yield is dropping", FlowKind::General);
        assert_eq!(action, FollowupAction::Complete);
        assert_eq!(session.followup_count, MAX_FOLLOWUPS);
    }

    #[test]
    fn test_count_bounded_across_reentries() {
        let templates = ResponseTemplates::new();
        let c = controller(&templates);
        let mut session = Session::new("s1", "u1");
        let mut history = vec![user("yield is low")];

        // Answer every question with text that provides nothing; the
        // asked-detection must still drain the schedule.
        for _ in 0..5 {
            let current = history.last().map(|m| m.content.clone()).unwrap_or_default();
            match c.next_action(&mut session, &history, &current, FlowKind::General) {
                FollowupAction::Ask { question, .. } => {
                    history.push(assistant(&question));
                    history.push(user("hmm"));
                }
                FollowupAction::Complete => break,
            }
            assert!(session.followup_count <= MAX_FOLLOWUPS);
        }
        assert!(session.can_finalize());
    }
}
