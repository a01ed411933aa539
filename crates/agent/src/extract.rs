//! Provided-information extraction
//!
//! Scans user-authored turns for whether crop, growth-stage, soil,
//! irrigation, and fertilizer-usage information has already been
//! volunteered. Recomputed from the source-of-truth history on every
//! decision; never cached.

use farm_advisor_config::{KeywordCategory, KeywordTable};
use farm_advisor_core::{Message, TurnRole};

/// Which of the five information categories the farmer has volunteered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProvidedInfo {
    pub crop: bool,
    pub stage: bool,
    pub soil: bool,
    pub irrigation: bool,
    pub fertilizer: bool,
}

impl ProvidedInfo {
    /// Extract from the user turns of a history window. Assistant turns
    /// are ignored so our own questions never count as answers.
    pub fn extract(messages: &[Message], table: &KeywordTable) -> Self {
        let blob: String = messages
            .iter()
            .filter(|m| m.role == TurnRole::User)
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        Self::extract_text(&blob, table)
    }

    /// Extract from one already-concatenated lowercase text.
    pub fn extract_text(text_lower: &str, table: &KeywordTable) -> Self {
        Self {
            crop: table.any_phrase_in(KeywordCategory::Crop, text_lower),
            stage: table.any_phrase_in(KeywordCategory::Stage, text_lower),
            soil: table.any_phrase_in(KeywordCategory::Soil, text_lower),
            irrigation: table.any_phrase_in(KeywordCategory::Irrigation, text_lower),
            fertilizer: table.any_phrase_in(KeywordCategory::Fertilizer, text_lower),
        }
    }

    /// Union of two snapshots.
    pub fn or(self, other: Self) -> Self {
        Self {
            crop: self.crop || other.crop,
            stage: self.stage || other.stage,
            soil: self.soil || other.soil,
            irrigation: self.irrigation || other.irrigation,
            fertilizer: self.fertilizer || other.fertilizer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static KeywordTable {
        KeywordTable::shared()
    }

    #[test]
    fn test_extract_from_text() {
        let info = ProvidedInfo::extract_text("i grow paddy at flowering stage", table());
        assert!(info.crop);
        assert!(info.stage);
        assert!(!info.soil);
        assert!(!info.irrigation);
        assert!(!info.fertilizer);
    }

    #[test]
    fn test_extract_multilingual() {
        let info = ProvidedInfo::extract_text("నా కొబ్బరి తోటకు డ్రిప్ ఉంది", table());
        assert!(info.crop);
        assert!(info.irrigation);

        let info = ProvidedInfo::extract_text("काली मिट्टी में धान, यूरिया डाला", table());
        assert!(info.crop);
        assert!(info.soil);
        assert!(info.fertilizer);
    }

    #[test]
    fn test_assistant_turns_ignored() {
        let messages = vec![
            Message::assistant("s1", "Which crop are you growing, paddy or cotton?"),
            Message::user("s1", "red soil"),
        ];
        let info = ProvidedInfo::extract(&messages, table());
        assert!(!info.crop);
        assert!(info.soil);
    }

    #[test]
    fn test_categories_independent() {
        let info = ProvidedInfo::extract_text("drip irrigation only", table());
        assert!(info.irrigation);
        assert!(!info.crop && !info.stage && !info.soil && !info.fertilizer);
    }

    #[test]
    fn test_union() {
        let a = ProvidedInfo { crop: true, ..Default::default() };
        let b = ProvidedInfo { stage: true, ..Default::default() };
        let u = a.or(b);
        assert!(u.crop && u.stage && !u.soil);
    }

    #[test]
    fn test_empty_history() {
        assert_eq!(ProvidedInfo::extract(&[], table()), ProvidedInfo::default());
    }
}
