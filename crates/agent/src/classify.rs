//! Lexical intent classifiers
//!
//! Independent boolean predicates over the raw utterance, all reading
//! from the shared keyword table. None of them ever fails: absence of a
//! keyword yields `false`, and empty input yields `false` for every
//! predicate. Branch selection is a declared priority array evaluated
//! first-match-wins, kept separate from the handler bodies so ordering is
//! testable on its own.

use unicode_segmentation::UnicodeSegmentation;

use farm_advisor_config::{KeywordCategory, KeywordTable};
use farm_advisor_core::FlowKind;

/// The booleans produced for one utterance. Ephemeral; consumed by branch
/// selection and never persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub greeting: bool,
    pub factual: bool,
    pub knowledge: bool,
    pub dosage: bool,
    pub diagnosis: bool,
    pub followup_reference: bool,
    pub summary: bool,
}

/// Response branches, in no particular order; priority lives in
/// [`select_branch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    Greeting,
    Factual,
    Dosage,
    Knowledge,
    Summary,
    Diagnosis,
    Default,
}

/// Declared branch priority. Summary outranks dosage because a recap ask
/// ("list all dosages discussed") necessarily contains dosage vocabulary;
/// dosage outranks direct knowledge so an explicit dosage keyword wins
/// even when knowledge phrasing ("what is the dosage of X") is present.
const PRIORITY: &[(Branch, fn(&Classification) -> bool)] = &[
    (Branch::Greeting, |c| c.greeting),
    (Branch::Factual, |c| c.factual),
    (Branch::Summary, |c| c.summary),
    (Branch::Dosage, |c| c.dosage),
    (Branch::Knowledge, |c| c.knowledge),
    (Branch::Diagnosis, |c| c.diagnosis),
];

/// Evaluate every classifier once.
pub fn classify(text: &str, table: &KeywordTable) -> Classification {
    Classification {
        greeting: is_greeting_or_ack(text, table),
        factual: is_factual_company(text, table),
        knowledge: is_direct_knowledge(text, table),
        dosage: is_dosage(text, table),
        diagnosis: is_problem_diagnosis(text, table),
        followup_reference: is_followup_reference(text, table),
        summary: is_summary_request(text, table),
    }
}

/// First matching branch wins; an active diagnostic flow claims the turn
/// when no single-shot classifier fired.
pub fn select_branch(classification: &Classification, flow_active: bool) -> Branch {
    for (branch, predicate) in PRIORITY {
        if predicate(classification) {
            return *branch;
        }
    }
    if flow_active {
        Branch::Diagnosis
    } else {
        Branch::Default
    }
}

/// Which question schedule a problem message selects: symptom wording
/// runs the reduced diagnosis schedule, advisory wording (yield,
/// improvement) the full one.
pub fn flow_kind(text: &str, table: &KeywordTable) -> FlowKind {
    if contains_any(text, table, KeywordCategory::Symptom) {
        FlowKind::Diagnosis
    } else {
        FlowKind::General
    }
}

/// Greeting or acknowledgment: short message that IS a greeting phrase
/// (single-word patterns must match the whole message; multi-word
/// patterns may be contained), with no domain vocabulary present.
pub fn is_greeting_or_ack(text: &str, table: &KeywordTable) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || word_count(trimmed) > 6 {
        return false;
    }

    // A message that names a product, dosage, or symptom is never a plain
    // greeting, however short.
    if contains_any(trimmed, table, KeywordCategory::Product)
        || contains_any(trimmed, table, KeywordCategory::Dosage)
        || contains_any(trimmed, table, KeywordCategory::Symptom)
    {
        return false;
    }

    let lower = trimmed.to_lowercase();
    let bare = lower.trim_matches(|c: char| c.is_ascii_punctuation() || c.is_whitespace());

    table
        .phrases(KeywordCategory::Greeting)
        .chain(table.phrases(KeywordCategory::Acknowledgment))
        .any(|phrase| {
            if phrase.split_whitespace().count() > 1 {
                lower.contains(phrase)
            } else {
                bare == phrase
            }
        })
}

/// Factual/company question: a factual keyword AND an entity name, both
/// matched after stripping spaces and hyphens and lowercasing.
pub fn is_factual_company(text: &str, table: &KeywordTable) -> bool {
    let norm = normalize(text);
    if norm.is_empty() {
        return false;
    }

    let keyword = table
        .phrases(KeywordCategory::Factual)
        .any(|k| norm.contains(&normalize(k)));
    let entity = table
        .phrases(KeywordCategory::Entity)
        .any(|e| norm.contains(&normalize(e)));

    keyword && entity
}

/// Direct product-knowledge question: a knowledge-seeking keyword AND a
/// product name, checked against both the original and lowercased text so
/// non-Latin script matches are preserved.
pub fn is_direct_knowledge(text: &str, table: &KeywordTable) -> bool {
    let lower = text.to_lowercase();
    let keyword = table
        .phrases(KeywordCategory::Knowledge)
        .any(|k| text.contains(k) || lower.contains(k));
    let product = table
        .phrases(KeywordCategory::Product)
        .any(|p| text.contains(p) || lower.contains(p));

    keyword && product
}

/// Dosage question: an explicit dosage keyword always wins; a bare short
/// product mention counts too, unless knowledge phrasing claims it and
/// the message is not a follow-up reference.
pub fn is_dosage(text: &str, table: &KeywordTable) -> bool {
    let lower = text.to_lowercase();
    let dosage_keyword = table
        .phrases(KeywordCategory::Dosage)
        .any(|k| text.contains(k) || lower.contains(k));
    if dosage_keyword {
        return true;
    }

    let product = table
        .phrases(KeywordCategory::Product)
        .any(|p| text.contains(p) || lower.contains(p));
    if !product || word_count(text) > 4 {
        return false;
    }

    let knowledge_keyword = table
        .phrases(KeywordCategory::Knowledge)
        .any(|k| text.contains(k) || lower.contains(k));

    !knowledge_keyword || is_followup_reference(text, table)
}

/// Problem-diagnosis question: any symptom or advisory keyword. Broader
/// than the other classifiers on purpose; no entity requirement.
pub fn is_problem_diagnosis(text: &str, table: &KeywordTable) -> bool {
    contains_any(text, table, KeywordCategory::Symptom)
        || contains_any(text, table, KeywordCategory::Advisory)
}

/// Follow-up reference: a short message carrying an explicit pronoun or
/// confirmation token, implying the subject was established earlier.
pub fn is_followup_reference(text: &str, table: &KeywordTable) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() || word_count(trimmed) > 7 {
        return false;
    }

    let lower = trimmed.to_lowercase();
    let word_set: Vec<&str> = lower.unicode_words().collect();

    table.phrases(KeywordCategory::Reference).any(|token| {
        if token.split_whitespace().count() > 1 {
            lower.contains(token)
        } else {
            word_set.contains(&token)
        }
    })
}

/// Summary/list request: any recap keyword anywhere in the text.
pub fn is_summary_request(text: &str, table: &KeywordTable) -> bool {
    contains_any(text, table, KeywordCategory::Summary)
}

fn contains_any(text: &str, table: &KeywordTable, category: KeywordCategory) -> bool {
    let lower = text.to_lowercase();
    table
        .phrases(category)
        .any(|phrase| text.contains(phrase) || lower.contains(phrase))
}

fn normalize(text: &str) -> String {
    text.to_lowercase().replace([' ', '-'], "")
}

fn word_count(text: &str) -> usize {
    text.unicode_words().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> &'static KeywordTable {
        KeywordTable::shared()
    }

    #[test]
    fn test_greeting_exact_single_word() {
        assert!(is_greeting_or_ack("hi", table()));
        assert!(is_greeting_or_ack("Hi!", table()));
        assert!(is_greeting_or_ack("thanks", table()));
        assert!(is_greeting_or_ack("నమస్కారం", table()));
        // Single-word patterns must equal the whole message.
        assert!(!is_greeting_or_ack("hi how do I treat pests", table()));
    }

    #[test]
    fn test_greeting_multiword_contained() {
        assert!(is_greeting_or_ack("good morning", table()));
        assert!(is_greeting_or_ack("good morning sir", table()));
        assert!(is_greeting_or_ack("ok thank you so much", table()));
    }

    #[test]
    fn test_greeting_blocked_by_domain_keyword() {
        // A dosage question mentioning a product is not an acknowledgment.
        assert!(!is_greeting_or_ack("ok k factor dosage", table()));
        assert!(!is_greeting_or_ack("thanks, and poshak?", table()));
    }

    #[test]
    fn test_greeting_word_limit() {
        assert!(!is_greeting_or_ack("good morning I would like to know about seven words", table()));
    }

    #[test]
    fn test_factual_needs_both_keyword_and_entity() {
        assert!(is_factual_company("How many patents does Biofactor have?", table()));
        assert!(is_factual_company("Who is the CEO of FarmVaidya", table()));
        // Normalization: hyphen/space-insensitive entity match.
        assert!(is_factual_company("how many patents does farm vaidya hold", table()));
        assert!(!is_factual_company("How many patents exist in India?", table()));
        assert!(!is_factual_company("Tell me about Biofactor", table()));
    }

    #[test]
    fn test_direct_knowledge() {
        assert!(is_direct_knowledge("What is Poshak?", table()));
        assert!(is_direct_knowledge("tell me the benefits of Invictus", table()));
        assert!(is_direct_knowledge("పోషక్ గురించి చెప్పండి", table()));
        assert!(!is_direct_knowledge("What is photosynthesis?", table()));
        assert!(!is_direct_knowledge("Poshak", table()));
    }

    #[test]
    fn test_dosage_explicit_keyword_wins() {
        // Scenario B: dosage keyword present, knowledge phrasing too.
        assert!(is_dosage("What is the dosage of P-Factor?", table()));
        assert!(is_dosage("how much poshak per acre", table()));
        assert!(is_dosage("పోషక్ మోతాదు", table()));
    }

    #[test]
    fn test_dosage_short_product_mention() {
        assert!(is_dosage("Invictus?", table()));
        assert!(is_dosage("Poshak for paddy", table()));
        // Knowledge phrasing claims the short mention instead...
        assert!(!is_dosage("about Invictus", table()));
        // ...unless it reads as a follow-up reference.
        assert!(is_dosage("its p-factor usage?", table()));
        // Long product mentions are not dosage asks.
        assert!(!is_dosage("I bought Invictus from the store last week", table()));
    }

    #[test]
    fn test_problem_diagnosis() {
        assert!(is_problem_diagnosis("My paddy leaves are turning yellow", table()));
        assert!(is_problem_diagnosis("how to improve coconut yield", table()));
        assert!(is_problem_diagnosis("मेरी फसल में कीट लग गए हैं", table()));
        assert!(!is_problem_diagnosis("What is Poshak?", table()));
    }

    #[test]
    fn test_flow_kind_split() {
        assert_eq!(flow_kind("My paddy has pests", table()), FlowKind::Diagnosis);
        assert_eq!(flow_kind("how to improve coconut yield", table()), FlowKind::General);
        // Symptom wording wins over advisory wording.
        assert_eq!(flow_kind("yield loss from pest attack", table()), FlowKind::Diagnosis);
    }

    #[test]
    fn test_followup_reference() {
        assert!(is_followup_reference("what is its dosage", table()));
        assert!(is_followup_reference("yes", table()));
        assert!(is_followup_reference("that one please", table()));
        assert!(!is_followup_reference("tell me about fruit spots", table()));
        // Too long to be a back-reference.
        assert!(!is_followup_reference("yes I would like to know everything about this product today", table()));
    }

    #[test]
    fn test_summary_request() {
        assert!(is_summary_request("list all dosages discussed", table()));
        assert!(is_summary_request("give me a recap", table()));
        assert!(!is_summary_request("what is the dosage", table()));
    }

    #[test]
    fn test_empty_input_all_false() {
        for text in ["", "   ", "\n"] {
            let c = classify(text, table());
            assert_eq!(c, Classification::default(), "input {text:?}");
        }
    }

    #[test]
    fn test_branch_priority() {
        let c = Classification { greeting: true, dosage: true, ..Default::default() };
        assert_eq!(select_branch(&c, false), Branch::Greeting);

        let c = Classification { dosage: true, knowledge: true, ..Default::default() };
        assert_eq!(select_branch(&c, false), Branch::Dosage);

        let c = Classification { summary: true, dosage: true, ..Default::default() };
        assert_eq!(select_branch(&c, false), Branch::Summary);

        let c = Classification { knowledge: true, diagnosis: true, ..Default::default() };
        assert_eq!(select_branch(&c, false), Branch::Knowledge);

        let c = Classification::default();
        assert_eq!(select_branch(&c, false), Branch::Default);
        assert_eq!(select_branch(&c, true), Branch::Diagnosis);
    }

    #[test]
    fn test_scenario_b_routes_to_dosage() {
        let c = classify("What is the dosage of P-Factor?", table());
        assert!(c.dosage);
        assert_eq!(select_branch(&c, false), Branch::Dosage);
    }

    #[test]
    fn test_what_is_product_routes_to_knowledge() {
        let c = classify("What is P-Factor?", table());
        assert!(!c.dosage);
        assert!(c.knowledge);
        assert_eq!(select_branch(&c, false), Branch::Knowledge);
    }
}
