//! Centralized multilingual keyword table
//!
//! One versioned table, category -> language -> phrases. Every classifier
//! and extractor reads from here; no component carries its own phrase
//! list, so near-duplicate lists cannot drift apart.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use farm_advisor_core::Language;

/// Bumped whenever the phrase sets change.
pub const KEYWORD_TABLE_VERSION: &str = "2026-02";

/// Phrase categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeywordCategory {
    /// Salutations ("hi", "good morning", "నమస్కారం")
    Greeting,
    /// Acknowledgments ("ok", "thanks", "సరే")
    Acknowledgment,
    /// Dosage asks ("dosage", "per acre", "మోతాదు")
    Dosage,
    /// Factual/company asks ("ceo", "how many patents")
    Factual,
    /// Knowledge-seeking asks ("what is", "గురించి")
    Knowledge,
    /// Symptom descriptions ("pest", "wilting", "తెగులు")
    Symptom,
    /// Advisory asks ("yield", "improve")
    Advisory,
    /// Pronoun/confirmation tokens ("its", "that one", "అవును")
    Reference,
    /// Summary/recap asks ("list all", "సారాంశం")
    Summary,
    /// Product names and spelling variants
    Product,
    /// Company/product entities for factual matching
    Entity,
    /// Crop names
    Crop,
    /// Growth-stage markers
    Stage,
    /// Soil markers
    Soil,
    /// Irrigation markers
    Irrigation,
    /// Fertilizer/pesticide usage markers
    Fertilizer,
}

type PhraseSet = Vec<(Language, &'static [&'static str])>;

/// The shared keyword table.
pub struct KeywordTable {
    entries: HashMap<KeywordCategory, PhraseSet>,
}

static SHARED: Lazy<KeywordTable> = Lazy::new(KeywordTable::new);

impl KeywordTable {
    /// The process-wide table.
    pub fn shared() -> &'static KeywordTable {
        &SHARED
    }

    /// Table version
    pub fn version(&self) -> &'static str {
        KEYWORD_TABLE_VERSION
    }

    /// All phrases of a category, across languages.
    pub fn phrases(&self, category: KeywordCategory) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .get(&category)
            .into_iter()
            .flat_map(|sets| sets.iter().flat_map(|(_, phrases)| phrases.iter().copied()))
    }

    /// Phrases of a category for one language.
    pub fn phrases_for(&self, category: KeywordCategory, language: Language) -> &[&'static str] {
        self.entries
            .get(&category)
            .and_then(|sets| sets.iter().find(|(lang, _)| *lang == language))
            .map(|(_, phrases)| *phrases)
            .unwrap_or(&[])
    }

    /// Substring membership of any phrase of the category in the
    /// (caller-lowercased) text.
    pub fn any_phrase_in(&self, category: KeywordCategory, text_lower: &str) -> bool {
        self.phrases(category).any(|phrase| text_lower.contains(phrase))
    }

    fn new() -> Self {
        use KeywordCategory::*;
        use Language::*;

        let mut entries: HashMap<KeywordCategory, PhraseSet> = HashMap::new();

        entries.insert(
            Greeting,
            vec![
                (English, &[
                    "hi", "hii", "hello", "hey", "good morning", "good afternoon",
                    "good evening", "good night", "namaste", "namaskar",
                ]),
                (Telugu, &["నమస్కారం", "హలో", "హాయ్", "శుభోదయం", "శుభ రాత్రి"]),
                (Hindi, &["नमस्ते", "नमस्कार", "हेलो", "शुभ प्रभात", "शुभ रात्रि"]),
            ],
        );

        entries.insert(
            Acknowledgment,
            vec![
                (English, &[
                    "ok", "okay", "noted", "thanks", "thank you", "got it", "sure",
                    "alright", "fine", "cool", "nice", "great", "wonderful",
                    "awesome", "perfect", "understood",
                ]),
                (Telugu, &["సరే", "ఓకే", "థాంక్స్", "థాంక్యూ", "బాగుంది"]),
                (Hindi, &["ठीक है", "धन्यवाद", "शुक्रिया", "अच्छा", "बढ़िया"]),
            ],
        );

        entries.insert(
            Dosage,
            vec![
                (English, &[
                    "dosage", "dose", "how much", "quantity", "per acre",
                    "for acres", "application rate",
                ]),
                (Telugu, &["మోతాదు", "ఎంత వాడాలి"]),
                (Hindi, &["कितना", "मात्रा", "खुराक"]),
            ],
        );

        entries.insert(
            Factual,
            vec![
                (English, &[
                    "who is", "ceo", "founder", "director", "how many",
                    "number of", "count", "patents", "years", "established",
                    "headquarters",
                ]),
                (Telugu, &["పేటెంట్", "ఎన్ని"]),
                (Hindi, &["कितने", "पेटेंट"]),
            ],
        );

        entries.insert(
            Knowledge,
            vec![
                (English, &[
                    "what is", "tell me", "explain", "usage", "how is it used",
                    "how to use", "benefits", "features", "about",
                ]),
                (Telugu, &["గురించి", "చెప్పండి", "ఏమిటి"]),
                (Hindi, &["के बारे में", "बताइए", "क्या है"]),
            ],
        );

        entries.insert(
            Symptom,
            vec![
                (English, &[
                    "problem", "issue", "pest", "pests", "disease", "infection",
                    "insect", "bug", "damaged", "dying", "yellow", "wilting",
                    "spots", "rot", "fungus", "larvae",
                ]),
                (Telugu, &["కీటకం", "సమస్య", "వ్యాధి", "తెగులు", "పురుగు"]),
                (Hindi, &["कीट", "समस्या", "रोग", "बीमारी"]),
            ],
        );

        entries.insert(
            Advisory,
            vec![
                (English, &["yield", "improve", "increase production", "low production"]),
                (Telugu, &["దిగుబడి"]),
                (Hindi, &["पैदावार", "उपज"]),
            ],
        );

        entries.insert(
            Reference,
            vec![
                (English, &[
                    "its", "it", "that one", "this one", "that product",
                    "same one", "yes", "no",
                ]),
                (Telugu, &["అవును", "కాదు", "దాని", "అదే"]),
                (Hindi, &["हां", "नहीं", "उसका", "वही", "हाँ"]),
            ],
        );

        entries.insert(
            Summary,
            vec![
                (English, &[
                    "summary", "summarize", "summarise", "recap", "list all",
                    "list the", "all dosages", "discussed so far", "we discussed",
                ]),
                (Telugu, &["సారాంశం", "మొత్తం చెప్పండి"]),
                (Hindi, &["सारांश", "सूची"]),
            ],
        );

        entries.insert(
            Product,
            vec![
                (English, &[
                    "aadhaar gold", "aadhaar", "aadhar", "poshak", "invictus",
                    "zn-factor", "znfactor", "zn factor", "p-factor", "pfactor",
                    "p factor", "k-factor", "kfactor", "k factor", "biofactor",
                    "farmvaidya", "bio double action", "biodoubleaction",
                ]),
                (Telugu, &["పోషక్", "ఇన్విక్టస్", "బయోఫ్యాక్టర్", "ఫార్మ్ వైద్య"]),
                (Hindi, &["फार्मवैद्य", "बायो डबल एक्शन"]),
            ],
        );

        entries.insert(
            Entity,
            vec![
                (English, &["biofactor", "farmvaidya", "aadhaar", "poshak", "invictus"]),
                (Telugu, &["బయోఫ్యాక్టర్"]),
                (Hindi, &["फार्मवैद्य"]),
            ],
        );

        entries.insert(
            Crop,
            vec![
                (English, &[
                    "paddy", "rice", "coconut", "cotton", "chilli", "chili",
                    "maize", "wheat", "banana", "mango", "groundnut",
                    "sugarcane", "tomato", "brinjal", "turmeric",
                ]),
                (Telugu, &["వరి", "కొబ్బరి", "పత్తి", "మిర్చి", "మామిడి", "అరటి", "చెరకు", "టమాటా"]),
                (Hindi, &["धान", "गेहूं", "कपास", "मिर्च", "नारियल", "केला", "आम", "गन्ना", "टमाटर", "मक्का"]),
            ],
        );

        entries.insert(
            Stage,
            vec![
                (English, &[
                    "stage", "early", "mid", "near harvest", "flowering",
                    "vegetative", "seedling", "nursery", "transplant", "sowing",
                    "months old", "years old", "days old",
                ]),
                (Telugu, &["దశ", "పూత", "కోత"]),
                (Hindi, &["अवस्था", "फूल", "बुवाई", "रोपाई", "कटाई"]),
            ],
        );

        entries.insert(
            Soil,
            vec![
                (English, &[
                    "soil", "red soil", "black soil", "loam", "loamy", "sandy", "clay",
                ]),
                (Telugu, &["నేల", "మట్టి", "ఎర్ర నేల", "నల్ల నేల"]),
                (Hindi, &["मिट्टी", "दोमट", "लाल मिट्टी", "काली मिट्टी"]),
            ],
        );

        entries.insert(
            Irrigation,
            vec![
                (English, &[
                    "irrigation", "drip", "sprinkler", "flood", "canal",
                    "borewell", "rainfed", "watering",
                ]),
                (Telugu, &["నీటిపారుదల", "డ్రిప్", "తుంపర"]),
                (Hindi, &["सिंचाई", "ड्रिप", "स्प्रिंकलर", "बाढ़"]),
            ],
        );

        entries.insert(
            Fertilizer,
            vec![
                (English, &[
                    "fertilizer", "fertiliser", "urea", "dap", "mop", "ssp",
                    "fym", "compost", "manure", "pesticide", "fungicide",
                    "sprayed", "npk",
                ]),
                (Telugu, &["ఎరువు", "ఎరువులు", "పురుగుమందు", "పేడ"]),
                (Hindi, &["उर्वरक", "खाद", "कीटनाशक", "यूरिया"]),
            ],
        );

        Self { entries }
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        Self::new()
    }
}

/// One product: display name plus every spelling variant (lowercase or
/// native script) that may appear in messages.
pub struct ProductEntry {
    pub display: &'static str,
    pub variants: &'static [&'static str],
}

/// The product catalog the summary compiler and classifiers agree on.
pub fn products() -> &'static [ProductEntry] {
    &[
        ProductEntry { display: "Aadhaar Gold", variants: &["aadhaar gold", "aadhaar", "aadhar"] },
        ProductEntry { display: "Poshak", variants: &["poshak", "పోషక్"] },
        ProductEntry { display: "Invictus", variants: &["invictus", "ఇన్విక్టస్"] },
        ProductEntry { display: "Zn-Factor", variants: &["zn-factor", "znfactor", "zn factor"] },
        ProductEntry { display: "P-Factor", variants: &["p-factor", "pfactor", "p factor"] },
        ProductEntry { display: "K-Factor", variants: &["k-factor", "kfactor", "k factor"] },
        ProductEntry { display: "Biofactor", variants: &["biofactor", "బయోఫ్యాక్టర్"] },
        ProductEntry {
            display: "Bio Double Action",
            variants: &["bio double action", "biodoubleaction", "बायो डबल एक्शन"],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_categories_populated() {
        let table = KeywordTable::shared();
        for category in [
            KeywordCategory::Greeting,
            KeywordCategory::Acknowledgment,
            KeywordCategory::Dosage,
            KeywordCategory::Factual,
            KeywordCategory::Knowledge,
            KeywordCategory::Symptom,
            KeywordCategory::Advisory,
            KeywordCategory::Reference,
            KeywordCategory::Summary,
            KeywordCategory::Product,
            KeywordCategory::Entity,
            KeywordCategory::Crop,
            KeywordCategory::Stage,
            KeywordCategory::Soil,
            KeywordCategory::Irrigation,
            KeywordCategory::Fertilizer,
        ] {
            assert!(table.phrases(category).next().is_some(), "{category:?} is empty");
        }
    }

    #[test]
    fn test_multilingual_membership() {
        let table = KeywordTable::shared();
        assert!(table.any_phrase_in(KeywordCategory::Dosage, "what is the dosage"));
        assert!(table.any_phrase_in(KeywordCategory::Dosage, "పోషక్ మోతాదు ఎంత"));
        assert!(table.any_phrase_in(KeywordCategory::Symptom, "मेरी फसल में कीट लग गए"));
        assert!(!table.any_phrase_in(KeywordCategory::Dosage, "hello there"));
    }

    #[test]
    fn test_phrases_for_language() {
        let table = KeywordTable::shared();
        let telugu = table.phrases_for(KeywordCategory::Greeting, Language::Telugu);
        assert!(telugu.contains(&"నమస్కారం"));
        // Languages without entries fall back to an empty slice.
        assert!(table.phrases_for(KeywordCategory::Greeting, Language::Tamil).is_empty());
    }
}
