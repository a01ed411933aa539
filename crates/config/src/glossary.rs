//! Agricultural domain-term glossary
//!
//! A static Telugu <-> English lookup table applied as a touch-up before
//! queries go to the knowledge engine and after answers come back from
//! translation. Colloquial Telugu variants map to one canonical English
//! term; the canonical term maps back to one standard Telugu form.
//! Replacement is longest-match-first to avoid clobbering inside longer
//! phrases.

use farm_advisor_core::Language;

/// One glossary entry: a canonical English term and its Telugu forms, the
/// first being the standard one used for back-translation.
struct Entry {
    english: &'static str,
    telugu: &'static [&'static str],
}

const ENTRIES: &[Entry] = &[
    Entry { english: "Poshak", telugu: &["పోషక్"] },
    Entry { english: "Invictus", telugu: &["ఇన్విక్టస్"] },
    Entry { english: "Rhinoceros Beetle", telugu: &["కొమ్ము పురుగు", "పేడ పురుగు", "ఖడ్గ మృగపురుగు"] },
    Entry { english: "Red Palm Weevil", telugu: &["ఎర్రముక్కు పురుగు"] },
    Entry { english: "Black-headed Caterpillar", telugu: &["నల్ల మొట్టే పురుగు", "నల్ల గొంగళి పురుగు"] },
    Entry { english: "Eriophyid Mite", telugu: &["ఎర్ర నల్లి"] },
    Entry { english: "Spiraling Whitefly", telugu: &["సర్పిలాకార తెల్ల దోమ", "స్పైర్లింగ్ తెల్ల దోమ"] },
    Entry { english: "Stem Bleeding Disease", telugu: &["నల్ల మచ్చ తెగులు"] },
    Entry { english: "Bud Rot Disease", telugu: &["మువ్వ కుళ్ళు తెగులు", "మొవ్వకుళ్ళు"] },
    Entry { english: "Leaf Blight", telugu: &["ఆకు ఎండు తెగులు"] },
    Entry { english: "Button Shedding", telugu: &["పిందె రాలడం"] },
    Entry { english: "Ganoderma", telugu: &["సిగ తెగులు", "ఎర్ర లెక్క తెగులు", "కాండం తెగులు"] },
    Entry { english: "Fertilisers", telugu: &["ఎరువులు"] },
    Entry { english: "FYM", telugu: &["సేంద్రీయ ఎరువు", "గేత్తం", "పశువుల పెంట"] },
    Entry { english: "Green manure", telugu: &["పచ్చిరొట్ట ఎరువులు"] },
    Entry { english: "Fungus", telugu: &["శిలీంద్రం"] },
    Entry { english: "Coconut palm", telugu: &["కొబ్బరి చెట్టు"] },
    Entry { english: "Barren nuts", telugu: &["తట్టు కాయలు", "డొల్ల కాయలు", "నీళ్ళు లేని కాయలు"] },
    Entry { english: "Disease", telugu: &["తెగులు"] },
    Entry { english: "Diseases", telugu: &["తెగుళ్లు"] },
    Entry { english: "Granules", telugu: &["గుళికలు"] },
    Entry { english: "Spindle", telugu: &["మొవ్వ", "అంకురం"] },
    Entry { english: "Rainfed", telugu: &["వర్షాదారిత"] },
];

/// Static glossary over the entries above.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomainGlossary;

impl DomainGlossary {
    pub fn new() -> Self {
        Self
    }

    /// Replace native domain terms with their canonical English forms so
    /// the knowledge engine matches its indexed vocabulary. Colloquial
    /// variants normalize through the same pass.
    pub fn to_english(&self, text: &str) -> String {
        let mut out = text.to_string();
        let mut pairs: Vec<(&str, &str)> = ENTRIES
            .iter()
            .flat_map(|e| e.telugu.iter().map(move |t| (*t, e.english)))
            .collect();
        pairs.sort_by_key(|(from, _)| std::cmp::Reverse(from.len()));
        for (from, to) in pairs {
            if out.contains(from) {
                out = out.replace(from, to);
            }
        }
        out
    }

    /// Replace canonical English terms with the standard native form.
    /// Only applies for Telugu conversations; other languages pass
    /// through untouched.
    pub fn to_native(&self, text: &str, language: Language) -> String {
        if language != Language::Telugu {
            return text.to_string();
        }
        let mut out = text.to_string();
        let mut pairs: Vec<(&str, &str)> =
            ENTRIES.iter().map(|e| (e.english, e.telugu[0])).collect();
        pairs.sort_by_key(|(from, _)| std::cmp::Reverse(from.len()));
        for (from, to) in pairs {
            if out.contains(from) {
                out = out.replace(from, to);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_english_canonicalizes() {
        let glossary = DomainGlossary::new();
        let out = glossary.to_english("కొబ్బరి చెట్టు మీద కొమ్ము పురుగు కనిపించింది");
        assert!(out.contains("Coconut palm"));
        assert!(out.contains("Rhinoceros Beetle"));
    }

    #[test]
    fn test_colloquial_variant_normalizes() {
        let glossary = DomainGlossary::new();
        // A colloquial name for the same pest maps to the same English term.
        assert!(glossary.to_english("పేడ పురుగు").contains("Rhinoceros Beetle"));
    }

    #[test]
    fn test_to_native_only_for_telugu() {
        let glossary = DomainGlossary::new();
        let text = "Spray for Rhinoceros Beetle near the Spindle";
        let te = glossary.to_native(text, Language::Telugu);
        assert!(te.contains("కొమ్ము పురుగు"));
        assert!(te.contains("మొవ్వ"));

        assert_eq!(glossary.to_native(text, Language::Hindi), text);
        assert_eq!(glossary.to_native(text, Language::English), text);
    }

    #[test]
    fn test_longest_match_first() {
        let glossary = DomainGlossary::new();
        // "Diseases" must not be split by the shorter "Disease" entry.
        let out = glossary.to_native("Diseases", Language::Telugu);
        assert_eq!(out, "తెగుళ్లు");
    }
}
