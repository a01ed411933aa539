//! Response post-processing
//!
//! Strips citation artifacts and reference sections from retrieved
//! answers. Pure and total: input without any of the patterns comes back
//! unchanged, and cleaning is idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static CITATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\d+\]").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Localized "references" headers; a line containing one of these (and
/// everything that looks like a citation list) is dropped.
const REFERENCE_HEADERS: &[&str] = &[
    "references",
    "reference",
    "సూచనలు",
    "संदर्भ",
    "सन्दर्भ",
    "குறிப்புகள்",
    "ಉಲ್ಲೇಖಗಳು",
    "റഫറൻസുകൾ",
];

/// Clean a retrieved answer.
pub fn clean(text: &str) -> String {
    let mut cleaned_lines: Vec<String> = Vec::new();

    for line in text.lines() {
        let lower = line.to_lowercase();

        if REFERENCE_HEADERS.iter().any(|header| lower.contains(header)) {
            continue;
        }

        // Source-document names leak through retrieval; drop those lines.
        if lower.contains(".pdf") || line.contains("पीडीएफ") {
            continue;
        }

        let line = CITATION.replace_all(line, "");
        // Markdown emphasis: double markers first, then stray singles.
        let line = line.replace("**", "").replace("__", "").replace('*', "");

        cleaned_lines.push(line);
    }

    let joined = cleaned_lines.join("\n");
    BLANK_RUN.replace_all(&joined, "\n\n").trim().to_string()
}
