//! Dosage recap compilation
//!
//! Compiles a bulleted summary of dosages already given in this
//! conversation by pattern-matching assistant turns: a number and unit
//! adjacent to a recognized product name. Only products the farmer asked
//! about are included, and the knowledge engine is not involved at all.

use once_cell::sync::Lazy;
use regex::Regex;

use farm_advisor_config::{keywords::products, ResponseTemplates};
use farm_advisor_core::{Language, Message, TurnRole};

/// Units recognized next to a dosage figure, longest spelling first.
const UNITS: &str = "liters|litres|liter|litre|milliliters|kilograms|grams|gram|kgs|kg|ml|l|g";

static NEAR_FIGURE: Lazy<String> =
    Lazy::new(|| format!(r"[^\n]{{0,40}}?(\d+(?:\.\d+)?)\s*({UNITS})\b"));

/// Build the recap, or `None` when nothing can be extracted (the caller
/// then falls back to a context-aware engine query).
pub fn extract_dosage_recap(
    history: &[Message],
    templates: &ResponseTemplates,
    language: Language,
) -> Option<String> {
    let user_blob: String = history
        .iter()
        .filter(|m| m.role == TurnRole::User)
        .map(|m| m.content.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    let mut lines: Vec<String> = Vec::new();

    for product in products() {
        let asked = product.variants.iter().any(|v| user_blob.contains(v));
        if !asked {
            continue;
        }

        if let Some(figure) = find_figure(history, product.variants) {
            lines.push(format!("• {}: {}", product.display, figure));
        }
    }

    if lines.is_empty() {
        return None;
    }

    Some(format!("{}\n{}", templates.summary_header(language), lines.join("\n")))
}

/// First dosage figure adjacent to any variant of the product in the
/// assistant turns.
fn find_figure(history: &[Message], variants: &[&str]) -> Option<String> {
    for variant in variants {
        let pattern = format!(r"(?i){}{}", regex::escape(variant), NEAR_FIGURE.as_str());
        let re = match Regex::new(&pattern) {
            Ok(re) => re,
            Err(_) => continue,
        };

        for message in history.iter().filter(|m| m.role == TurnRole::Assistant) {
            if let Some(captures) = re.captures(&message.content) {
                let amount = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
                let unit = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
                return Some(format!("{amount} {unit}"));
            }
        }
    }
    None
}
