//! Translation trait

use async_trait::async_trait;

use crate::language::Language;
use crate::Result;

/// Machine translation interface.
///
/// Implementations:
/// - `HttpTranslator` - remote translation service
/// - `NoopTranslator` - pass-through when translation is disabled
///
/// Callers must degrade gracefully: a failed translation means the
/// original text is used, never a failed turn.
#[async_trait]
pub trait Translator: Send + Sync + 'static {
    /// Translate text.
    ///
    /// # Arguments
    /// * `text` - Text to translate
    /// * `from` - Source language, or `None` to auto-detect
    /// * `to` - Target language
    async fn translate(&self, text: &str, from: Option<Language>, to: Language) -> Result<String>;

    /// Translator name for logging
    fn name(&self) -> &str;
}
