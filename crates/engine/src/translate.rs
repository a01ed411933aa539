//! Translation service client

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use farm_advisor_config::TranslateConfig;
use farm_advisor_core::{Language, Result, Translator};

use crate::EngineError;

/// HTTP client for a REST translation service.
#[derive(Clone)]
pub struct HttpTranslator {
    client: Client,
    config: TranslateConfig,
}

#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    text: &'a str,
    /// Source language code, or "auto"
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    translated: String,
}

impl HttpTranslator {
    pub fn new(config: TranslateConfig) -> std::result::Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, from: Option<Language>, to: Language) -> Result<String> {
        let source = from.map(|l| l.code()).unwrap_or("auto");
        let request = WireRequest { text, source, target: to.code() };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(EngineError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(EngineError::Network(format!("translator returned {status}")).into());
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        if wire.translated.is_empty() {
            // An empty translation is worse than the original text.
            return Err(EngineError::InvalidResponse("empty translation".to_string()).into());
        }

        Ok(wire.translated)
    }

    fn name(&self) -> &str {
        "http-translator"
    }
}

/// Pass-through translator used when translation is disabled.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTranslator;

#[async_trait]
impl Translator for NoopTranslator {
    async fn translate(&self, text: &str, _from: Option<Language>, _to: Language) -> Result<String> {
        Ok(text.to_string())
    }

    fn name(&self) -> &str {
        "noop-translator"
    }
}
