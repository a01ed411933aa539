//! Remote knowledge engine client
//!
//! Single request/response call over HTTP with a bounded timeout. The
//! wire shape is the engine's query endpoint: query text, mode,
//! conversation history, and the requested response shape; the reply
//! carries one freeform text field, possibly containing the no-context
//! sentinel.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use farm_advisor_config::EngineConfig;
use farm_advisor_core::{EngineAnswer, EngineRequest, HistoryTurn, KnowledgeEngine, Result};

use crate::EngineError;

/// Response shape requested from the engine for chat answers.
const RESPONSE_SHAPE: &str = "Multiple Paragraphs";

/// HTTP client for the knowledge engine.
#[derive(Clone)]
pub struct HttpKnowledgeEngine {
    client: Client,
    config: EngineConfig,
}

/// Wire request
#[derive(Debug, Serialize)]
struct WireRequest<'a> {
    query: &'a str,
    mode: &'a str,
    conversation_history: &'a [HistoryTurn],
    response_type: &'a str,
}

/// Wire response
#[derive(Debug, Deserialize)]
struct WireResponse {
    #[serde(default)]
    response: String,
}

impl HttpKnowledgeEngine {
    pub fn new(config: EngineConfig) -> std::result::Result<Self, EngineError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EngineError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn wire_request<'a>(request: &'a EngineRequest) -> WireRequest<'a> {
        WireRequest {
            query: &request.query,
            mode: request.mode.as_str(),
            conversation_history: &request.history,
            response_type: RESPONSE_SHAPE,
        }
    }
}

#[async_trait]
impl KnowledgeEngine for HttpKnowledgeEngine {
    async fn query(&self, request: &EngineRequest) -> Result<EngineAnswer> {
        let started = std::time::Instant::now();

        let response = self
            .client
            .post(&self.config.url)
            .json(&Self::wire_request(request))
            .send()
            .await
            .map_err(EngineError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Network(format!("engine returned {status}: {body}")).into());
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| EngineError::InvalidResponse(e.to_string()))?;

        tracing::debug!(
            mode = request.mode.as_str(),
            history_len = request.history.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "engine query completed"
        );

        Ok(EngineAnswer::new(wire.response))
    }

    fn name(&self) -> &str {
        "http-knowledge-engine"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farm_advisor_core::{QueryMode, TurnRole};

    #[test]
    fn test_wire_request_shape() {
        let request = EngineRequest::new("dosage of Poshak")
            .with_mode(QueryMode::Direct)
            .with_history(vec![HistoryTurn::new(TurnRole::User, "hello")]);

        let wire = HttpKnowledgeEngine::wire_request(&request);
        let json = serde_json::to_value(&wire).unwrap();

        assert_eq!(json["query"], "dosage of Poshak");
        assert_eq!(json["mode"], "direct");
        assert_eq!(json["response_type"], "Multiple Paragraphs");
        assert_eq!(json["conversation_history"][0]["role"], "user");
    }

    #[test]
    fn test_wire_response_tolerates_missing_field() {
        let wire: WireResponse = serde_json::from_str("{}").unwrap();
        assert!(wire.response.is_empty());
    }

    #[test]
    fn test_client_creation() {
        assert!(HttpKnowledgeEngine::new(EngineConfig::default()).is_ok());
    }
}
