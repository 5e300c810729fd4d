use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::provider::{GenerateRequest, LlmError, LlmProvider};

/// Client for a local Ollama server's `/api/generate` endpoint.
pub struct OllamaProvider {
    client: reqwest::Client,
    url: String,
    model: String,
}

/// The part of Ollama's non-streaming reply envelope we use.
#[derive(Debug, Deserialize)]
struct GenerateEnvelope {
    response: String,
}

impl OllamaProvider {
    pub fn new(url: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn body(&self, request: &GenerateRequest) -> serde_json::Value {
        json!({
            "model": self.model,
            "system": request.system,
            "prompt": request.prompt,
            "format": request.format,
            "stream": false,
            "options": {
                "temperature": request.temperature,
                "num_ctx": request.context_window,
            },
        })
    }
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.url);

        debug!("Ollama request to {}", url);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&self.body(request))
            .send()
            .await?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }

        let text = response.text().await?;
        let envelope: GenerateEnvelope = serde_json::from_str(&text)
            .map_err(|e| LlmError::ParseError(format!("missing or invalid 'response' field: {e}")))?;

        Ok(envelope.response)
    }

    async fn ping(&self) -> Result<(), LlmError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError { status, body });
        }
        Ok(())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
