use async_trait::async_trait;
use serde::Serialize;

/// Output constraint requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
}

/// A single non-streaming generation call: one system instruction, one
/// user prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub system: String,
    pub prompt: String,
    pub format: ResponseFormat,
    pub temperature: f32,
    pub context_window: u32,
}

/// Trait for LLM providers. Each backend implements this.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Run one generation and return the model's raw reply text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError>;

    /// Cheap liveness check of the backing service.
    async fn ping(&self) -> Result<(), LlmError>;

    fn model(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    ApiError { status: u16, body: String },
    #[error("failed to parse response: {0}")]
    ParseError(String),
    #[error("provider not configured: {0}")]
    NotConfigured(String),
}

impl LlmError {
    /// True when the service actually answered (bad status or envelope), as
    /// opposed to the request never completing.
    pub fn service_replied(&self) -> bool {
        matches!(self, LlmError::ApiError { .. } | LlmError::ParseError(_))
    }
}

/// Scripted provider for exercising extraction without a model server.
#[cfg(any(test, feature = "test-utils"))]
pub mod mock {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// A mock provider that returns pre-configured replies in FIFO order.
    pub struct MockLlmProvider {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        requests: Mutex<Vec<GenerateRequest>>,
        delay: Option<Duration>,
        reachable: AtomicBool,
    }

    impl MockLlmProvider {
        pub fn new() -> Self {
            Self {
                replies: Mutex::new(VecDeque::new()),
                requests: Mutex::new(Vec::new()),
                delay: None,
                reachable: AtomicBool::new(true),
            }
        }

        /// Sleep this long before answering each call.
        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = Some(delay);
            self
        }

        /// Queue a raw reply text.
        pub fn queue_text(&self, text: &str) {
            self.replies.lock().unwrap().push_back(Ok(text.to_string()));
        }

        /// Queue a failure.
        pub fn queue_error(&self, error: LlmError) {
            self.replies.lock().unwrap().push_back(Err(error));
        }

        pub fn set_reachable(&self, reachable: bool) {
            self.reachable.store(reachable, Ordering::SeqCst);
        }

        /// Requests seen so far, oldest first.
        pub fn requests(&self) -> Vec<GenerateRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Default for MockLlmProvider {
        fn default() -> Self {
            Self::new()
        }
    }

    #[async_trait]
    impl LlmProvider for MockLlmProvider {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(LlmError::NotConfigured("no mock reply queued".into())))
        }

        async fn ping(&self) -> Result<(), LlmError> {
            if self.reachable.load(Ordering::SeqCst) {
                Ok(())
            } else {
                Err(LlmError::ApiError {
                    status: 503,
                    body: "mock offline".into(),
                })
            }
        }

        fn model(&self) -> &str {
            "mock"
        }
    }

    /// Lets a test keep a handle on the mock after handing it to an extractor.
    #[async_trait]
    impl LlmProvider for std::sync::Arc<MockLlmProvider> {
        async fn generate(&self, request: &GenerateRequest) -> Result<String, LlmError> {
            self.as_ref().generate(request).await
        }

        async fn ping(&self) -> Result<(), LlmError> {
            self.as_ref().ping().await
        }

        fn model(&self) -> &str {
            "mock"
        }
    }
}
