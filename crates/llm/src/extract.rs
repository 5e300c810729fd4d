use std::sync::Arc;
use std::time::{Duration, Instant};

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use vitals_core::config::{LlmConfig, OllamaConfig};
use vitals_core::{ExtractedQuery, HourBucketKey};

use crate::decode::{decode_reply, DecodePath};
use crate::prompt::{system_prompt, AILMENT_KEY, END_KEY, START_KEY};
use crate::provider::{GenerateRequest, LlmError, LlmProvider, ResponseFormat};

/// Why an extraction produced no query.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("language model service unavailable: {0}")]
    ServiceUnavailable(#[source] LlmError),
    #[error("language model did not answer within {}s", .after.as_secs_f32())]
    Timeout { after: Duration },
    #[error("could not parse JSON from the model reply")]
    Unparseable { raw: String },
    #[error("model reply is missing '{field}'")]
    MissingField { field: &'static str },
    #[error("model returned '{value}' for '{field}', expected YYYY-MM-DDTHH")]
    InvalidDate { field: &'static str, value: String },
}

impl ExtractionError {
    /// Service-down failures, as opposed to a reply we could not use.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            ExtractionError::ServiceUnavailable(_) | ExtractionError::Timeout { .. }
        )
    }

    /// Short machine-readable class name.
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractionError::ServiceUnavailable(_) => "service_unavailable",
            ExtractionError::Timeout { .. } => "timeout",
            ExtractionError::Unparseable { .. } => "unparseable_reply",
            ExtractionError::MissingField { .. } => "missing_field",
            ExtractionError::InvalidDate { .. } => "invalid_date",
        }
    }
}

/// Result of one extraction call.
///
/// `elapsed` is the wall-clock time of the model call; it is zero when the
/// call never completed (transport failure or timeout).
#[derive(Debug)]
pub struct Extraction {
    pub result: Result<ExtractedQuery, ExtractionError>,
    pub elapsed: Duration,
    /// Decoder stage that produced the object, when one did.
    pub path: Option<DecodePath>,
}

impl Extraction {
    fn failed(error: ExtractionError, elapsed: Duration) -> Self {
        Self {
            result: Err(error),
            elapsed,
            path: None,
        }
    }
}

/// Turns a free-text health query into an ailment and an hour-precision
/// date window by asking a language model.
pub struct QueryExtractor {
    provider: Arc<dyn LlmProvider>,
    temperature: f32,
    context_window: u32,
    timeout: Duration,
}

impl QueryExtractor {
    pub fn new(provider: Box<dyn LlmProvider>, llm_config: &LlmConfig) -> Self {
        Self {
            provider: Arc::from(provider),
            temperature: llm_config.temperature,
            context_window: llm_config.context_window,
            timeout: llm_config.timeout(),
        }
    }

    /// Build from config, creating the appropriate provider.
    pub fn from_config(
        llm_config: &LlmConfig,
        ollama_config: &OllamaConfig,
    ) -> Result<Self, LlmError> {
        let provider = crate::providers::create_provider(llm_config, ollama_config)?;
        Ok(Self::new(provider, llm_config))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider(&self) -> &dyn LlmProvider {
        self.provider.as_ref()
    }

    /// A handle on the provider that outlives any borrow of the extractor,
    /// for liveness checks made outside the query path.
    pub fn shared_provider(&self) -> Arc<dyn LlmProvider> {
        Arc::clone(&self.provider)
    }

    pub fn build_request(&self, query: &str, anchor: &HourBucketKey) -> GenerateRequest {
        GenerateRequest {
            system: system_prompt(anchor),
            prompt: query.to_string(),
            format: ResponseFormat::Json,
            temperature: self.temperature,
            context_window: self.context_window,
        }
    }

    /// Ask the model for `{health_ailment, start_date, end_date}` with
    /// `anchor` as the present date.
    ///
    /// Never fails outright: every service or parse problem comes back as an
    /// `Err` inside the returned [`Extraction`]. The model call is bounded by
    /// the configured timeout and is cancelled when it expires.
    pub async fn extract(&self, query: &str, anchor: &HourBucketKey) -> Extraction {
        let request = self.build_request(query, anchor);
        let started = Instant::now();

        let raw = match tokio::time::timeout(self.timeout, self.provider.generate(&request)).await
        {
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs_f32(), "Extraction timed out");
                return Extraction::failed(
                    ExtractionError::Timeout {
                        after: self.timeout,
                    },
                    Duration::ZERO,
                );
            }
            Ok(Err(e)) => {
                let elapsed = if e.service_replied() {
                    started.elapsed()
                } else {
                    Duration::ZERO
                };
                warn!(error = %e, "Extraction call failed");
                return Extraction::failed(ExtractionError::ServiceUnavailable(e), elapsed);
            }
            Ok(Ok(raw)) => raw,
        };
        let elapsed = started.elapsed();

        debug!("LLM response: {}", raw);

        match interpret_reply(&raw) {
            Ok((extracted, path)) => {
                info!(
                    ailment = %extracted.ailment,
                    start = %extracted.start,
                    end = %extracted.end,
                    path = ?path,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Extracted health query"
                );
                Extraction {
                    result: Ok(extracted),
                    elapsed,
                    path: Some(path),
                }
            }
            Err(e) => {
                warn!(error = %e, elapsed_ms = elapsed.as_millis() as u64, "Could not use model reply");
                Extraction::failed(e, elapsed)
            }
        }
    }
}

/// Decode a raw model reply into a complete query.
///
/// Dates are cut to their first 13 characters before validation, whatever
/// precision the model used.
pub fn interpret_reply(raw: &str) -> Result<(ExtractedQuery, DecodePath), ExtractionError> {
    let (obj, path) = decode_reply(raw).ok_or_else(|| ExtractionError::Unparseable {
        raw: raw.to_string(),
    })?;

    let ailment = string_field(&obj, AILMENT_KEY)?.trim().to_string();
    if ailment.is_empty() {
        return Err(ExtractionError::MissingField { field: AILMENT_KEY });
    }
    let start = date_field(&obj, START_KEY)?;
    let end = date_field(&obj, END_KEY)?;

    Ok((ExtractedQuery::new(ailment, start, end), path))
}

fn string_field<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ExtractionError> {
    obj.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .ok_or(ExtractionError::MissingField { field })
}

fn date_field(obj: &Map<String, Value>, field: &'static str) -> Result<HourBucketKey, ExtractionError> {
    let raw = string_field(obj, field)?;
    HourBucketKey::truncate(raw.trim()).map_err(|_| ExtractionError::InvalidDate {
        field,
        value: raw.to_string(),
    })
}
