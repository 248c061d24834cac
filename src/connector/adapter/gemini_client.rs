use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde_json::{json, Value};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::TextGenerator;
use crate::connector::adapter::{Clock, RawResponse, ReqwestTransport, SystemClock, Transport};
use crate::domain::{
    extract_text, CallOutcome, DomainError, RemoteCallError, RetryPolicy, RetryReason,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const GENERATE_PATH: &str = "/v1beta/models";
/// Longest slice of the last reply body quoted in the exhaustion error.
const LAST_BODY_LIMIT: usize = 1000;
const EMPTY_BODY_PLACEHOLDER: &str = "<empty>";

/// Endpoint and credential for the Gemini `generateContent` API.
#[derive(Clone)]
pub struct GeminiConfig {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiConfig {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        Self {
            api_key: api_key.into().trim().to_string(),
            model: model.into(),
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable          | Default                                      |
    /// |-------------------|----------------------------------------------|
    /// | `GEMINI_API_KEY`  | `""` (calls fail until set)                  |
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash`                           |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com`  |
    pub fn from_env() -> Self {
        let key = std::env::var("GEMINI_API_KEY").unwrap_or_default();
        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(key, model, base)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}/{}:generateContent?key={}",
            self.base_url, GENERATE_PATH, self.model, self.api_key
        )
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &if self.has_api_key() { "<set>" } else { "<missing>" })
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Calls Gemini with exponential backoff and extracts the generated text.
///
/// Each attempt is classified into a [`CallOutcome`] by [`classify`]; the loop
/// in [`GeminiClient::call`] owns attempt counting, the overall deadline and
/// backoff sleeps. Transport and clock are injectable for tests.
pub struct GeminiClient<T = ReqwestTransport, C = SystemClock> {
    config: GeminiConfig,
    policy: RetryPolicy,
    transport: T,
    clock: C,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self::with_parts(config, RetryPolicy::default(), ReqwestTransport::new(), SystemClock)
    }
}

impl<T: Transport, C: Clock> GeminiClient<T, C> {
    pub fn with_parts(config: GeminiConfig, policy: RetryPolicy, transport: T, clock: C) -> Self {
        Self {
            config,
            policy,
            transport,
            clock,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Send `prompt` and return the extracted, trimmed reply text.
    ///
    /// `overall_timeout` bounds the time spent before starting a new attempt;
    /// an attempt already in flight is only bounded by the per-attempt timeout.
    pub async fn call(&self, prompt: &str, overall_timeout: Duration) -> Result<String, RemoteCallError> {
        if !self.config.has_api_key() {
            error!("Gemini API key is not configured");
            return Err(RemoteCallError::MissingApiKey);
        }

        let span = info_span!("gemini_call", call_id = %Uuid::new_v4(), model = %self.config.model);
        self.run(prompt, overall_timeout).instrument(span).await
    }

    async fn run(&self, prompt: &str, overall_timeout: Duration) -> Result<String, RemoteCallError> {
        let url = self.config.endpoint();
        let payload = request_body(prompt);
        let max_attempts = self.policy.max_attempts();
        let start = self.clock.now();
        let mut last_body: Option<String> = None;

        for attempt in 0..max_attempts {
            if self.clock.now().duration_since(start) > overall_timeout {
                warn!("Overall timeout of {:?} exceeded before attempt {}", overall_timeout, attempt + 1);
                return Err(RemoteCallError::Timeout);
            }

            let reason = match self.attempt(&url, &payload).await {
                CallOutcome::Success(text) => {
                    debug!("Attempt {} succeeded ({} chars)", attempt + 1, text.chars().count());
                    return Ok(text);
                }
                CallOutcome::FatalFailure(err) => {
                    warn!("Attempt {} failed: {}", attempt + 1, err);
                    return Err(err);
                }
                CallOutcome::RetryableFailure(reason) => reason,
            };

            if let Some(body) = reason.body() {
                last_body = Some(body.to_string());
            }

            if self.policy.is_last_attempt(attempt) {
                match reason.into_final_error() {
                    Some(err) => return Err(err),
                    None => break,
                }
            }

            let jitter: f64 = rand::thread_rng().gen_range(0.0..1.0);
            let delay = self.policy.backoff(attempt, jitter);
            match &reason {
                RetryReason::Overloaded { .. } => info!(
                    "503 Overloaded. Backing off {:.1}s (attempt {}/{})",
                    delay.as_secs_f64(),
                    attempt + 1,
                    max_attempts
                ),
                RetryReason::Network(message) => warn!(
                    "Network error: {}. Retrying in {:.1}s (attempt {}/{})",
                    message,
                    delay.as_secs_f64(),
                    attempt + 1,
                    max_attempts
                ),
                RetryReason::EmptyReply { .. } => warn!(
                    "No usable text in reply. Retrying in {:.1}s (attempt {}/{})",
                    delay.as_secs_f64(),
                    attempt + 1,
                    max_attempts
                ),
            }
            self.clock.sleep(delay).await;
        }

        Err(RemoteCallError::Exhausted {
            last_body: last_body
                .filter(|body| !body.is_empty())
                .map(|body| body.chars().take(LAST_BODY_LIMIT).collect())
                .unwrap_or_else(|| EMPTY_BODY_PLACEHOLDER.to_string()),
        })
    }

    async fn attempt(&self, url: &str, payload: &Value) -> CallOutcome {
        match self
            .transport
            .post_json(url, payload, self.policy.attempt_timeout())
            .await
        {
            Ok(response) => classify(response),
            Err(e) => CallOutcome::RetryableFailure(RetryReason::Network(e.to_string())),
        }
    }
}

#[async_trait]
impl<T: Transport, C: Clock> TextGenerator for GeminiClient<T, C> {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        Ok(self.call(prompt, self.policy.overall_timeout()).await?)
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [
            {
                "parts": [
                    {"text": prompt}
                ]
            }
        ]
    })
}

/// Map one HTTP reply to the loop's control decision.
pub fn classify(response: RawResponse) -> CallOutcome {
    let RawResponse { status, body } = response;
    match status {
        503 => CallOutcome::RetryableFailure(RetryReason::Overloaded { body }),
        429 => CallOutcome::FatalFailure(RemoteCallError::QuotaExceeded),
        status if status >= 400 => CallOutcome::FatalFailure(RemoteCallError::Status { status, body }),
        _ => classify_body(body),
    }
}

fn classify_body(body: String) -> CallOutcome {
    let reply: Value = match serde_json::from_str(&body) {
        Ok(reply) => reply,
        Err(_) => {
            let raw = body.trim();
            return if raw.is_empty() {
                CallOutcome::FatalFailure(RemoteCallError::EmptyResponse)
            } else {
                CallOutcome::Success(raw.to_string())
            };
        }
    };

    if let Some(text) = extract_text(&reply) {
        let text = text.trim();
        if !text.is_empty() {
            return CallOutcome::Success(text.to_string());
        }
    }

    // A non-empty object is still handed back verbatim rather than retried.
    match &reply {
        Value::Object(fields) if !fields.is_empty() => CallOutcome::Success(reply.to_string()),
        _ => CallOutcome::RetryableFailure(RetryReason::EmptyReply { body }),
    }
}
