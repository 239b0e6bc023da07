//! Text generation
//!
//! [`GenerationClient`] performs exactly one backend call per prompt and always
//! returns a displayable string. Backend failures never reach the caller; they
//! are logged and replaced with a fixed message.

pub mod gemini;

pub use gemini::GeminiBackend;

use crate::config::BackendConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Returned when the backend answers without any text
pub const EMPTY_RESULT_MESSAGE: &str = "無法生成內容，請稍後再試。";

/// Returned when the backend call fails for any reason
pub const FAILURE_MESSAGE: &str = "發生錯誤，請檢查 API Key 或網路連線。";

/// A generative text service
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` to `model`. `Ok(None)` means the service answered
    /// without a text payload.
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<Option<String>>;
}

/// Outcome of one generation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Text(String),
    Empty,
    Failed,
}

impl GenerationOutcome {
    /// The string shown to the user
    pub fn into_display(self) -> String {
        match self {
            GenerationOutcome::Text(text) => text,
            GenerationOutcome::Empty => EMPTY_RESULT_MESSAGE.to_string(),
            GenerationOutcome::Failed => FAILURE_MESSAGE.to_string(),
        }
    }
}

pub struct GenerationClient {
    backend: Arc<dyn TextGenerator>,
    model: String,
    timeout: Option<Duration>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn TextGenerator>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            timeout: None,
        }
    }

    /// Client talking to the Gemini API as configured
    pub fn from_config(config: &BackendConfig) -> Result<Self> {
        let backend = GeminiBackend::new(config)?;
        let client = Self::new(Arc::new(backend), config.model.clone());
        Ok(match config.timeout() {
            Some(timeout) => client.with_timeout(timeout),
            None => client,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Generate text for `prompt`. Never fails and never returns an empty string.
    pub async fn generate(&self, prompt: &str) -> String {
        self.generate_outcome(prompt).await.into_display()
    }

    /// Like [`generate`](Self::generate) but keeps the kind of outcome
    pub async fn generate_outcome(&self, prompt: &str) -> GenerationOutcome {
        info!(
            "Requesting generation from {} ({} chars)",
            self.model,
            prompt.chars().count()
        );
        let start = Instant::now();

        match self.call_backend(prompt).await {
            Ok(Some(text)) if !text.trim().is_empty() => {
                debug!(
                    "Generation finished in {:?} ({} chars)",
                    start.elapsed(),
                    text.chars().count()
                );
                GenerationOutcome::Text(text)
            }
            Ok(_) => {
                info!("Backend returned no text after {:?}", start.elapsed());
                GenerationOutcome::Empty
            }
            Err(e) => {
                error!("Text generation failed after {:?}: {}", start.elapsed(), e);
                GenerationOutcome::Failed
            }
        }
    }

    async fn call_backend(&self, prompt: &str) -> Result<Option<String>> {
        let call = self.backend.generate_text(&self.model, prompt);
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| Error::Timeout(limit))?,
            None => call.await,
        }
    }
}
