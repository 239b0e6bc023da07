//! Mock text generator for testing

use crate::error::{Error, Result};
use crate::generation::TextGenerator;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
enum DefaultResponse {
    Text(String),
    NoText,
    Failure(String),
}

/// Builder for creating configured mock generators
pub struct MockTextGeneratorBuilder {
    scripted: VecDeque<Result<Option<String>>>,
    default_response: DefaultResponse,
    delay: Option<Duration>,
}

impl MockTextGeneratorBuilder {
    pub fn new() -> Self {
        Self {
            scripted: VecDeque::new(),
            default_response: DefaultResponse::Text("Mock response".to_string()),
            delay: None,
        }
    }

    /// Answer every call with `text`
    pub fn with_text(mut self, text: &str) -> Self {
        self.default_response = DefaultResponse::Text(text.to_string());
        self
    }

    /// Answer every call with a payload that carries no text
    pub fn with_no_text(mut self) -> Self {
        self.default_response = DefaultResponse::NoText;
        self
    }

    /// Fail every call with an external error
    pub fn with_failure(mut self, message: &str) -> Self {
        self.default_response = DefaultResponse::Failure(message.to_string());
        self
    }

    /// Queue a one-off text answer, consumed before the default
    pub fn then_text(mut self, text: &str) -> Self {
        self.scripted.push_back(Ok(Some(text.to_string())));
        self
    }

    /// Queue a one-off error, consumed before the default
    pub fn with_error(mut self, error: Error) -> Self {
        self.scripted.push_back(Err(error));
        self
    }

    /// Sleep before answering
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn build(self) -> MockTextGenerator {
        MockTextGenerator {
            scripted: Mutex::new(self.scripted),
            default_response: self.default_response,
            delay: self.delay,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl Default for MockTextGeneratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Mock implementation of TextGenerator for testing
pub struct MockTextGenerator {
    scripted: Mutex<VecDeque<Result<Option<String>>>>,
    default_response: DefaultResponse,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockTextGenerator {
    pub fn new() -> Self {
        MockTextGeneratorBuilder::new().build()
    }

    pub fn builder() -> MockTextGeneratorBuilder {
        MockTextGeneratorBuilder::new()
    }

    /// Recorded `(model, prompt)` pairs, oldest first
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, prompt)| prompt.clone())
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let scripted = self.scripted.lock().unwrap().pop_front();
        if let Some(response) = scripted {
            return response;
        }

        match &self.default_response {
            DefaultResponse::Text(text) => Ok(Some(text.clone())),
            DefaultResponse::NoText => Ok(None),
            DefaultResponse::Failure(message) => Err(Error::External(message.clone())),
        }
    }
}
