//! Gemini `generateContent` client

use super::TextGenerator;
use crate::config::BackendConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Gemini API request body
#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

pub struct GeminiBackend {
    client: Client,
    api_key: Option<String>,
    base_url: String,
}

impl GeminiBackend {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: config
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn endpoint(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, model)
    }

    async fn make_request(&self, api_key: &str, model: &str, prompt: &str) -> Result<Option<String>> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::External(format!("API request failed: {}", e)))?;

        match response.status() {
            StatusCode::OK => {
                let api_response: ApiResponse = response
                    .json()
                    .await
                    .map_err(|e| Error::External(format!("Failed to parse response: {}", e)))?;
                Ok(api_response.text())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(Error::Config("Invalid API key".to_string()))
            }
            StatusCode::TOO_MANY_REQUESTS => {
                Err(Error::External("Rate limit exceeded".to_string()))
            }
            status => {
                let error_text = response.text().await.unwrap_or_default();
                Err(Error::HttpStatus(format!("{}: {}", status, error_text)))
            }
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiBackend {
    async fn generate_text(&self, model: &str, prompt: &str) -> Result<Option<String>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::Config("No API key configured (set ECOSCI_API_KEY or GEMINI_API_KEY)".to_string())
        })?;

        debug!("POST {}", self.endpoint(model));
        self.make_request(api_key, model, prompt).await
    }
}

// Internal API response structures
#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl ApiResponse {
    /// Concatenated text parts of the first candidate
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }
}
