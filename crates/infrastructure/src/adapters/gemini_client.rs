//! Content generator backed by the Gemini `generateContent` API.
//!
//! This adapter implements the `ContentGenerator` port with reqwest. It is
//! the only component that talks to the network; rendering never calls it.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use blockmark_application::ports::{ContentGenerator, GenerationError};
use blockmark_domain::GeneratorSettings;

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Wraps a user prompt in the writing instruction sent to the model.
#[must_use]
pub fn writer_prompt(prompt: &str) -> String {
    format!(
        "You are an expert writer. Please generate content based on the following prompt. \
         Return only the generated content, without any introductory phrases like \
         \"Here is the content:\".\n\nPROMPT: \"{prompt}\""
    )
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// HTTP content generator for Gemini models.
pub struct GeminiContentGenerator {
    client: Client,
    url: Url,
    api_key: String,
    settings: GeneratorSettings,
}

impl GeminiContentGenerator {
    /// Creates a generator from settings and an API key.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::NotConfigured` if the key is blank or the
    /// endpoint is not a valid URL, and `GenerationError::Request` if the
    /// HTTP client cannot be built.
    pub fn new(
        settings: GeneratorSettings,
        api_key: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::NotConfigured("API key is not set".to_string()));
        }

        let url = Self::endpoint_url(&settings)?;
        let client = Client::builder()
            .user_agent(concat!("blockmark/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        Ok(Self {
            client,
            url,
            api_key,
            settings,
        })
    }

    /// Builds `{endpoint}/models/{model}:generateContent`.
    fn endpoint_url(settings: &GeneratorSettings) -> Result<Url, GenerationError> {
        let base = settings.endpoint.trim_end_matches('/');
        Url::parse(&format!("{base}/models/{}:generateContent", settings.model))
            .map_err(|e| GenerationError::NotConfigured(format!("invalid endpoint: {e}")))
    }

    fn request_body(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: writer_prompt(prompt),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.settings.temperature,
                top_p: self.settings.top_p,
                top_k: self.settings.top_k,
                max_output_tokens: self.settings.max_output_tokens,
            },
        }
    }

    /// Maps reqwest errors to `GenerationError`.
    fn map_error(error: &reqwest::Error) -> GenerationError {
        if error.is_timeout() {
            return GenerationError::Request("request timed out".to_string());
        }
        GenerationError::Request(error.to_string())
    }
}

impl ContentGenerator for GeminiContentGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        tracing::info!(model = %self.settings.model, "requesting generated content");

        let response = self
            .client
            .post(self.url.clone())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| Self::map_error(&e))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GenerationError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response.json().await.map_err(|e| Self::map_error(&e))?;
        body.text().ok_or(GenerationError::EmptyResponse)
    }
}
