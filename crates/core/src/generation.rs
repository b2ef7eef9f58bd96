use crate::error::GenerationError;
use crate::traits::TextGenerator;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

pub const EXPERIENCE_RANGE: RangeInclusive<u8> = 1..=50;
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";

const BACKEND: &str = "gemini";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Complexity {
    #[default]
    Basic,
    Intermediate,
    Advanced,
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Complexity::Basic => f.write_str("Basic"),
            Complexity::Intermediate => f.write_str("Intermediate"),
            Complexity::Advanced => f.write_str("Advanced"),
        }
    }
}

impl FromStr for Complexity {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Complexity::Basic),
            "intermediate" => Ok(Complexity::Intermediate),
            "advanced" => Ok(Complexity::Advanced),
            other => Err(GenerationError::InvalidRequest(format!(
                "unknown complexity '{other}', expected basic, intermediate or advanced"
            ))),
        }
    }
}

/// Parameters for one batch of generated interview questions.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerationRequest {
    domain: String,
    experience_years: u8,
    complexity: Complexity,
}

impl GenerationRequest {
    pub fn new(
        domain: impl Into<String>,
        experience_years: u8,
        complexity: Complexity,
    ) -> Result<Self, GenerationError> {
        let domain: String = domain.into();
        let domain = domain.trim().to_string();
        if domain.is_empty() {
            return Err(GenerationError::InvalidRequest(
                "domain must not be blank".to_string(),
            ));
        }

        if !EXPERIENCE_RANGE.contains(&experience_years) {
            return Err(GenerationError::InvalidRequest(format!(
                "experience must be between {} and {} years, got {experience_years}",
                EXPERIENCE_RANGE.start(),
                EXPERIENCE_RANGE.end()
            )));
        }

        Ok(Self {
            domain,
            experience_years,
            complexity,
        })
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn experience_years(&self) -> u8 {
        self.experience_years
    }

    pub fn complexity(&self) -> Complexity {
        self.complexity
    }

    pub fn prompt(&self) -> String {
        format!(
            "Generate a set of {} interview questions and answers for a {} professional \
             with {} years of experience. The format should be clear and structured: \
             each question followed by the corresponding answer.",
            self.complexity, self.domain, self.experience_years
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedText {
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SamplingConfig {
    pub temperature: f32,
    pub top_p: f32,
    pub top_k: u32,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            temperature: 1.0,
            top_p: 0.95,
            top_k: 40,
            max_output_tokens: 8_192,
            response_mime_type: "text/plain".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub endpoint: String,
    pub model: String,
    pub api_key: Option<String>,
    pub sampling: SamplingConfig,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            api_key: None,
            sampling: SamplingConfig::default(),
        }
    }
}

impl GeminiConfig {
    /// Reads `GEMINI_API_KEY`, `GEMINI_MODEL` and `GEMINI_ENDPOINT`; blank values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            endpoint: non_blank_env("GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            model: non_blank_env("GEMINI_MODEL").unwrap_or(defaults.model),
            api_key: non_blank_env("GEMINI_API_KEY"),
            sampling: defaults.sampling,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let key: String = api_key.into();
        let key = key.trim();
        self.api_key = if key.is_empty() {
            None
        } else {
            Some(key.to_string())
        };
        self
    }

    pub fn generate_url(&self) -> Result<Url, GenerationError> {
        let raw = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        );
        Ok(Url::parse(&raw)?)
    }
}

fn non_blank_env(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let value = value.trim().to_string();
        if value.is_empty() {
            None
        } else {
            Some(value)
        }
    })
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: &'a SamplingConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Gemini `generateContent` endpoint.
pub struct GeminiGenerator {
    config: GeminiConfig,
    client: Client,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl TextGenerator for GeminiGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedText, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::MissingApiKey(BACKEND.to_string()))?;

        let url = self.config.generate_url()?;
        let prompt = request.prompt();
        let payload = request_body(&prompt, &self.config.sampling);

        info!(
            model = %self.config.model,
            domain = request.domain(),
            complexity = %request.complexity(),
            "requesting interview questions"
        );

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            return Err(GenerationError::BackendResponse {
                backend: BACKEND.to_string(),
                details: format!("status {status}: {details}"),
            });
        }

        let body: GenerateContentResponse = response.json().await?;
        let text = response_text(&body)?;
        debug!(chars = text.len(), "generation response received");

        Ok(GeneratedText {
            text,
            model: self.config.model.clone(),
            generated_at: Utc::now(),
        })
    }
}

fn request_body<'a>(prompt: &'a str, sampling: &'a SamplingConfig) -> GenerateContentRequest<'a> {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts: vec![RequestPart { text: prompt }],
        }],
        generation_config: sampling,
    }
}

fn response_text(body: &GenerateContentResponse) -> Result<String, GenerationError> {
    let text = body
        .candidates
        .first()
        .and_then(|candidate| candidate.content.as_ref())
        .map(|content| {
            content
                .parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect::<String>()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(GenerationError::EmptyResponse {
            backend: BACKEND.to_string(),
        });
    }
    Ok(text.to_string())
}
