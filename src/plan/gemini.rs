use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::MODEL_KEY_ENV;
use crate::error::PlanError;

use super::StructuredModel;

const API_ROOT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Blocking client for the Gemini `generateContent` endpoint, asking for
/// a JSON response constrained by the caller's schema.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    http: reqwest::blocking::Client,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: String,
}

impl GeminiClient {
    pub fn new(model: &str, api_key: impl Into<String>) -> Self {
        Self {
            endpoint: format!("{API_ROOT}/{model}:generateContent"),
            api_key: api_key.into(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Reads the API key from the environment; generation is simply
    /// unavailable without one.
    pub fn from_env(model: &str) -> Result<Self, PlanError> {
        let key = std::env::var(MODEL_KEY_ENV)
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| PlanError::MissingApiKey(MODEL_KEY_ENV.to_string()))?;
        Ok(Self::new(model, key.trim().to_string()))
    }
}

impl StructuredModel for GeminiClient {
    fn generate(&self, prompt: &str, schema: &Value) -> Result<String, PlanError> {
        let body = json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema,
            }
        });

        log::debug!("POST {}", self.endpoint);
        let response = self
            .http
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|err| PlanError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlanError::Transport(format!(
                "model endpoint returned HTTP {status}"
            )));
        }

        let decoded: GenerateResponse = response
            .json()
            .map_err(|err| PlanError::InvalidPlan(err.to_string()))?;
        decoded
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| PlanError::InvalidPlan("response carried no candidates".to_string()))
    }
}
