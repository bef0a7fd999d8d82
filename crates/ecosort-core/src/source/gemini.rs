use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use tracing::debug;

use super::{prompt, response, ClassificationSource, RawExternalClassification, SourceError};
use crate::config::GeminiConfig;
use crate::model::DetectedItem;

/// Minimal client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, SourceError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| SourceError::NotConfigured("GEMINI_API_KEY is not set".into()))?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Build the request body for a single-turn prompt. `mime_type` asks the
    /// model for a specific response format, e.g. `application/json`.
    fn build_request_body(
        prompt: &str,
        temperature: f32,
        max_tokens: u32,
        mime_type: Option<&str>,
    ) -> serde_json::Value {
        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }],
            }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_tokens,
            },
        });

        if let Some(mime) = mime_type {
            body["generationConfig"]["responseMimeType"] = json!(mime);
        }

        body
    }

    /// Send a prompt and return the model's text.
    pub async fn generate(
        &self,
        prompt: &str,
        mime_type: Option<&str>,
    ) -> Result<String, SourceError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model,
        );

        let body = Self::build_request_body(prompt, self.temperature, self.max_tokens, mime_type);

        debug!(model = %self.model, prompt_len = prompt.len(), "gemini request");

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.without_url()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let body = response.text().await.unwrap_or_default();
            return Err(SourceError::Api { status, body });
        }

        let resp: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SourceError::Http(e.without_url()))?;
        let content = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                SourceError::Parse("missing candidates[0].content.parts[0].text".into())
            })?
            .to_string();

        debug!(model = %self.model, response_len = content.len(), "gemini response");
        Ok(content)
    }

    /// Free-text markdown analysis of a detection list.
    pub async fn analyze(&self, items: &[DetectedItem]) -> Result<String, SourceError> {
        let prompt = prompt::analysis_prompt(items)
            .map_err(|e| SourceError::Parse(format!("could not encode items: {e}")))?;
        self.generate(&prompt, None).await
    }
}

/// Batch classification backed by Gemini.
pub struct GeminiSource {
    client: GeminiClient,
}

impl GeminiSource {
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClassificationSource for GeminiSource {
    async fn classify_batch(
        &self,
        labels: &[String],
    ) -> Result<Vec<RawExternalClassification>, SourceError> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }
        let prompt = prompt::classification_prompt(labels);
        let text = self.client.generate(&prompt, Some("application/json")).await?;
        response::parse_batch(&text)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}
