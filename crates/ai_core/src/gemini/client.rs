//! Gemini API client implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::GenerationConfig;
use crate::error::GenerationError;
use crate::ports::{GenerationEngine, GenerationRequest, StreamingResponse};

use super::streaming::create_stream;

/// Generation engine backed by the hosted Gemini API
pub struct GeminiGenerationEngine {
    client: Client,
    config: GenerationConfig,
}

impl std::fmt::Debug for GeminiGenerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiGenerationEngine")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish_non_exhaustive()
    }
}

impl GeminiGenerationEngine {
    /// Create a new Gemini engine.
    ///
    /// Fails with `MissingApiKey` when the config carries no usable key;
    /// this is checked here so the process refuses to start misconfigured.
    pub fn new(config: GenerationConfig) -> Result<Self, GenerationError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| GenerationError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Gemini generation engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a model action, e.g. `streamGenerateContent`
    fn model_url(&self, action: &str) -> String {
        format!(
            "{}/v1beta/models/{}:{}",
            self.config.base_url, self.config.model, action
        )
    }

    fn api_key(&self) -> &str {
        // validate() guarantees presence; empty string would 401 upstream
        self.config
            .api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .unwrap_or_default()
    }

    fn build_body(&self, request: &GenerationRequest) -> GeminiGenerateRequest {
        GeminiGenerateRequest {
            system_instruction: request
                .system_instruction
                .as_ref()
                .map(|text| GeminiContent::from_text(text)),
            contents: vec![GeminiTurn {
                role: "user",
                content: GeminiContent::from_text(&request.user_text),
            }],
            generation_config: GeminiGenerationConfig {
                temperature: request.temperature.unwrap_or(self.config.temperature),
                max_output_tokens: request
                    .max_output_tokens
                    .unwrap_or(self.config.max_output_tokens),
            },
        }
    }
}

/// Gemini-format generation request
#[derive(Debug, Serialize)]
struct GeminiGenerateRequest {
    #[serde(rename = "system_instruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    contents: Vec<GeminiTurn>,
    #[serde(rename = "generationConfig")]
    generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize)]
struct GeminiTurn {
    role: &'static str,
    #[serde(flatten)]
    content: GeminiContent,
}

#[derive(Debug, Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    fn from_text(text: &str) -> Self {
        Self {
            parts: vec![GeminiPart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Debug, Serialize)]
struct GeminiGenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

/// Gemini models list response
#[derive(Debug, Deserialize)]
struct GeminiModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

#[derive(Debug, Deserialize)]
struct GeminiModel {
    name: String,
}

#[async_trait]
impl GenerationEngine for GeminiGenerationEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate_stream(
        &self,
        request: GenerationRequest,
    ) -> Result<StreamingResponse, GenerationError> {
        let body = self.build_body(&request);

        debug!("Starting streaming generation request");

        let response = self
            .client
            .post(self.model_url("streamGenerateContent"))
            .query(&[("alt", "sse")])
            .header("x-goog-api-key", self.api_key())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                return Err(GenerationError::RateLimited);
            }
            return Err(GenerationError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        Ok(create_stream(response))
    }

    #[instrument(skip(self))]
    async fn check_availability(&self) -> Result<bool, GenerationError> {
        let response = self
            .client
            .get(format!("{}/v1beta/models", self.config.base_url))
            .header("x-goog-api-key", self.api_key())
            .timeout(Duration::from_secs(5))
            .send()
            .await;

        match response {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(e) if e.is_timeout() => Ok(false),
            Err(e) if e.is_connect() => Ok(false),
            Err(e) => Err(GenerationError::RequestFailed(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn list_models(&self) -> Result<Vec<String>, GenerationError> {
        let response = self
            .client
            .get(format!("{}/v1beta/models", self.config.base_url))
            .header("x-goog-api-key", self.api_key())
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::ServerError(response.status().to_string()));
        }

        let models_response: GeminiModelsResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::InvalidResponse(e.to_string()))?;

        Ok(models_response
            .models
            .into_iter()
            .map(|m| m.name.trim_start_matches("models/").to_string())
            .collect())
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}
