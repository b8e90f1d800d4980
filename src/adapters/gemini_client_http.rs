//! Gemini API client implementation using reqwest.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::prompt::ResponseSchema;
use crate::domain::{AppError, GeminiConfig};
use crate::ports::{AiGateway, AiGatewayFactory, GeneratedImage};

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini API request failed";
const JSON_MIME_TYPE: &str = "application/json";
const IMAGE_MIME_TYPE: &str = "image/jpeg";

/// HTTP transport for the Gemini API.
///
/// Performs exactly one request per call; failures are returned as-is.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    api_url: Url,
    text_model: String,
    image_model: String,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("api_url", &self.api_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &GeminiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::gateway(format!("Failed to create HTTP client: {}", e), None))?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            client,
        })
    }

    fn endpoint(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.api_url.as_str().trim_end_matches('/'), model, method)
    }

    fn post<B: Serialize, R: DeserializeOwned>(&self, url: &str, body: &B) -> Result<R, AppError> {
        log::debug!("POST {} (api key [REDACTED])", url);
        let response = self
            .client
            .post(url)
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, JSON_MIME_TYPE)
            .json(body)
            .send()
            .map_err(|e| AppError::gateway(format!("HTTP request failed: {}", e), None))?;

        let status = response.status();
        let body_text = response.text().unwrap_or_default();

        if status.is_success() {
            return serde_json::from_str(&body_text).map_err(|e| {
                AppError::gateway(format!("Failed to parse response: {}", e), Some(status.as_u16()))
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });
        log::warn!("Gemini API returned {}: {}", status.as_u16(), message);

        Err(AppError::gateway(message, Some(status.as_u16())))
    }

    fn generate_content(&self, request: &GenerateContentRequest) -> Result<String, AppError> {
        let url = self.endpoint(&self.text_model, "generateContent");
        let response: GenerateContentResponse = self.post(&url, request)?;
        response.text().ok_or_else(|| {
            let reason = response
                .prompt_feedback
                .and_then(|feedback| feedback.block_reason)
                .map(|reason| format!(" (blocked: {})", reason))
                .unwrap_or_default();
            AppError::gateway(format!("Gemini returned no text{}", reason), None)
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

impl Content {
    fn user(text: &str) -> Self {
        Self { role: Some("user".to_string()), parts: vec![Part { text: Some(text.to_string()) }] }
    }

    fn system(text: &str) -> Self {
        Self { role: None, parts: vec![Part { text: Some(text.to_string()) }] }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: ResponseSchema,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(|part| part.text.as_deref()).collect();
        if text.is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<PredictInstance>,
    parameters: PredictParameters,
}

#[derive(Debug, Serialize)]
struct PredictInstance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictParameters {
    sample_count: u32,
    aspect_ratio: String,
    output_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    #[serde(default)]
    bytes_base64_encoded: Option<String>,
    #[serde(default)]
    mime_type: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl AiGateway for HttpGeminiClient {
    fn generate_text(
        &self,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> Result<String, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: system_instruction.map(Content::system),
            generation_config: None,
        };
        self.generate_content(&request)
    }

    fn generate_structured(&self, prompt: &str, schema: &ResponseSchema) -> Result<Value, AppError> {
        let request = GenerateContentRequest {
            contents: vec![Content::user(prompt)],
            system_instruction: None,
            generation_config: Some(GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_string(),
                response_schema: schema.clone(),
            }),
        };
        let text = self.generate_content(&request)?;
        serde_json::from_str(text.trim()).map_err(|e| AppError::decode("structured", e))
    }

    fn generate_images(
        &self,
        prompt: &str,
        count: u32,
        aspect_ratio: &str,
    ) -> Result<Vec<GeneratedImage>, AppError> {
        let request = PredictRequest {
            instances: vec![PredictInstance { prompt: prompt.to_string() }],
            parameters: PredictParameters {
                sample_count: count,
                aspect_ratio: aspect_ratio.to_string(),
                output_mime_type: IMAGE_MIME_TYPE.to_string(),
            },
        };
        let url = self.endpoint(&self.image_model, "predict");
        let response: PredictResponse = self.post(&url, &request)?;

        response
            .predictions
            .into_iter()
            .filter_map(|prediction| {
                let encoded = prediction.bytes_base64_encoded?;
                Some((encoded, prediction.mime_type))
            })
            .map(|(encoded, mime_type)| {
                let data = STANDARD
                    .decode(encoded.trim())
                    .map_err(|e| AppError::decode("image", e))?;
                Ok(GeneratedImage {
                    mime_type: mime_type.unwrap_or_else(|| IMAGE_MIME_TYPE.to_string()),
                    data,
                })
            })
            .collect()
    }
}

/// Builds [`HttpGeminiClient`]s once a credential has been resolved.
#[derive(Debug, Clone)]
pub struct GeminiGatewayFactory {
    api_key: Option<String>,
    config: GeminiConfig,
}

impl GeminiGatewayFactory {
    pub fn new(api_key: Option<String>, config: GeminiConfig) -> Self {
        Self { api_key, config }
    }
}

impl AiGatewayFactory for GeminiGatewayFactory {
    fn create(&self) -> Result<Box<dyn AiGateway>, AppError> {
        let api_key = self.api_key.clone().ok_or(AppError::MissingCredential)?;
        Ok(Box::new(HttpGeminiClient::new(api_key, &self.config)?))
    }
}
