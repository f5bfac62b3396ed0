//! Image generation collaborators
//!
//! The handler only sees the `ImageGenerator` trait. `GeminiImageGenerator`
//! talks to the Gemini `generateContent` REST endpoint.

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::Engine;
use reforma_core::{AppError, BufferedFile, Config, ValidatedSubmission};
use serde::{Deserialize, Serialize};

/// Produces a base64-encoded image from a validated submission and its prompt
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(
        &self,
        submission: &ValidatedSubmission,
        prompt: &str,
    ) -> Result<String, AppError>;

    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub api_base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_key: config.gemini_api_key().to_string(),
            model: config.gemini_model().to_string(),
            api_base_url: config.gemini_api_base_url().to_string(),
            timeout: config.generation_timeout(),
        }
    }
}

pub struct GeminiImageGenerator {
    http_client: reqwest::Client,
    config: GeminiConfig,
}

impl Debug for GeminiImageGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiImageGenerator")
            .field("model", &self.config.model)
            .finish()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum RequestPart {
    Text { text: String },
    Inline {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(alias = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(rename = "inlineData", alias = "inline_data")]
    inline_data: Option<InlineData>,
}

/// Images go inline as base64; the declared type falls back to JPEG.
fn inline_image(file: &BufferedFile) -> RequestPart {
    RequestPart::Inline {
        inline_data: InlineData {
            mime_type: file
                .mime_type
                .clone()
                .unwrap_or_else(|| "image/jpeg".to_string()),
            data: base64::engine::general_purpose::STANDARD.encode(&file.content),
        },
    }
}

/// Prompt first, then the base image, mood board images and furniture image
fn build_request(submission: &ValidatedSubmission, prompt: &str) -> GenerateContentRequest {
    let mut parts = vec![
        RequestPart::Text {
            text: prompt.to_string(),
        },
        inline_image(submission.base_image()),
    ];
    parts.extend(submission.mood_board_images.iter().map(inline_image));
    if let Some(furniture) = &submission.furniture_image {
        parts.push(inline_image(furniture));
    }

    GenerateContentRequest {
        contents: vec![Content {
            role: "user",
            parts,
        }],
        generation_config: GenerationConfig {
            response_modalities: vec!["TEXT", "IMAGE"],
        },
    }
}

fn first_image(response: GenerateContentResponse) -> Option<String> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .find_map(|p| p.inline_data.map(|d| d.data))
}

impl GeminiImageGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client for Gemini API")?;

        Ok(Self {
            http_client,
            config,
        })
    }

    async fn generate_content(&self, request: &GenerateContentRequest) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.api_base_url, self.config.model
        );

        let response = self
            .http_client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await
            .context("Failed to send request to Gemini API")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow::anyhow!(
                "Gemini API request failed: {} - {}",
                status,
                error_text
            ));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .context("Failed to parse Gemini API response")?;

        first_image(body).ok_or_else(|| anyhow::anyhow!("Gemini API response contained no image"))
    }
}

#[async_trait]
impl ImageGenerator for GeminiImageGenerator {
    #[tracing::instrument(skip_all, fields(model = %self.config.model))]
    async fn generate(
        &self,
        submission: &ValidatedSubmission,
        prompt: &str,
    ) -> Result<String, AppError> {
        let request = build_request(submission, prompt);
        tracing::debug!(
            parts = request.contents[0].parts.len(),
            prompt_len = prompt.len(),
            "Sending generation request"
        );

        self.generate_content(&request).await.map_err(|e| {
            tracing::error!(error = %format!("{:#}", e), "Image generation failed");
            AppError::Generation(format!("{:#}", e))
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reforma_core::StylePreset;
    use serde_json::json;

    fn file(field: &str, mime: &str, content: &'static [u8]) -> BufferedFile {
        BufferedFile::new(
            field,
            Some(format!("{}.bin", field)),
            Some(mime.to_string()),
            content,
        )
    }

    fn submission() -> ValidatedSubmission {
        ValidatedSubmission {
            room_image: file("roomImage", "image/png", b"room"),
            room_type: "bedroom".to_string(),
            style_preset: StylePreset {
                name: "Minimal".to_string(),
                image_url: "https://cdn.example.com/minimal.jpg".to_string(),
            },
            mood_board_images: vec![file("moodBoardImages", "image/webp", b"mood")],
            furniture_image: Some(file("furnitureImage", "image/jpeg", b"chair")),
            previous_result_image: Some(file("previousResultImage", "image/png", b"prev")),
            text_prompt: String::new(),
            style_influence: 50.0,
            is_refinement: false,
        }
    }

    #[test]
    fn request_orders_parts() {
        let request = build_request(&submission(), "make it cozy");
        let body = serde_json::to_value(&request).unwrap();
        let parts = body["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0]["text"], "make it cozy");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "cm9vbQ==");
        assert_eq!(parts[2]["inlineData"]["mimeType"], "image/webp");
        assert_eq!(parts[3]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(
            body["generationConfig"]["responseModalities"],
            json!(["TEXT", "IMAGE"])
        );
    }

    #[test]
    fn refinement_sends_previous_result() {
        let mut submission = submission();
        submission.is_refinement = true;
        let body = serde_json::to_value(build_request(&submission, "p")).unwrap();
        // base64("prev")
        assert_eq!(body["contents"][0]["parts"][1]["inlineData"]["data"], "cHJldg==");
    }

    #[test]
    fn extracts_first_inline_image() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "text": "Here is your room" },
                        { "inlineData": { "mimeType": "image/png", "data": "aW1hZ2U=" } }
                    ]
                }
            }]
        }))
        .unwrap();
        assert_eq!(first_image(response).as_deref(), Some("aW1hZ2U="));
    }

    #[test]
    fn missing_image_yields_none() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "Sorry" }] } }]
        }))
        .unwrap();
        assert!(first_image(response).is_none());

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(first_image(empty).is_none());
    }
}
