//! Gemini `generateContent` client.

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

use super::{GenerationRequest, TextGenerator};

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct GeminiClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, endpoint: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model,
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

/// Build the JSON body for a single-turn request. The image, if any,
/// goes before the text part.
pub fn request_payload(request: &GenerationRequest) -> Value {
    let mut parts = Vec::new();
    if let Some(image) = &request.image {
        parts.push(json!({
            "inlineData": {
                "mimeType": image.mime_type,
                "data": image.data_base64,
            }
        }));
    }
    parts.push(json!({ "text": request.prompt }));

    json!({
        "contents": [{
            "role": "user",
            "parts": parts,
        }]
    })
}

/// Concatenate every text part of the first candidate.
/// Returns `Ok(None)` when the candidate carries no text at all.
pub fn parse_response_text(response: &Value) -> Result<Option<String>> {
    if let Some(error) = response.get("error") {
        let message = error["message"].as_str().unwrap_or("Unknown error");
        bail!("Gemini API error: {}", message);
    }

    let texts: Vec<&str> = response["candidates"][0]["content"]["parts"]
        .as_array()
        .map(|parts| parts.iter().filter_map(|part| part["text"].as_str()).collect())
        .unwrap_or_default();

    if texts.is_empty() {
        return Ok(None);
    }
    Ok(Some(texts.concat()))
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
        debug!(
            "Sending generateContent request to model {} (image: {})",
            self.model,
            request.image.is_some()
        );

        let response = self
            .http
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&request_payload(request))
            .send()
            .await
            .context("HTTP request to Gemini failed")?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .context("Failed to parse Gemini response JSON")?;

        if !status.is_success() {
            let message = body["error"]["message"]
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| format!("HTTP {}", status));
            return Err(anyhow!("Gemini API error: {}", message));
        }

        parse_response_text(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::InlineImage;

    #[test]
    fn test_text_payload() {
        let payload = request_payload(&GenerationRequest::text("Ciao"));
        assert_eq!(
            payload,
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "Ciao" }] }]
            })
        );
    }

    #[test]
    fn test_image_payload_puts_image_first() {
        let request = GenerationRequest::with_image(
            "Che razza è?",
            InlineImage {
                mime_type: "image/png".to_string(),
                data_base64: "AAAA".to_string(),
            },
        );
        let payload = request_payload(&request);
        let parts = payload["contents"][0]["parts"].as_array().unwrap();

        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "AAAA");
        assert_eq!(parts[1]["text"], "Che razza è?");
    }

    #[test]
    fn test_parse_joins_text_parts() {
        let response = json!({
            "candidates": [{
                "content": { "parts": [{ "text": "Ciao, " }, { "text": "micio!" }] }
            }]
        });
        assert_eq!(
            parse_response_text(&response).unwrap(),
            Some("Ciao, micio!".to_string())
        );
    }

    #[test]
    fn test_parse_without_text() {
        assert_eq!(parse_response_text(&json!({ "candidates": [] })).unwrap(), None);
        assert_eq!(
            parse_response_text(&json!({
                "candidates": [{ "content": { "parts": [{ "functionCall": {} }] } }]
            }))
            .unwrap(),
            None
        );
    }

    #[test]
    fn test_parse_error_body() {
        let response = json!({ "error": { "message": "API key not valid" } });
        let err = parse_response_text(&response).unwrap_err();
        assert!(err.to_string().contains("API key not valid"));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GeminiClient::new(
            "secret".to_string(),
            DEFAULT_GEMINI_MODEL.to_string(),
            format!("{}/", DEFAULT_GEMINI_ENDPOINT),
        )
        .unwrap();
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
