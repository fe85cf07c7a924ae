//! # AI Advisory Gateway
//!
//! Adapter between the care domain and a generative text service.
//!
//! The gateway never fails towards its callers: transport errors, disabled
//! configuration and empty answers all resolve to fixed Italian fallback
//! sentences, so a broken assistant degrades into a polite message instead of
//! an error page.
//!
//! The actual model is hidden behind [`TextGenerator`]. [`GeminiClient`]
//! talks to the Gemini `generateContent` endpoint; [`DisabledGenerator`]
//! stands in when no API key is configured.

pub mod gemini;
pub mod prompt;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{error, warn};

use crate::domain::models::care_log::CareLog;
use crate::domain::models::cat::Cat;

pub use gemini::GeminiClient;

/// Image attached to a multimodal request, already base64 encoded
#[derive(Debug, Clone, PartialEq)]
pub struct InlineImage {
    pub mime_type: String,
    pub data_base64: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub image: Option<InlineImage>,
}

impl GenerationRequest {
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            image: None,
        }
    }

    pub fn with_image(prompt: impl Into<String>, image: InlineImage) -> Self {
        Self {
            prompt: prompt.into(),
            image: Some(image),
        }
    }
}

/// A generative model. `Ok(None)` means the model answered without any text.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>>;
}

/// Used when no API key is configured; every request fails
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _request: &GenerationRequest) -> Result<Option<String>> {
        Err(anyhow!("AI assistant is not configured (missing API key)"))
    }
}

#[derive(Clone)]
pub struct AdvisoryGateway {
    generator: Arc<dyn TextGenerator>,
}

impl AdvisoryGateway {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledGenerator))
    }

    /// Ask the assistant about a cat, given its most recent logs (newest first)
    pub async fn request_advice(&self, cat: &Cat, recent_logs: &[CareLog], question: &str) -> String {
        let request = GenerationRequest::text(prompt::advice_prompt(cat, recent_logs, question));

        self.resolve(
            &request,
            prompt::ADVICE_ERROR_FALLBACK,
            prompt::ADVICE_EMPTY_FALLBACK,
            "advice",
        )
        .await
    }

    /// One-shot image analysis, e.g. breed identification
    pub async fn identify_breed_or_issue(&self, image: InlineImage, user_prompt: &str) -> String {
        let request = GenerationRequest::with_image(prompt::vision_prompt(user_prompt), image);

        self.resolve(
            &request,
            prompt::VISION_ERROR_FALLBACK,
            prompt::VISION_EMPTY_FALLBACK,
            "vision",
        )
        .await
    }

    async fn resolve(
        &self,
        request: &GenerationRequest,
        error_fallback: &str,
        empty_fallback: &str,
        purpose: &str,
    ) -> String {
        match self.generator.generate(request).await {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("AI {} request returned no text", purpose);
                empty_fallback.to_string()
            }
            Err(e) => {
                error!("AI {} request failed: {:#}", purpose, e);
                error_fallback.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Scripted generator that records every request it receives
    pub struct FakeGenerator {
        reply: std::result::Result<Option<String>, String>,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl FakeGenerator {
        pub fn answering(text: &str) -> Self {
            Self::with_reply(Ok(Some(text.to_string())))
        }

        pub fn silent() -> Self {
            Self::with_reply(Ok(None))
        }

        pub fn failing(message: &str) -> Self {
            Self::with_reply(Err(message.to_string()))
        }

        fn with_reply(reply: std::result::Result<Option<String>, String>) -> Self {
            Self {
                reply,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn last_request(&self) -> Option<GenerationRequest> {
            self.requests.lock().unwrap().last().cloned()
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerationRequest) -> Result<Option<String>> {
            self.requests.lock().unwrap().push(request.clone());
            self.reply.clone().map_err(|message| anyhow!(message))
        }
    }
}
