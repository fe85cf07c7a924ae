use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

use crate::advisor::{AdvisoryGateway, InlineImage};
use crate::domain::care_log_service::{CareLogService, DEFAULT_LOG_LIMIT};
use crate::domain::cat_service::CatService;
use crate::domain::errors::{CareError, CareResult};

pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";

/// An answer from the assistant and when it was produced
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Service wiring the assistant to cats and their history
#[derive(Clone)]
pub struct AdviceService {
    gateway: Arc<AdvisoryGateway>,
    cat_service: CatService,
    care_log_service: CareLogService,
}

impl AdviceService {
    pub fn new(
        gateway: Arc<AdvisoryGateway>,
        cat_service: CatService,
        care_log_service: CareLogService,
    ) -> Self {
        Self {
            gateway,
            cat_service,
            care_log_service,
        }
    }

    /// Ask a question about one cat. Store failures surface as errors;
    /// assistant failures come back as fallback text.
    pub async fn ask_about_cat(&self, cat_id: &str, question: &str) -> CareResult<Advice> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CareError::validation("Question cannot be empty"));
        }

        let cat = self.cat_service.get_cat(cat_id).await?;
        let logs = self
            .care_log_service
            .list_logs_for_cat(cat_id, Some(DEFAULT_LOG_LIMIT))
            .await?;

        info!("Asking assistant about cat {} ({} logs)", cat_id, logs.len());

        let text = self.gateway.request_advice(&cat, &logs, question).await;

        Ok(Advice {
            text,
            timestamp: Utc::now(),
        })
    }

    pub async fn identify_breed_or_issue(
        &self,
        image_base64: &str,
        mime_type: Option<&str>,
        prompt: &str,
    ) -> CareResult<String> {
        let data = image_base64.trim();
        if data.is_empty() {
            return Err(CareError::validation("Image data cannot be empty"));
        }

        let mime_type = mime_type
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_IMAGE_MIME_TYPE);

        info!("Analyzing {} image ({} bytes of base64)", mime_type, data.len());

        let image = InlineImage {
            mime_type: mime_type.to_string(),
            data_base64: data.to_string(),
        };
        Ok(self.gateway.identify_breed_or_issue(image, prompt).await)
    }
}
