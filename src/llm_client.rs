use crate::gemini::{GeminiRequest, GeminiResponse};
use crate::provider::{GenerationProvider, ProviderError};
use crate::request_id::RequestId;
use async_trait::async_trait;
use reqwest::header::HeaderValue;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini REST client sharing one connection pool across all requests.
pub struct LlmClient {
    http_client: Arc<reqwest::Client>,
    api_base: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(http_client: Arc<reqwest::Client>, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    fn build_target_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let path = format!("v1beta/models/{}:generateContent", model);
        if self.api_base.ends_with('/') {
            format!("{}{}", self.api_base, path)
        } else {
            format!("{}/{}", self.api_base, path)
        }
    }
}

#[async_trait]
impl GenerationProvider for LlmClient {
    async fn generate_content(
        &self,
        request: &GeminiRequest,
        request_id: &RequestId,
    ) -> Result<GeminiResponse, ProviderError> {
        let target_url = self.build_target_url(&request.model);

        let mut target_request = self
            .http_client
            .post(&target_url)
            .header("Content-Type", "application/json")
            .header("x-goog-api-key", &self.api_key);

        // Propagate request id upstream
        if let Ok(val) = HeaderValue::from_str(&request_id.0) {
            target_request = target_request.header("x-request-id", val);
        }

        info!("Forwarding request to: {}", target_url);
        let response = target_request.json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Gemini request failed with status {}: {}", status, error_text);
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let body = response.text().await?;
        debug!("Gemini responded with {} bytes for model {}", body.len(), request.model);
        Ok(serde_json::from_str(&body)?)
    }
}
