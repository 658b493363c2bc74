use crate::gemini::{GeminiRequest, GeminiResponse};
use crate::request_id::RequestId;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Failed to send request: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error (status {status}): {body}")]
    Status { status: u16, body: String },
    #[error("Failed to parse response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A backend able to run one `generateContent` call.
///
/// Shared by every in-flight request, so implementations must be safe to
/// call concurrently through `&self`.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    async fn generate_content(
        &self,
        request: &GeminiRequest,
        request_id: &RequestId,
    ) -> Result<GeminiResponse, ProviderError>;
}

#[cfg(test)]
pub mod test_support {
    use super::*;
    use crate::gemini::{GeminiCandidate, GeminiContent, GeminiPart};
    use crate::prompts;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Canned reply for one of the two calls; `None` fails with a 500.
    #[derive(Clone)]
    pub struct Reply {
        pub response: Option<GeminiResponse>,
        pub delay: Duration,
    }

    impl Reply {
        pub fn ok(response: GeminiResponse) -> Self {
            Self { response: Some(response), delay: Duration::ZERO }
        }

        pub fn fail() -> Self {
            Self { response: None, delay: Duration::ZERO }
        }

        pub fn after(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    /// Answers image prompts and analysis prompts with separate replies.
    pub struct MockProvider {
        image_reply: Reply,
        analysis_reply: Reply,
        calls: AtomicUsize,
        requests: Mutex<Vec<GeminiRequest>>,
    }

    impl MockProvider {
        pub fn new(image_reply: Reply, analysis_reply: Reply) -> Self {
            Self {
                image_reply,
                analysis_reply,
                calls: AtomicUsize::new(0),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn requests(&self) -> Vec<GeminiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GenerationProvider for MockProvider {
        async fn generate_content(
            &self,
            request: &GeminiRequest,
            _request_id: &RequestId,
        ) -> Result<GeminiResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());

            let prompt = request
                .contents
                .first()
                .and_then(|c| c.parts.first())
                .and_then(GeminiPart::as_text);
            let reply = if prompt == Some(prompts::IMAGE_TRANSFORMATION) {
                self.image_reply.clone()
            } else {
                self.analysis_reply.clone()
            };

            if !reply.delay.is_zero() {
                tokio::time::sleep(reply.delay).await;
            }
            reply.response.ok_or_else(|| ProviderError::Status {
                status: 500,
                body: "upstream exploded".to_string(),
            })
        }
    }

    pub fn response_with_parts(parts: Vec<GeminiPart>) -> GeminiResponse {
        GeminiResponse {
            candidates: vec![GeminiCandidate {
                content: GeminiContent {
                    role: Some("model".to_string()),
                    parts,
                },
                finish_reason: None,
                safety_ratings: None,
                index: Some(0),
            }],
            ..Default::default()
        }
    }

    pub fn image_response(mime_type: &str, data: &str) -> GeminiResponse {
        response_with_parts(vec![GeminiPart::inline_data(mime_type, data)])
    }

    pub fn text_response(text: &str) -> GeminiResponse {
        response_with_parts(vec![GeminiPart::text(text)])
    }
}
