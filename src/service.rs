use crate::data_uri::{DataUriError, ImagePayload};
use crate::gemini::{GeminiPart, GeminiRequest, GeminiResponse};
use crate::prompts;
use crate::provider::{GenerationProvider, ProviderError};
use crate::request_id::RequestId;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-image";

pub const INCOMPLETE_RESPONSE_MESSAGE: &str = "The AI model did not return the expected content. \
This could be due to safety filters. Please try a different photo.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub transformed_image: String,
    pub recommendations: String,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("{0}")]
    InvalidInput(#[from] DataUriError),
    #[error("{0}")]
    Provider(#[from] ProviderError),
    /// The provider answered but left out the image or the text.
    /// Both raw responses are kept for the operator log only.
    #[error("{}", INCOMPLETE_RESPONSE_MESSAGE)]
    IncompleteResponse {
        image_response: Box<GeminiResponse>,
        analysis_response: Box<GeminiResponse>,
    },
}

/// First part for which `pick` yields something, in response order.
pub fn find_part<'a, T: ?Sized>(
    parts: &'a [GeminiPart],
    pick: impl Fn(&'a GeminiPart) -> Option<&'a T>,
) -> Option<&'a T> {
    parts.iter().find_map(pick)
}

pub struct SmileService {
    provider: Arc<dyn GenerationProvider>,
    image_model: String,
    analysis_model: String,
}

impl SmileService {
    pub fn new(
        provider: Arc<dyn GenerationProvider>,
        image_model: impl Into<String>,
        analysis_model: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            image_model: image_model.into(),
            analysis_model: analysis_model.into(),
        }
    }

    /// Sends the photo out twice, once for a transformed image and once
    /// for a treatment plan, and pairs the two answers.
    ///
    /// The returned image is labelled with the caller's mime type, not the
    /// one the model reports for its output.
    pub async fn analyze_smile(
        &self,
        image_data: &str,
        request_id: &RequestId,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let image = ImagePayload::parse(image_data)?;
        debug!("Parsed image payload: mime_type={} data_len={}", image.mime_type, image.data.len());

        let image_request = GeminiRequest::prompt_with_image(&self.image_model, prompts::IMAGE_TRANSFORMATION, &image);
        let analysis_request = GeminiRequest::prompt_with_image(&self.analysis_model, prompts::ANALYSIS, &image);

        let (image_response, analysis_response) = futures::try_join!(
            self.provider.generate_content(&image_request, request_id),
            self.provider.generate_content(&analysis_request, request_id),
        )?;

        let transformed = find_part(image_response.first_candidate_parts(), GeminiPart::as_inline_data);
        let recommendations = find_part(analysis_response.first_candidate_parts(), GeminiPart::as_text);

        if let (Some(transformed), Some(recommendations)) = (transformed, recommendations) {
            if transformed.mime_type != image.mime_type {
                debug!(
                    "Model returned {} but the result is labelled {}",
                    transformed.mime_type, image.mime_type
                );
            }
            info!("Smile analysis completed");
            return Ok(AnalysisResult {
                transformed_image: image.with_data(&transformed.data),
                recommendations: recommendations.to_string(),
            });
        }

        Err(AnalyzeError::IncompleteResponse {
            image_response: Box::new(image_response),
            analysis_response: Box::new(analysis_response),
        })
    }
}
