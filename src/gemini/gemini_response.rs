use crate::gemini::{
    GeminiBlockReason, GeminiCandidate, GeminiFinishReason, GeminiPart, GeminiPromptFeedback,
    GeminiUsage,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeminiResponse {
    // Omitted entirely when the prompt itself was blocked
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    #[serde(rename = "usageMetadata")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<GeminiUsage>,
    #[serde(rename = "modelVersion")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
    #[serde(rename = "promptFeedback")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<GeminiPromptFeedback>,
    #[serde(rename = "responseId")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

impl GeminiResponse {
    /// Parts of the first candidate; empty when there is none.
    pub fn first_candidate_parts(&self) -> &[GeminiPart] {
        self.candidates
            .first()
            .map(|c| c.content.parts.as_slice())
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&GeminiFinishReason> {
        self.candidates.first().and_then(|c| c.finish_reason.as_ref())
    }

    pub fn block_reason(&self) -> Option<&GeminiBlockReason> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
    }
}
