use crate::gemini::{GeminiContent, GeminiFinishReason, GeminiSafetyRating};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiCandidate {
    // Absent when the candidate was stopped by a safety filter
    #[serde(default)]
    pub content: GeminiContent,
    #[serde(rename = "finishReason")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<GeminiFinishReason>,
    #[serde(rename = "safetyRatings")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub safety_ratings: Option<Vec<GeminiSafetyRating>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}
