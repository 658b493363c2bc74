use crate::data_uri::ImagePayload;
use crate::gemini::{GeminiContent, GeminiPart};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiRequest {
    // Not sent to Gemini API; selects the generateContent path
    #[serde(skip_serializing)]
    #[serde(default)]
    pub model: String,
    pub contents: Vec<GeminiContent>,
}

impl GeminiRequest {
    /// A single user turn carrying a text prompt followed by the image.
    pub fn prompt_with_image(model: &str, prompt: &str, image: &ImagePayload<'_>) -> Self {
        Self {
            model: model.to_string(),
            contents: vec![GeminiContent::user(vec![
                GeminiPart::text(prompt),
                GeminiPart::inline_data(image.mime_type, image.data),
            ])],
        }
    }
}
