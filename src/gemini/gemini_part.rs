use crate::gemini::GeminiInlineData;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GeminiPart {
    Text {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        thought: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        #[serde(rename = "thoughtSignature")]
        thought_signature: Option<String>,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: GeminiInlineData,
    },
    // functionCall, executableCode, fileData, ... are passed through untouched
    Other(Value),
}

impl GeminiPart {
    pub fn text(text: impl Into<String>) -> Self {
        GeminiPart::Text {
            text: text.into(),
            thought: None,
            thought_signature: None,
        }
    }

    pub fn inline_data(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        GeminiPart::InlineData {
            inline_data: GeminiInlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// Non-empty text carried by this part, if any.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            GeminiPart::Text { text, .. } if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Inline data with a non-empty payload, if any.
    pub fn as_inline_data(&self) -> Option<&GeminiInlineData> {
        match self {
            GeminiPart::InlineData { inline_data } if !inline_data.data.is_empty() => Some(inline_data),
            _ => None,
        }
    }
}
