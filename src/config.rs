use anyhow::bail;
use std::fmt;

/// Validated settings for the outbound Gemini calls.
#[derive(Clone)]
pub struct Config {
    pub api_key: String,
    pub api_base: String,
    pub image_model: String,
    pub analysis_model: String,
}

impl Config {
    /// Fails when the API key is missing or blank; the server must not start without it.
    pub fn new(
        api_key: Option<String>,
        api_base: String,
        image_model: String,
        analysis_model: String,
    ) -> anyhow::Result<Self> {
        let api_key = match api_key.map(|k| k.trim().to_string()) {
            Some(key) if !key.is_empty() => key,
            _ => bail!("GOOGLE_API_KEY is not defined (set it in the environment, a .env file, or pass --api-key)"),
        };

        let api_base = api_base.trim().to_string();
        if !api_base.starts_with("http://") && !api_base.starts_with("https://") {
            bail!("api base '{}' must be an http(s) URL", api_base);
        }
        if image_model.trim().is_empty() || analysis_model.trim().is_empty() {
            bail!("model names must not be empty");
        }

        Ok(Self {
            api_key,
            api_base,
            image_model,
            analysis_model,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("api_base", &self.api_base)
            .field("image_model", &self.image_model)
            .field("analysis_model", &self.analysis_model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::DEFAULT_API_BASE;
    use crate::service::DEFAULT_MODEL;

    fn build(api_key: Option<&str>) -> anyhow::Result<Config> {
        Config::new(
            api_key.map(str::to_string),
            DEFAULT_API_BASE.to_string(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_MODEL.to_string(),
        )
    }

    #[test]
    fn test_missing_api_key_is_fatal() {
        assert!(build(None).is_err());
        assert!(build(Some("")).is_err());
        assert!(build(Some("   ")).is_err());
    }

    #[test]
    fn test_valid_config() {
        let config = build(Some(" secret ")).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.image_model, "gemini-2.5-flash-image");
        assert!(!format!("{:?}", config).contains("secret"));
    }

    #[test]
    fn test_rejects_bad_api_base() {
        let err = Config::new(
            Some("key".to_string()),
            "generativelanguage.googleapis.com".to_string(),
            DEFAULT_MODEL.to_string(),
            DEFAULT_MODEL.to_string(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("http(s)"));
    }
}
