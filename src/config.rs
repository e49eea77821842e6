use std::env;

/// Model used for every first attempt.
pub const PRIMARY_MODEL: &str = "gemini-3-pro-image";
/// Model used only when the primary fails with a retryable error.
pub const FALLBACK_MODEL: &str = "imagen-4.0-generate-001";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Endpoint and model selection for a [`GeminiClient`](crate::GeminiClient).
///
/// The config is a plain value passed at construction; the client holds no
/// other endpoint state.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_base: String,
    pub primary_model: String,
    pub fallback_model: String,
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        GeminiConfig {
            api_base: DEFAULT_API_BASE.to_string(),
            primary_model: PRIMARY_MODEL.to_string(),
            fallback_model: FALLBACK_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl GeminiConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = env::var("EDITPIX_API_BASE") {
            config.api_base = base;
        }
        if let Ok(model) = env::var("EDITPIX_PRIMARY_MODEL") {
            config.primary_model = model;
        }
        if let Ok(model) = env::var("EDITPIX_FALLBACK_MODEL") {
            config.fallback_model = model;
        }
        if let Ok(secs) = env::var("EDITPIX_TIMEOUT_SECS") {
            if let Ok(secs) = secs.parse() {
                config.timeout_secs = secs;
            }
        }
        config
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    pub fn with_models(
        mut self,
        primary: impl Into<String>,
        fallback: impl Into<String>,
    ) -> Self {
        self.primary_model = primary.into();
        self.fallback_model = fallback.into();
        self
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_the_hosted_endpoint() {
        let config = GeminiConfig::new();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.primary_model, PRIMARY_MODEL);
        assert_eq!(config.fallback_model, FALLBACK_MODEL);
    }

    #[test]
    fn builder_overrides_compose() {
        let config = GeminiConfig::new()
            .with_api_base("http://localhost:8080")
            .with_models("model-a", "model-b")
            .with_timeout_secs(5);
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.primary_model, "model-a");
        assert_eq!(config.fallback_model, "model-b");
        assert_eq!(config.timeout_secs, 5);
    }
}
