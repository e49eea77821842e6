pub mod decoder;
pub mod fallback;
pub mod invoker;

use crate::config::GeminiConfig;
use crate::credentials::CredentialProvider;
use crate::error::{EditPixError, Result};
use crate::models::{DecodedImage, GenerationRequest, Hotspot, Operation, SourceImage};
use crate::prompts;
use invoker::HttpInvoker;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub use invoker::ModelInvoker;

/// Client for the EditPix generation operations.
///
/// Holds the endpoint configuration and an injected credential capability;
/// the credential is resolved fresh on every call so expiry is honored
/// mid-session. Each call is one or two strictly sequential network
/// round-trips, returning a single decoded image or a typed failure.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: GeminiConfig,
    credentials: Arc<dyn CredentialProvider>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EditPixError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(GeminiClient {
            http,
            config,
            credentials,
        })
    }

    /// Localized edit centered on `hotspot`.
    pub async fn generate_edited_image(
        &self,
        image: SourceImage,
        instruction: &str,
        hotspot: Hotspot,
        model: Option<&str>,
    ) -> Result<DecodedImage> {
        self.generate(GenerationRequest {
            operation: Operation::Edit { hotspot },
            instruction: instruction.to_string(),
            source_image: Some(image),
            model_override: model.map(String::from),
        })
        .await
    }

    /// Global stylistic filter over the whole frame.
    pub async fn generate_filtered_image(
        &self,
        image: SourceImage,
        instruction: &str,
        model: Option<&str>,
    ) -> Result<DecodedImage> {
        self.generate(GenerationRequest {
            operation: Operation::Filter,
            instruction: instruction.to_string(),
            source_image: Some(image),
            model_override: model.map(String::from),
        })
        .await
    }

    /// Tonal adjustment preserving texture and composition.
    pub async fn generate_adjusted_image(
        &self,
        image: SourceImage,
        instruction: &str,
        model: Option<&str>,
    ) -> Result<DecodedImage> {
        self.generate(GenerationRequest {
            operation: Operation::Adjust,
            instruction: instruction.to_string(),
            source_image: Some(image),
            model_override: model.map(String::from),
        })
        .await
    }

    /// Fresh image from text only.
    pub async fn generate_image_from_text(
        &self,
        instruction: &str,
        aspect_ratio: &str,
        model: Option<&str>,
    ) -> Result<DecodedImage> {
        self.generate(GenerationRequest {
            operation: Operation::TextToImage {
                aspect_ratio: aspect_ratio.to_string(),
            },
            instruction: instruction.to_string(),
            source_image: None,
            model_override: model.map(String::from),
        })
        .await
    }

    /// Run an already-assembled request. The typed entry points above all
    /// funnel through here.
    pub async fn generate(&self, request: GenerationRequest) -> Result<DecodedImage> {
        let context = request.operation.context();
        let api_key = self
            .credentials
            .api_key()
            .ok_or(EditPixError::MissingApiKey)?;
        let contents = prompts::build_contents(&request)?;

        let request_id = Uuid::new_v4();
        let invoker = HttpInvoker::new(
            self.http.clone(),
            self.config.api_base.clone(),
            api_key,
            context,
            request_id,
        );

        match request.model_override.as_deref() {
            Some(model) => {
                log::info!("[{}] {} with explicit model {}", request_id, context, model);
                fallback::invoke_model(&invoker, &contents, model, context).await
            }
            None => {
                fallback::invoke_with_fallback(
                    &invoker,
                    &contents,
                    &self.config.primary_model,
                    &self.config.fallback_model,
                    context,
                )
                .await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredential;

    fn client(key: &str) -> GeminiClient {
        GeminiClient::new(
            GeminiConfig::default(),
            Arc::new(StaticCredential::new(key)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn missing_credential_fails_before_any_network_call() {
        let err = client("")
            .generate_image_from_text("a lighthouse at dusk", "1:1", None)
            .await
            .unwrap_err();
        assert!(matches!(err, EditPixError::MissingApiKey));
    }

    #[tokio::test]
    async fn invalid_request_fails_before_any_network_call() {
        let err = client("some-key")
            .generate(GenerationRequest {
                operation: Operation::Filter,
                instruction: "teal and orange".to_string(),
                source_image: None,
                model_override: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, EditPixError::InvalidRequest(_)));
    }
}
