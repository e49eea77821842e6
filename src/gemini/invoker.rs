use crate::error::{EditPixError, Result};
use crate::models::{
    Content, GenerateContentRequest, GenerateContentResponse, HarmBlockThreshold, HarmCategory,
    SafetySetting,
};
use async_trait::async_trait;
use serde::Deserialize;
use uuid::Uuid;

/// One network round-trip to a named model endpoint.
///
/// The orchestration layer only talks to this trait, so tests can substitute
/// a scripted invoker and the HTTP plumbing stays in one place.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn call(&self, contents: &[Content], model_id: &str) -> Result<GenerateContentResponse>;
}

/// Invoker backed by the hosted `generateContent` REST endpoint.
///
/// Built fresh per generation call from the resolved credential, so there is
/// no shared mutable client state between calls.
pub struct HttpInvoker {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
    context: &'static str,
    request_id: Uuid,
}

impl HttpInvoker {
    pub fn new(
        http: reqwest::Client,
        api_base: String,
        api_key: String,
        context: &'static str,
        request_id: Uuid,
    ) -> Self {
        HttpInvoker {
            http,
            api_base,
            api_key,
            context,
            request_id,
        }
    }
}

/// Fixed safety-filter configuration attached to every invocation.
fn safety_settings() -> Vec<SafetySetting> {
    [
        HarmCategory::Harassment,
        HarmCategory::HateSpeech,
        HarmCategory::SexuallyExplicit,
        HarmCategory::DangerousContent,
    ]
    .into_iter()
    .map(|category| SafetySetting {
        category,
        threshold: HarmBlockThreshold::BlockOnlyHigh,
    })
    .collect()
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    error: Option<ApiErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

#[async_trait]
impl ModelInvoker for HttpInvoker {
    async fn call(&self, contents: &[Content], model_id: &str) -> Result<GenerateContentResponse> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, model_id
        );
        let body = GenerateContentRequest {
            contents: contents.to_vec(),
            safety_settings: safety_settings(),
        };

        log::info!("[{}] invoking model {} for {}", self.request_id, model_id, self.context);

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                EditPixError::Transport(format!(
                    "model {} failed for {}: {}",
                    model_id, self.context, e
                ))
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ApiErrorBody>(&raw)
                .ok()
                .and_then(|b| b.error)
                .map(|e| {
                    format!(
                        "{} {}: {}",
                        status.as_u16(),
                        e.status.unwrap_or_default(),
                        e.message.unwrap_or_default()
                    )
                })
                .unwrap_or_else(|| format!("{}: {}", status, raw.chars().take(200).collect::<String>()));
            let message = format!("model {} failed for {}: {}", model_id, self.context, detail);

            log::error!("[{}] {}", self.request_id, message);

            // 401/403/404/429: credentials, billing or the model id, never
            // retried against another model.
            return Err(match status.as_u16() {
                401 | 403 | 404 | 429 => EditPixError::AuthOrQuota(message),
                _ => EditPixError::Transport(message),
            });
        }

        response.json::<GenerateContentResponse>().await.map_err(|e| {
            EditPixError::Transport(format!(
                "model {} returned an unreadable response for {}: {}",
                model_id, self.context, e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safety_config_covers_all_four_harm_categories() {
        let settings = safety_settings();
        assert_eq!(settings.len(), 4);
        let json = serde_json::to_value(&settings).unwrap();
        for setting in json.as_array().unwrap() {
            assert_eq!(setting["threshold"], "BLOCK_ONLY_HIGH");
        }
    }

    #[test]
    fn api_error_bodies_parse() {
        let raw = r#"{"error": {"code": 403, "message": "Permission denied on resource", "status": "PERMISSION_DENIED"}}"#;
        let body: ApiErrorBody = serde_json::from_str(raw).unwrap();
        let detail = body.error.unwrap();
        assert_eq!(detail.status.as_deref(), Some("PERMISSION_DENIED"));
        assert_eq!(detail.message.as_deref(), Some("Permission denied on resource"));
    }
}
