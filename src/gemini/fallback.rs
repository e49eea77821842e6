//! Primary/secondary model orchestration.
//!
//! One generation call is at most two strictly sequential attempts: the
//! secondary model is tried only after the primary resolves, and only when
//! the primary's failure is one a different model could plausibly fix.

use crate::error::{EditPixError, Result};
use crate::gemini::decoder::decode_response;
use crate::gemini::invoker::ModelInvoker;
use crate::models::{Content, DecodedImage};

/// Single-attempt path: the caller named a specific model, so its failure
/// surfaces as-is with no fallback.
pub async fn invoke_model(
    invoker: &dyn ModelInvoker,
    contents: &[Content],
    model_id: &str,
    context: &str,
) -> Result<DecodedImage> {
    let response = invoker.call(contents, model_id).await?;
    decode_response(&response, context)
}

/// Try the primary model, falling back to the secondary on retryable
/// failures. Caller-correctable failures (auth, permission, quota, unknown
/// model) surface directly instead of being hidden behind a fallback
/// response.
pub async fn invoke_with_fallback(
    invoker: &dyn ModelInvoker,
    contents: &[Content],
    primary_model: &str,
    fallback_model: &str,
    context: &str,
) -> Result<DecodedImage> {
    let primary_err = match invoker.call(contents, primary_model).await {
        Ok(response) => return decode_response(&response, context),
        Err(err) => err,
    };

    if primary_err.is_caller_correctable() {
        return Err(primary_err);
    }

    log::warn!(
        "primary model {} failed for {} ({}): {}",
        primary_model,
        context,
        primary_err.category(),
        primary_err
    );
    log::info!("retrying {} with fallback model {}", context, fallback_model);

    match invoker.call(contents, fallback_model).await {
        Ok(response) => decode_response(&response, context),
        Err(fallback_err) => Err(EditPixError::Transport(format!(
            "Both models failed for {}. Primary ({}): {} Fallback ({}): {}",
            context, primary_model, primary_err, fallback_model, fallback_err
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Candidate, GenerateContentResponse, InlineData, Part};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted invoker: pops one outcome per call and records which model
    /// each call targeted.
    struct ScriptedInvoker {
        outcomes: Mutex<Vec<Result<GenerateContentResponse>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedInvoker {
        fn new(outcomes: Vec<Result<GenerateContentResponse>>) -> Self {
            ScriptedInvoker {
                outcomes: Mutex::new(outcomes),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelInvoker for ScriptedInvoker {
        async fn call(
            &self,
            _contents: &[Content],
            model_id: &str,
        ) -> Result<GenerateContentResponse> {
            self.calls.lock().unwrap().push(model_id.to_string());
            self.outcomes.lock().unwrap().remove(0)
        }
    }

    fn image_response(data: &str) -> GenerateContentResponse {
        GenerateContentResponse {
            prompt_feedback: None,
            candidates: vec![Candidate {
                finish_reason: Some("STOP".to_string()),
                content: Some(crate::models::Content {
                    parts: vec![Part::InlineData {
                        inline_data: InlineData {
                            mime_type: Some("image/png".to_string()),
                            data: data.to_string(),
                        },
                    }],
                }),
            }],
        }
    }

    #[tokio::test]
    async fn primary_success_never_touches_the_fallback() {
        let invoker = ScriptedInvoker::new(vec![Ok(image_response("primary"))]);
        let image = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "edit")
            .await
            .unwrap();
        assert_eq!(image.data, "primary");
        assert_eq!(invoker.calls(), vec!["model-a"]);
    }

    #[tokio::test]
    async fn permission_failure_short_circuits_with_message_intact() {
        let message = "model model-a failed for edit: 403 PERMISSION_DENIED: key lacks access";
        let invoker = ScriptedInvoker::new(vec![Err(EditPixError::AuthOrQuota(
            message.to_string(),
        ))]);
        let err = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "edit")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), message);
        assert_eq!(invoker.calls(), vec!["model-a"]);
    }

    #[tokio::test]
    async fn transport_message_markers_also_short_circuit() {
        let invoker = ScriptedInvoker::new(vec![Err(EditPixError::Transport(
            "model model-a failed for edit: PERMISSION_DENIED".to_string(),
        ))]);
        let err = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "edit")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("PERMISSION_DENIED"));
        assert_eq!(invoker.calls().len(), 1);
    }

    #[tokio::test]
    async fn service_outage_falls_back_and_returns_the_second_image() {
        let invoker = ScriptedInvoker::new(vec![
            Err(EditPixError::Transport(
                "model model-a failed for edit: 503 Service Unavailable".to_string(),
            )),
            Ok(image_response("from-fallback")),
        ]);
        let image = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "edit")
            .await
            .unwrap();
        assert_eq!(image.data, "from-fallback");
        assert_eq!(invoker.calls(), vec!["model-a", "model-b"]);
    }

    #[tokio::test]
    async fn both_failures_are_combined_into_one_transport_error() {
        let invoker = ScriptedInvoker::new(vec![
            Err(EditPixError::Transport("A".to_string())),
            Err(EditPixError::Transport("B".to_string())),
        ]);
        let err = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "filter")
            .await
            .unwrap_err();
        match &err {
            EditPixError::Transport(msg) => {
                assert!(msg.contains("A"));
                assert!(msg.contains("B"));
                assert!(msg.contains("model-a"));
                assert!(msg.contains("model-b"));
            }
            other => panic!("expected Transport, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn explicit_model_choice_never_falls_back() {
        let invoker = ScriptedInvoker::new(vec![Err(EditPixError::Transport(
            "model custom failed for edit: 503 Service Unavailable".to_string(),
        ))]);
        let err = invoke_model(&invoker, &[], "custom", "edit").await.unwrap_err();
        assert!(matches!(err, EditPixError::Transport(_)));
        assert_eq!(invoker.calls(), vec!["custom"]);
    }

    #[tokio::test]
    async fn decode_failure_on_primary_response_does_not_fall_back() {
        // The primary call succeeded at the transport level; decoding is
        // past the point where fallback applies.
        let blocked = GenerateContentResponse {
            prompt_feedback: Some(crate::models::PromptFeedback {
                block_reason: Some("SAFETY".to_string()),
                block_reason_message: None,
            }),
            candidates: vec![],
        };
        let invoker = ScriptedInvoker::new(vec![Ok(blocked)]);
        let err = invoke_with_fallback(&invoker, &[], "model-a", "model-b", "edit")
            .await
            .unwrap_err();
        assert!(matches!(err, EditPixError::BlockedPrompt(_)));
        assert_eq!(invoker.calls(), vec!["model-a"]);
    }
}
