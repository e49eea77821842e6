use thiserror::Error;

/// Failure surface of the generation core.
///
/// Every variant reaches the caller as a user-visible message; nothing is
/// swallowed. `AuthOrQuota` failures are caller-correctable and are never
/// retried against another model.
#[derive(Debug, Error)]
pub enum EditPixError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("No API key available. Add a key before generating.")]
    MissingApiKey,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The prompt itself was rejected before any candidate was produced.
    #[error("Generation Blocked: {0}")]
    BlockedPrompt(String),

    /// A candidate was produced but flagged by the safety filter.
    #[error("Safety Block: {0}")]
    UnsafeContent(String),

    /// The model produced content too similar to existing works.
    #[error("Copyright Protection: {0}")]
    Recitation(String),

    /// Generation stopped for a reason other than a normal finish.
    #[error("Generation Interrupted: {0}")]
    Interrupted(String),

    /// Authentication, permission, quota or model-identifier failure.
    /// Carries the upstream message verbatim.
    #[error("{0}")]
    AuthOrQuota(String),

    #[error("System Error: {0}")]
    EmptyResponse(String),

    /// The model explained itself in text instead of returning an image.
    #[error("Unexpected text response: {0}")]
    UnexpectedText(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Message markers that identify a failure a second model cannot fix.
const NO_FALLBACK_MARKERS: &[&str] = &[
    "permission",
    "unauthenticated",
    "unauthorized",
    "api key",
    "api_key_invalid",
    "quota",
    "resource_exhausted",
    "not_found",
    "not found",
];

impl EditPixError {
    /// True when retrying with a different model cannot help: the caller
    /// has to fix credentials, billing or the model identifier first.
    pub fn is_caller_correctable(&self) -> bool {
        match self {
            EditPixError::AuthOrQuota(_) | EditPixError::MissingApiKey => true,
            EditPixError::Transport(msg) => {
                let msg = msg.to_lowercase();
                NO_FALLBACK_MARKERS.iter().any(|m| msg.contains(m))
            }
            _ => false,
        }
    }

    /// Stable slug for log lines and UI mapping.
    pub fn category(&self) -> &'static str {
        match self {
            EditPixError::Config(_) => "config",
            EditPixError::MissingApiKey => "missing-api-key",
            EditPixError::InvalidRequest(_) => "invalid-request",
            EditPixError::BlockedPrompt(_) => "blocked-prompt",
            EditPixError::UnsafeContent(_) => "unsafe-content",
            EditPixError::Recitation(_) => "recitation",
            EditPixError::Interrupted(_) => "other-interruption",
            EditPixError::AuthOrQuota(_) => "auth-or-quota",
            EditPixError::EmptyResponse(_) => "empty-response",
            EditPixError::UnexpectedText(_) => "unexpected-text",
            EditPixError::Transport(_) => "transport",
        }
    }
}

pub type Result<T> = std::result::Result<T, EditPixError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_failures_are_caller_correctable() {
        let err = EditPixError::Transport(
            "model gemini-3-pro-image failed for edit: PERMISSION_DENIED".into(),
        );
        assert!(err.is_caller_correctable());
    }

    #[test]
    fn service_outages_are_not_caller_correctable() {
        let err = EditPixError::Transport(
            "model gemini-3-pro-image failed for edit: 503 Service Unavailable".into(),
        );
        assert!(!err.is_caller_correctable());
    }

    #[test]
    fn auth_variant_short_circuits_regardless_of_message() {
        assert!(EditPixError::AuthOrQuota("429 Too Many Requests".into()).is_caller_correctable());
    }

    #[test]
    fn decode_failures_never_short_circuit() {
        assert!(!EditPixError::BlockedPrompt("SAFETY".into()).is_caller_correctable());
        assert!(!EditPixError::EmptyResponse("no data".into()).is_caller_correctable());
    }

    #[test]
    fn auth_message_is_preserved_verbatim() {
        let err = EditPixError::AuthOrQuota("PERMISSION_DENIED: key lacks access".into());
        assert_eq!(err.to_string(), "PERMISSION_DENIED: key lacks access");
    }
}
