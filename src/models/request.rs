use crate::error::{EditPixError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Pixel coordinate a localized edit is centered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotspot {
    pub x: u32,
    pub y: u32,
}

/// The operation being requested, carrying the data only that kind needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Localized edit centered on a hotspot.
    Edit { hotspot: Hotspot },
    /// Global stylistic filter over the whole frame.
    Filter,
    /// Tonal adjustment preserving texture and composition.
    Adjust,
    /// Fresh image from text only.
    TextToImage { aspect_ratio: String },
}

impl Operation {
    /// Short label used in error messages and log lines.
    pub fn context(&self) -> &'static str {
        match self {
            Operation::Edit { .. } => "edit",
            Operation::Filter => "filter",
            Operation::Adjust => "adjustment",
            Operation::TextToImage { .. } => "image generation",
        }
    }

    pub fn needs_source_image(&self) -> bool {
        !matches!(self, Operation::TextToImage { .. })
    }
}

/// An input image already encoded for the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub mime_type: String,
    /// Base64 payload, no data-URI prefix.
    pub data: String,
}

impl SourceImage {
    /// Encode raw image bytes.
    pub fn from_bytes(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        SourceImage {
            mime_type: mime_type.into(),
            data: STANDARD.encode(bytes),
        }
    }

    pub fn from_base64(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        SourceImage {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }

    /// Parse a `data:<mime>;base64,<payload>` string. Falls back to
    /// `image/jpeg` when the mime segment is missing, matching how the
    /// editor reads files it cannot identify.
    pub fn from_data_uri(uri: &str) -> Result<Self> {
        let rest = uri
            .strip_prefix("data:")
            .ok_or_else(|| EditPixError::InvalidRequest("not a data URI".to_string()))?;
        let (header, data) = rest
            .split_once(',')
            .ok_or_else(|| EditPixError::InvalidRequest("data URI has no payload".to_string()))?;
        let mime_type = header
            .strip_suffix(";base64")
            .filter(|m| !m.is_empty())
            .unwrap_or("image/jpeg");
        Ok(SourceImage {
            mime_type: mime_type.to_string(),
            data: data.to_string(),
        })
    }
}

/// A fully-specified generation request, one per user action.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub operation: Operation,
    pub instruction: String,
    pub source_image: Option<SourceImage>,
    pub model_override: Option<String>,
}

impl GenerationRequest {
    /// Presence invariants: every kind except text-to-image needs a source
    /// image; text-to-image must not carry one.
    pub fn validate(&self) -> Result<()> {
        if self.operation.needs_source_image() && self.source_image.is_none() {
            return Err(EditPixError::InvalidRequest(format!(
                "{} requires a source image",
                self.operation.context()
            )));
        }
        if !self.operation.needs_source_image() && self.source_image.is_some() {
            return Err(EditPixError::InvalidRequest(
                "image generation does not take a source image".to_string(),
            ));
        }
        Ok(())
    }
}
