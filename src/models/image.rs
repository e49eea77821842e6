use crate::error::{EditPixError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};

/// Terminal artifact of a generation call: one decoded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedImage {
    pub mime_type: String,
    /// Base64 payload as returned by the model.
    pub data: String,
}

impl DecodedImage {
    /// Render as a data URI, directly usable as an image source.
    pub fn to_data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }

    /// Decode the payload back to raw image bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        STANDARD
            .decode(&self.data)
            .map_err(|e| EditPixError::Transport(format!("image payload is not valid base64: {}", e)))
    }
}
