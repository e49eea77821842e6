//! Maps a raw model response to a single decoded image or a typed failure.

use crate::error::{EditPixError, Result};
use crate::models::{DecodedImage, GenerateContentResponse, Part};

const TEXT_PREVIEW_LIMIT: usize = 240;
const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Decode a provider response. Pure over the response; `context` only
/// labels the failure messages.
///
/// Check order is fixed: explicit blocks and abnormal finish reasons are
/// reported with their specific cause before any generic no-data handling.
pub fn decode_response(response: &GenerateContentResponse, context: &str) -> Result<DecodedImage> {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            let message = feedback
                .block_reason_message
                .as_deref()
                .unwrap_or("Please rephrase your request.");
            return Err(EditPixError::BlockedPrompt(format!(
                "Your prompt triggered a {} filter. {}",
                reason, message
            )));
        }
    }

    let candidate = response.candidates.first();

    if let Some(reason) = candidate.and_then(|c| c.finish_reason.as_deref()) {
        if reason != "STOP" {
            return Err(match reason {
                "SAFETY" => EditPixError::UnsafeContent(
                    "The generated content was flagged. Try a less descriptive prompt.".to_string(),
                ),
                "RECITATION" => EditPixError::Recitation(
                    "The model produced content too similar to existing works.".to_string(),
                ),
                "OTHER" => EditPixError::Interrupted(
                    "The model struggled to render this request. Try simplifying the details."
                        .to_string(),
                ),
                other => EditPixError::Interrupted(format!("{}. Please try again.", other)),
            });
        }
    }

    let parts = candidate
        .and_then(|c| c.content.as_ref())
        .map(|content| content.parts.as_slice())
        .unwrap_or(&[]);

    if let Some(image) = parts.iter().find_map(|part| match part {
        Part::InlineData { inline_data } => Some(DecodedImage {
            mime_type: inline_data
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME.to_string()),
            data: inline_data.data.clone(),
        }),
        _ => None,
    }) {
        return Ok(image);
    }

    if let Some(text) = parts.iter().find_map(|part| match part {
        Part::Text { text } => Some(text),
        _ => None,
    }) {
        let preview: String = text.chars().take(TEXT_PREVIEW_LIMIT).collect();
        return Err(EditPixError::UnexpectedText(format!(
            "The model replied with text instead of an image for {}: \"{}\" \
             The selected model may not support this operation.",
            context, preview
        )));
    }

    Err(EditPixError::EmptyResponse(format!(
        "The model confirmed completion but did not return image data for {}.",
        context
    )))
}
