//! Builds the provider payload for each operation kind: zero or one image
//! part plus one instruction part from a fixed per-kind template.

use crate::error::Result;
use crate::models::{Content, GenerationRequest, InlineData, Operation, Part};

/// Encode a request into the `contents` payload sent to the model.
pub fn build_contents(request: &GenerationRequest) -> Result<Vec<Content>> {
    request.validate()?;

    let mut parts = Vec::with_capacity(2);
    if let Some(image) = &request.source_image {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: Some(image.mime_type.clone()),
                data: image.data.clone(),
            },
        });
    }
    parts.push(Part::Text {
        text: instruction_text(&request.operation, &request.instruction),
    });

    Ok(vec![Content { parts }])
}

fn instruction_text(operation: &Operation, instruction: &str) -> String {
    match operation {
        Operation::Edit { hotspot } => format!(
            "ACT AS A SENIOR VFX COMPOSITOR.\n\
             Task: Perform a hyper-realistic localized edit at (x: {}, y: {}).\n\
             Request: \"{}\"\n\
             Technical Requirements:\n\
             - Use sub-pixel accuracy to blend the edit with the original grain structure.\n\
             - Match global illumination, light temperature, and shadow density.\n\
             Output: Return ONLY the raw processed image buffer. No text.",
            hotspot.x, hotspot.y, instruction
        ),
        Operation::Filter => format!(
            "ACT AS A MASTER COLORIST. Apply cinematic grade: \"{}\"\n\
             Guidelines: Advanced Tonal Mapping, Rec.2020 fidelity, 70mm IMAX aesthetic.\n\
             Output: Return ONLY the final color-graded image.",
            instruction
        ),
        Operation::Adjust => format!(
            "ACT AS A HIGH-END DIGITAL RETOUCHER. Adjustment: \"{}\"\n\
             Standards: Preserve 100% realistic texture, HDR detail retention, 4K clarity.\n\
             Output: Return ONLY the adjusted master file.",
            instruction
        ),
        Operation::TextToImage { aspect_ratio } => format!(
            "MASTERPIECE PHOTOGRAPHY: \"{}\"\n\
             Specs: 35mm anamorphic lens, f/1.8, volumetric lighting, hyper-detailed textures, 8k UHD.\n\
             Aspect Ratio: {}.\n\
             Output: Return ONLY the high-fidelity masterpiece image. No text.",
            instruction, aspect_ratio
        ),
    }
}
