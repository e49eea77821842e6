use editpix::{logger, EnvCredential, GeminiClient, GeminiConfig};
use std::fs;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenv::dotenv();

    logger::init_with_config(logger::LoggerConfig::development().with_prefix("editpix"))?;

    let config = GeminiConfig::from_env();
    log::info!(
        "models: primary {} / fallback {}",
        config.primary_model,
        config.fallback_model
    );

    let client = GeminiClient::new(config, Arc::new(EnvCredential::new()))?;

    let prompt = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "A lighthouse on a basalt coast at dusk".to_string());
    log::info!("generating: {}", prompt);

    match client.generate_image_from_text(&prompt, "16:9", None).await {
        Ok(image) => {
            let filename = format!("generated_{}.png", chrono::Utc::now().timestamp());
            fs::write(&filename, image.to_bytes()?)?;
            log::info!("saved {} ({} base64 chars)", filename, image.data.len());
        }
        Err(e) => {
            log::error!("generation failed ({}): {}", e.category(), e);
            std::process::exit(1);
        }
    }

    Ok(())
}
