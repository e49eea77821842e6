//! EditPix generation core.
//!
//! Turns a user intent (localized edit, global filter, tonal adjustment or
//! text-to-image) plus a locally-held credential into a single decoded
//! image from a hosted generative-image endpoint, with primary/fallback
//! model orchestration and typed response classification.
//!
//! ```no_run
//! use editpix::{EnvCredential, GeminiClient, GeminiConfig};
//! use std::sync::Arc;
//!
//! # async fn run() -> editpix::Result<()> {
//! let client = GeminiClient::new(GeminiConfig::from_env(), Arc::new(EnvCredential::new()))?;
//! let image = client
//!     .generate_image_from_text("a lighthouse on a basalt coast at dusk", "16:9", None)
//!     .await?;
//! println!("{}", image.to_data_uri());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod credentials;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod prompts;

pub use config::{GeminiConfig, FALLBACK_MODEL, PRIMARY_MODEL};
pub use credentials::{CredentialProvider, EnvCredential, StaticCredential, StoredCredential};
pub use error::{EditPixError, Result};
pub use gemini::{GeminiClient, ModelInvoker};
pub use models::{DecodedImage, GenerationRequest, Hotspot, Operation, SourceImage};
