//! AI service integration for prompt enhancement and image generation
//!
//! Provides the service seams for the two hosted-model calls the
//! application makes: refining a raw idea into a photographic prompt and
//! rendering a finished prompt into an image.

pub mod catalog;
pub mod gemini;
pub mod mime;
pub mod mock;
pub mod vertex;

pub use catalog::ServiceCatalog;
pub use gemini::{GeminiChatClient, GeminiImageClient};
pub use mock::{MockEnhancementClient, MockImageGenerationClient};
pub use vertex::VertexImagenClient;

use crate::models::GeneratedImage;
use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PromptEnhancementService: Send + Sync + std::fmt::Debug {
    /// Turn a terse user idea into a structured photographic prompt.
    async fn enhance(&self, raw_prompt: &str) -> Result<String>;
}

#[async_trait]
pub trait ImageGenerationService: Send + Sync + std::fmt::Debug {
    /// Render a finalized prompt into a displayable image.
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
}
