//! Configuration-bound provider catalog.
//!
//! Provider clients are constructed once at startup from validated
//! settings and injected wherever a service is needed, so a missing
//! credential fails requests without any live network involvement.

use super::{
    GeminiChatClient, GeminiImageClient, ImageGenerationService, PromptEnhancementService,
    VertexImagenClient,
};
use crate::models::{Config, ModelId};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::info;

/// Process-wide bundle of provider clients, keyed by capability.
///
/// Which entries exist is decided once, from deployment configuration:
/// the Gemini paths require `GEMINI_API_KEY`; the Imagen path additionally
/// requires `GOOGLE_CLOUD_PROJECT`. An absent entry surfaces as a
/// [`Error::Configuration`] or [`Error::NotImplemented`] failure at the
/// accessor, never as a half-configured client.
pub struct ServiceCatalog {
    enhancement: Option<Arc<dyn PromptEnhancementService>>,
    flash_image: Option<Arc<dyn ImageGenerationService>>,
    imagen: Option<Arc<dyn ImageGenerationService>>,
}

impl ServiceCatalog {
    /// Build the catalog from environment configuration and a shared HTTP
    /// connection pool.
    pub fn from_config(config: &Config, http_client: reqwest::Client) -> Self {
        let mut catalog = Self {
            enhancement: None,
            flash_image: None,
            imagen: None,
        };

        let Some(api_key) = config.gemini_api_key.clone() else {
            info!("GEMINI_API_KEY not set; all generation requests will fail with a configuration error");
            return catalog;
        };

        info!("Chat provider: Gemini (model: {})", config.chat_model);
        catalog.enhancement = Some(Arc::new(GeminiChatClient::new(
            api_key.clone(),
            config.chat_model.clone(),
            http_client.clone(),
        )));

        info!(
            "Image provider: Gemini (model: {})",
            ModelId::GEMINI_FLASH_IMAGE
        );
        catalog.flash_image = Some(Arc::new(GeminiImageClient::new(
            api_key.clone(),
            ModelId::GEMINI_FLASH_IMAGE.to_string(),
            http_client.clone(),
        )));

        match config.google_cloud_project.clone() {
            Some(project) => {
                info!(
                    "Image provider: Vertex AI (model: {}, project: {}, location: {})",
                    ModelId::IMAGEN_4,
                    project,
                    config.google_cloud_location
                );
                catalog.imagen = Some(Arc::new(VertexImagenClient::new(
                    api_key,
                    project,
                    config.google_cloud_location.clone(),
                    ModelId::IMAGEN_4.to_string(),
                    http_client,
                )));
            }
            None => {
                info!(
                    "GOOGLE_CLOUD_PROJECT not set; {} requests will return not-implemented",
                    ModelId::IMAGEN_4
                );
            }
        }

        catalog
    }

    /// Build a catalog from concrete service instances.
    ///
    /// This is primarily useful for tests and harnesses that need to
    /// inject mocks.
    pub fn with_services(
        enhancement: Option<Arc<dyn PromptEnhancementService>>,
        flash_image: Option<Arc<dyn ImageGenerationService>>,
        imagen: Option<Arc<dyn ImageGenerationService>>,
    ) -> Self {
        Self {
            enhancement,
            flash_image,
            imagen,
        }
    }

    fn missing_credential() -> Error {
        Error::Configuration("GEMINI_API_KEY is not set".to_string())
    }

    pub fn enhancement(&self) -> Result<Arc<dyn PromptEnhancementService>> {
        self.enhancement.clone().ok_or_else(Self::missing_credential)
    }

    pub fn image_generation(&self, model: ModelId) -> Result<Arc<dyn ImageGenerationService>> {
        // Credential gate applies to every model, ahead of dispatch.
        let flash = self.flash_image.clone().ok_or_else(Self::missing_credential)?;

        match model {
            ModelId::GeminiFlashImage => Ok(flash),
            ModelId::Imagen4 => self
                .imagen
                .clone()
                .ok_or_else(|| Error::NotImplemented("Imagen".to_string())),
        }
    }
}
