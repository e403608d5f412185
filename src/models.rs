//! Data models and structures
//!
//! Defines configuration, model identifiers, the HTTP wire types, and the
//! generated-image payload shared across provider clients.

use serde::{Deserialize, Serialize};

/// Hosted image models selectable per generation request.
///
/// The wire identifiers are part of the public API contract and must not
/// change independently of the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelId {
    GeminiFlashImage,
    Imagen4,
}

impl ModelId {
    pub const GEMINI_FLASH_IMAGE: &'static str = "gemini-2.5-flash-image-preview";
    pub const IMAGEN_4: &'static str = "imagen-4.0-generate-001";

    /// Parse a wire identifier. Returns `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            Self::GEMINI_FLASH_IMAGE => Some(Self::GeminiFlashImage),
            Self::IMAGEN_4 => Some(Self::Imagen4),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GeminiFlashImage => Self::GEMINI_FLASH_IMAGE,
            Self::Imagen4 => Self::IMAGEN_4,
        }
    }
}

/// Binary image payload plus its declared media type, as returned by a
/// provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl GeneratedImage {
    pub fn new(mime_type: String, bytes: Vec<u8>) -> Self {
        Self { mime_type, bytes }
    }

    /// Encode the payload as a `data:<mime>;base64,<data>` URI.
    pub fn to_data_uri(&self) -> String {
        use base64::Engine as _;
        format!(
            "data:{};base64,{}",
            self.mime_type,
            base64::engine::general_purpose::STANDARD.encode(&self.bytes)
        )
    }
}

// HTTP API request/response models

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateImageRequest {
    pub prompt: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateImageResponse {
    pub image_url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

// Configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub google_cloud_project: Option<String>,
    pub google_cloud_location: String,
    pub chat_model: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok(),
            google_cloud_project: std::env::var("GOOGLE_CLOUD_PROJECT").ok(),
            google_cloud_location: std::env::var("GOOGLE_CLOUD_LOCATION")
                .unwrap_or_else(|_| "us-central1".to_string()),
            chat_model: std::env::var("GEMINI_CHAT_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
        }
    }
}
