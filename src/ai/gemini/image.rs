use super::client::GeminiHttpClient;
use super::types::{Content, GenerateContentResponse, Part};
use crate::ai::{mime, ImageGenerationService};
use crate::models::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ImageRequest {
    contents: Vec<Content>,
}

/// Image-generation client backed by Gemini's `generateContent` endpoint.
#[derive(Debug)]
pub struct GeminiImageClient {
    http: GeminiHttpClient,
}

impl GeminiImageClient {
    pub fn new(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, Duration::from_secs(120), client),
        }
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiImageClient);

#[async_trait]
impl ImageGenerationService for GeminiImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = ImageRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        // First inline-data part wins; any remaining parts are ignored.
        let inline = response
            .candidates
            .first()
            .and_then(|c| {
                c.content.parts.iter().find_map(|p| match p {
                    Part::InlineData { inline_data } => Some(inline_data),
                    _ => None,
                })
            })
            .ok_or(Error::NoImageData)?;

        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&inline.data)
            .map_err(|e| Error::AiProvider(format!("Failed to decode Gemini base64 image: {}", e)))?;

        let mime_type = if inline.mime_type.is_empty() {
            mime::detect_image_mime(&bytes).to_string()
        } else {
            inline.mime_type.clone()
        };

        tracing::debug!("Gemini returned image with mime_type: {}", mime_type);

        Ok(GeneratedImage::new(mime_type, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::gemini::test_support;
    use wiremock::{MockServer, ResponseTemplate};

    const DEFAULT_MODEL: &str = "gemini-2.5-flash-image-preview";

    fn make_client(server: &MockServer) -> GeminiImageClient {
        GeminiImageClient::new(
            "key".to_string(),
            DEFAULT_MODEL.to_string(),
            reqwest::Client::new(),
        )
        .with_base_url(server.uri())
    }

    fn b64(bytes: &[u8]) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    #[tokio::test]
    async fn test_generate_image_parses_inline_data() {
        let server = MockServer::start().await;

        let fake_image = vec![0x89, 0x50, 0x4E, 0x47];

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": {
                                "mimeType": "image/png",
                                "data": b64(&fake_image)
                            }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let image = client.generate_image("a cat").await.unwrap();
        assert_eq!(image.bytes, fake_image);
        assert_eq!(image.mime_type, "image/png");
    }

    #[tokio::test]
    async fn test_generate_image_takes_first_inline_part_among_text_parts() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "here is your image" },
                            { "inlineData": { "mimeType": "image/jpeg", "data": b64(&[1, 2]) } },
                            { "inlineData": { "mimeType": "image/png", "data": b64(&[3, 4]) } }
                        ]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let image = client.generate_image("a cat").await.unwrap();
        assert_eq!(image.bytes, vec![1, 2]);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_generate_image_with_no_inline_parts_is_no_image_data() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "no image here" }] }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, Error::NoImageData));
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_generate_image_rejects_invalid_base64() {
        let server = MockServer::start().await;

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{
                            "inlineData": {
                                "mimeType": "image/png",
                                "data": "!!!invalid-base64!!!"
                            }
                        }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }

    #[tokio::test]
    async fn test_missing_mime_type_falls_back_to_sniffing() {
        let server = MockServer::start().await;

        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A];

        test_support::post_path_regex(test_support::GENERATE_CONTENT_PATH_REGEX)
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "candidates": [{
                    "content": {
                        "parts": [{ "inlineData": { "data": b64(&png) } }]
                    }
                }]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let image = client.generate_image("a cat").await.unwrap();
        assert_eq!(image.mime_type, "image/png");
    }
}
