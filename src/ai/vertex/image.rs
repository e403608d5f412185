use super::client::VertexHttpClient;
use crate::ai::{mime, ImageGenerationService};
use crate::models::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct PredictRequest {
    instances: Vec<Instance>,
    parameters: Parameters,
}

#[derive(Debug, Serialize)]
struct Instance {
    prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Parameters {
    sample_count: u32,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    #[serde(default)]
    predictions: Vec<Prediction>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Prediction {
    bytes_base64_encoded: String,
    #[serde(default)]
    mime_type: String,
}

/// Imagen client backed by the Vertex AI `:predict` endpoint.
#[derive(Debug)]
pub struct VertexImagenClient {
    http: VertexHttpClient,
}

impl VertexImagenClient {
    pub fn new(
        api_key: String,
        project: String,
        location: String,
        model: String,
        client: reqwest::Client,
    ) -> Self {
        Self {
            http: VertexHttpClient::new(
                api_key,
                project,
                location,
                model,
                Duration::from_secs(120),
                client,
            ),
        }
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }
}

#[async_trait]
impl ImageGenerationService for VertexImagenClient {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        let request = PredictRequest {
            instances: vec![Instance {
                prompt: prompt.to_string(),
            }],
            parameters: Parameters { sample_count: 1 },
        };

        let response: PredictResponse = self.http.predict(&request).await?;

        // First prediction is authoritative.
        let prediction = response.predictions.first().ok_or(Error::NoImageData)?;

        use base64::Engine as _;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(&prediction.bytes_base64_encoded)
            .map_err(|e| Error::AiProvider(format!("Failed to decode Imagen base64 image: {}", e)))?;

        let mime_type = if prediction.mime_type.is_empty() {
            mime::detect_image_mime(&bytes).to_string()
        } else {
            prediction.mime_type.clone()
        };

        tracing::debug!("Imagen returned image with mime_type: {}", mime_type);

        Ok(GeneratedImage::new(mime_type, bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PREDICT_PATH: &str =
        "/v1/projects/proj/locations/us-central1/publishers/google/models/imagen-4.0-generate-001:predict";

    fn make_client(server: &MockServer) -> VertexImagenClient {
        VertexImagenClient::new(
            "key".to_string(),
            "proj".to_string(),
            "us-central1".to_string(),
            "imagen-4.0-generate-001".to_string(),
            reqwest::Client::new(),
        )
        .with_base_url(server.uri())
    }

    fn b64(bytes: &[u8]) -> String {
        use base64::Engine as _;
        base64::engine::general_purpose::STANDARD.encode(bytes)
    }

    #[tokio::test]
    async fn test_generate_image_parses_first_prediction() {
        let server = MockServer::start().await;

        let fake_image = vec![0xFF, 0xD8, 0xFF, 0xE0];

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [
                    { "bytesBase64Encoded": b64(&fake_image), "mimeType": "image/jpeg" },
                    { "bytesBase64Encoded": b64(&[9, 9]), "mimeType": "image/png" }
                ]
            })))
            .mount(&server)
            .await;

        let client = make_client(&server);

        let image = client.generate_image("a cat").await.unwrap();
        assert_eq!(image.bytes, fake_image);
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[tokio::test]
    async fn test_request_carries_prompt_and_sample_count() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .and(body_string_contains("\"prompt\":\"a red bicycle\""))
            .and(body_string_contains("\"sampleCount\":1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "predictions": [
                    { "bytesBase64Encoded": b64(&[1]), "mimeType": "image/png" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = make_client(&server);
        client.generate_image("a red bicycle").await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_predictions_is_no_image_data() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "predictions": [] })),
            )
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, Error::NoImageData));
    }

    #[tokio::test]
    async fn test_api_error_returns_ai_provider_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(PREDICT_PATH))
            .respond_with(ResponseTemplate::new(403).set_body_string("permission denied"))
            .mount(&server)
            .await;

        let client = make_client(&server);
        let err = client.generate_image("a cat").await.unwrap_err();
        assert!(matches!(err, Error::AiProvider(_)));
    }
}
