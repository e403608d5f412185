use crate::{Error, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Lightweight Vertex AI REST client for publisher-model `:predict` calls.
///
/// Uses API-key express mode rather than OAuth, which keeps the credential
/// surface identical to the Gemini path.
#[derive(Debug)]
pub struct VertexHttpClient {
    client: Client,
    api_key: String,
    project: String,
    location: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl VertexHttpClient {
    pub fn new(
        api_key: String,
        project: String,
        location: String,
        model: String,
        timeout: Duration,
        client: Client,
    ) -> Self {
        let base_url = format!("https://{}-aiplatform.googleapis.com", location);

        Self {
            client,
            api_key,
            project,
            location,
            model,
            base_url,
            timeout,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Calls the publisher model's `:predict` endpoint.
    pub async fn predict<Req: Serialize, Resp: DeserializeOwned>(
        &self,
        request: &Req,
    ) -> Result<Resp> {
        let url = format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:predict",
            self.base_url, self.project, self.location, self.model
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to Vertex AI: {}", e);
                e
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            tracing::error!("Vertex AI error (status {}): {}", status, error_text);
            return Err(Error::AiProvider(format!(
                "Vertex AI error (status {}): {}",
                status, error_text
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse Vertex AI response: {}\nBody: {}", e, body);
            Error::AiProvider(format!("Failed to parse Vertex AI response: {}", e))
        })
    }
}
