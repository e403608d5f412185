use super::client::GeminiHttpClient;
use super::types::{
    unrestricted_safety_settings, Content, GenerateContentResponse, Part, SafetySetting,
};
use crate::ai::PromptEnhancementService;
use crate::{prompts, Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize)]
struct EnhanceRequest {
    contents: Vec<Content>,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

/// Prompt-enhancement client backed by Gemini's `generateContent` endpoint.
///
/// The consumer only needs the final reply string, so no streaming is used.
#[derive(Debug)]
pub struct GeminiChatClient {
    http: GeminiHttpClient,
}

impl GeminiChatClient {
    pub fn new(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new(api_key, model, Duration::from_secs(30), client),
        }
    }

    fn extract_text(response: &GenerateContentResponse) -> Option<String> {
        response.candidates.first().and_then(|c| {
            c.content.parts.iter().find_map(|p| match p {
                Part::Text { text } => Some(text.clone()),
                Part::InlineData { .. } => None,
            })
        })
    }
}

#[cfg(test)]
super::impl_with_gemini_base_url!(GeminiChatClient);

#[async_trait]
impl PromptEnhancementService for GeminiChatClient {
    async fn enhance(&self, raw_prompt: &str) -> Result<String> {
        let full_prompt = prompts::render(prompts::PROMPT_ENHANCEMENT, &[("prompt", raw_prompt)]);

        let request = EnhanceRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part::Text { text: full_prompt }],
            }],
            safety_settings: unrestricted_safety_settings(),
        };

        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        Self::extract_text(&response)
            .ok_or_else(|| Error::AiProvider("No text in Gemini chat response".to_string()))
    }
}
