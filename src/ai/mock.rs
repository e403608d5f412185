use super::{ImageGenerationService, PromptEnhancementService};
use crate::models::GeneratedImage;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

type Outcome<T> = std::result::Result<T, String>;

#[derive(Clone, Debug)]
pub struct MockEnhancementClient {
    responses: Arc<Mutex<Vec<Outcome<String>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockEnhancementClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_reply(self, reply: String) -> Self {
        self.responses.lock().unwrap().push(Ok(reply));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }
}

impl Default for MockEnhancementClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PromptEnhancementService for MockEnhancementClient {
    async fn enhance(&self, raw_prompt: &str) -> Result<String> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            // Default mock response, templated around the raw idea
            Ok(format!(
                "A photorealistic wide shot of {}, set in soft morning light.",
                raw_prompt
            ))
        } else {
            let index = (*count - 1) % responses.len();
            responses[index]
                .clone()
                .map_err(Error::AiProvider)
        }
    }
}

#[derive(Clone, Debug)]
pub struct MockImageGenerationClient {
    responses: Arc<Mutex<Vec<Outcome<GeneratedImage>>>>,
    call_count: Arc<Mutex<usize>>,
}

impl MockImageGenerationClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_image(self, image: GeneratedImage) -> Self {
        self.responses.lock().unwrap().push(Ok(image));
        self
    }

    pub fn with_failure(self, message: String) -> Self {
        self.responses.lock().unwrap().push(Err(message));
        self
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    /// A 1x1 valid PNG, handy as a default payload.
    pub fn tiny_png() -> Vec<u8> {
        vec![
            0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
            0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
            0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, // 1x1 pixel
            0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49,
            0x44, 0x41, // IDAT chunk
            0x54, 0x08, 0x99, 0x63, 0xF8, 0xCF, 0xC0, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0xE2,
            0x25, 0x00, 0xBC, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, // IEND chunk
            0x44, 0xAE, 0x42, 0x60, 0x82,
        ]
    }
}

impl Default for MockImageGenerationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageGenerationService for MockImageGenerationClient {
    async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage> {
        let mut count = self.call_count.lock().unwrap();
        *count += 1;

        let responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(GeneratedImage::new(
                "image/png".to_string(),
                Self::tiny_png(),
            ))
        } else {
            let index = (*count - 1) % responses.len();
            responses[index]
                .clone()
                .map_err(Error::AiProvider)
        }
    }
}
