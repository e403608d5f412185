//! Session orchestration for the prompt-refinement-to-image pipeline.
//!
//! [`Studio`] wires the conversation and creation state machines to the
//! provider catalog: one instance is one user session, with a single
//! logical writer — `&mut self` serializes the two suspension points, so a
//! second submission or generation cannot start while one is in flight.

use crate::ai::ServiceCatalog;
use crate::conversation::Conversation;
use crate::creation::CreationState;
use crate::models::ModelId;
use crate::Result;
use tracing::{info, warn};

pub struct Studio {
    services: ServiceCatalog,
    conversation: Conversation,
    creation: CreationState,
    model: ModelId,
}

impl Studio {
    pub fn new(services: ServiceCatalog) -> Self {
        Self {
            services,
            conversation: Conversation::new(),
            creation: CreationState::new(),
            model: ModelId::GeminiFlashImage,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn creation(&self) -> &CreationState {
        &self.creation
    }

    pub fn model(&self) -> ModelId {
        self.model
    }

    pub fn select_model(&mut self, model: ModelId) {
        self.model = model;
    }

    /// Submit a raw idea for enhancement. On success the assistant reply is
    /// appended to the transcript (and becomes the final prompt); on any
    /// failure the conversation returns to idle and the error is surfaced.
    pub async fn submit(&mut self, text: &str) -> Result<String> {
        self.conversation.submit(text)?;

        let enhancer = match self.services.enhancement() {
            Ok(service) => service,
            Err(err) => {
                self.conversation.fail();
                return Err(err);
            }
        };

        match enhancer.enhance(text).await {
            Ok(reply) => {
                info!("Enhanced prompt ({} chars)", reply.len());
                Ok(self.conversation.complete(reply).content.clone())
            }
            Err(err) => {
                warn!("Prompt enhancement failed: {}", err);
                self.conversation.fail();
                Err(err)
            }
        }
    }

    /// Generate an image from the current final prompt with the selected
    /// model. Returns the data URI recorded in the history on success; on
    /// failure the message is stored verbatim and the history is untouched.
    pub async fn generate(&mut self) -> Result<String> {
        let prompt = self.creation.begin(self.conversation.final_prompt())?;

        let service = match self.services.image_generation(self.model) {
            Ok(service) => service,
            Err(err) => {
                self.creation.fail(err.to_string());
                return Err(err);
            }
        };

        match service.generate_image(&prompt).await {
            Ok(image) => {
                info!("Generated image ({} bytes)", image.bytes.len());
                Ok(self.creation.succeed(image.to_data_uri()).src.clone())
            }
            Err(err) => {
                warn!("Image generation failed: {}", err);
                self.creation.fail(err.to_string());
                Err(err)
            }
        }
    }

    /// Start over: clears the transcript and the creation canvas. The
    /// generation history is retained for the session.
    pub fn new_creation(&mut self) {
        self.conversation.reset();
        self.creation.reset_canvas();
    }
}
