//! Creation state machine for the image-generation pipeline.
//!
//! Tracks the in-flight/success/error state of the current generation and
//! accumulates the session's history of finished images.

use crate::{Error, Result};

/// One past generation: the data URI and the exact prompt that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub src: String,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreationPhase {
    Idle,
    Generating,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub struct CreationState {
    phase: CreationPhase,
    image_url: Option<String>,
    error: Option<String>,
    // Captured at `begin` so a later conversation edit cannot change what
    // gets recorded against the generated image.
    pending_prompt: Option<String>,
    // Newest first, append-only, never deduplicated.
    history: Vec<HistoryEntry>,
}

impl Default for CreationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CreationState {
    pub fn new() -> Self {
        Self {
            phase: CreationPhase::Idle,
            image_url: None,
            error: None,
            pending_prompt: None,
            history: Vec::new(),
        }
    }

    pub fn phase(&self) -> CreationPhase {
        self.phase
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Guard for the generate trigger: a non-empty final prompt and no
    /// generation currently in flight.
    pub fn can_generate(&self, final_prompt: &str) -> bool {
        !final_prompt.is_empty() && self.phase != CreationPhase::Generating
    }

    /// Enter `Generating`: clears the previous image and error and snapshots
    /// the prompt at this call boundary. Returns the snapshot the caller
    /// must dispatch, so a concurrent conversation edit cannot leak in.
    pub fn begin(&mut self, final_prompt: &str) -> Result<String> {
        if final_prompt.is_empty() {
            return Err(Error::Invariant(
                "cannot generate without a final prompt".to_string(),
            ));
        }
        if self.phase == CreationPhase::Generating {
            return Err(Error::Invariant(
                "a generation is already in flight".to_string(),
            ));
        }

        self.phase = CreationPhase::Generating;
        self.image_url = None;
        self.error = None;
        self.pending_prompt = Some(final_prompt.to_string());
        Ok(final_prompt.to_string())
    }

    /// Record a finished image and prepend it to the history.
    pub fn succeed(&mut self, image_url: String) -> &HistoryEntry {
        let prompt = self.pending_prompt.take().unwrap_or_default();
        self.phase = CreationPhase::Succeeded;
        self.image_url = Some(image_url.clone());
        self.history.insert(
            0,
            HistoryEntry {
                src: image_url,
                prompt,
            },
        );
        &self.history[0]
    }

    /// Record a failure message verbatim; the history is untouched.
    pub fn fail(&mut self, message: String) {
        self.pending_prompt = None;
        self.phase = CreationPhase::Failed;
        self.error = Some(message);
    }

    /// Clear the canvas (image, error, phase) for a fresh creation. The
    /// history survives for the session.
    pub fn reset_canvas(&mut self) {
        self.phase = CreationPhase::Idle;
        self.image_url = None;
        self.error = None;
        self.pending_prompt = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_can_generate_requires_prompt_and_idle_pipeline() {
        let mut state = CreationState::new();
        assert!(!state.can_generate(""));
        assert!(state.can_generate("a prompt"));

        state.begin("a prompt").unwrap();
        assert!(!state.can_generate("a prompt"));
    }

    #[test]
    fn test_begin_rejects_empty_prompt() {
        let mut state = CreationState::new();
        let err = state.begin("").unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
        assert_eq!(state.phase(), CreationPhase::Idle);
    }

    #[test]
    fn test_begin_rejects_concurrent_generation() {
        let mut state = CreationState::new();
        state.begin("a prompt").unwrap();

        let err = state.begin("another").unwrap_err();
        assert!(matches!(err, Error::Invariant(_)));
    }

    #[test]
    fn test_begin_clears_previous_outcome() {
        let mut state = CreationState::new();
        state.begin("first").unwrap();
        state.fail("boom".to_string());
        assert_eq!(state.error(), Some("boom"));

        state.begin("second").unwrap();
        assert_eq!(state.error(), None);
        assert_eq!(state.image_url(), None);
        assert_eq!(state.phase(), CreationPhase::Generating);
    }

    #[test]
    fn test_succeed_prepends_history_with_snapshot_prompt() {
        let mut state = CreationState::new();

        state.begin("first prompt").unwrap();
        state.succeed("data:image/png;base64,AA==".to_string());

        state.begin("second prompt").unwrap();
        state.succeed("data:image/png;base64,BB==".to_string());

        let history = state.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].prompt, "second prompt");
        assert_eq!(history[0].src, "data:image/png;base64,BB==");
        assert_eq!(history[1].prompt, "first prompt");
    }

    #[test]
    fn test_fail_leaves_history_untouched() {
        let mut state = CreationState::new();
        state.begin("a prompt").unwrap();
        state.succeed("data:image/png;base64,AA==".to_string());

        state.begin("a prompt").unwrap();
        state.fail("quota exceeded".to_string());

        assert_eq!(state.phase(), CreationPhase::Failed);
        assert_eq!(state.error(), Some("quota exceeded"));
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_failed_and_succeeded_are_not_terminal() {
        let mut state = CreationState::new();
        state.begin("p").unwrap();
        state.fail("boom".to_string());
        assert!(state.begin("p").is_ok());
        state.succeed("data:...".to_string());
        assert!(state.begin("p").is_ok());
    }

    #[test]
    fn test_identical_prompts_create_independent_entries() {
        let mut state = CreationState::new();
        for _ in 0..2 {
            state.begin("same prompt").unwrap();
            state.succeed("data:image/png;base64,AA==".to_string());
        }
        assert_eq!(state.history().len(), 2);
        assert_eq!(state.history()[0], state.history()[1]);
    }

    #[test]
    fn test_reset_canvas_keeps_history() {
        let mut state = CreationState::new();
        state.begin("p").unwrap();
        state.succeed("data:...".to_string());

        state.reset_canvas();
        assert_eq!(state.phase(), CreationPhase::Idle);
        assert_eq!(state.image_url(), None);
        assert_eq!(state.history().len(), 1);
    }
}
