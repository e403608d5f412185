//! Prompt studio for the Gemini 2.5 Flash image model - iteratively refine
//! an image idea through a chat assistant, then render the finished prompt
//! with a hosted image model and browse the results.
//!
//! The library holds the whole pipeline: provider clients, the
//! conversation and creation state machines, the per-session orchestrator,
//! and the HTTP API the browser client calls.

pub mod ai;
pub mod conversation;
pub mod creation;
pub mod error;
pub mod models;
pub mod prompts;
pub mod server;
pub mod studio;

pub use error::{Error, Result};
