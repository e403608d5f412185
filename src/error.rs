//! Error handling and custom error types
//!
//! Provides unified error handling across the application using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0}")]
    Configuration(String),

    #[error("Model {0} is not supported.")]
    UnsupportedModel(String),

    #[error("The {0} model is not yet implemented.")]
    NotImplemented(String),

    #[error("AI provider error: {0}")]
    AiProvider(String),

    #[error("No image data found in the response.")]
    NoImageData,

    #[error("Invariant violation: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
