//! HTTP API surface.
//!
//! Two endpoints, mirroring what the browser client calls:
//! `POST /api/chat` for prompt enhancement and `POST /api/generate-image`
//! for image generation. Handlers stay thin; all provider wiring lives in
//! the injected [`ServiceCatalog`].

use crate::ai::ServiceCatalog;
use crate::models::{
    ChatReply, ChatRequest, ErrorBody, GenerateImageRequest, GenerateImageResponse, ModelId,
};
use crate::Error;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub services: Arc<ServiceCatalog>,
}

impl AppState {
    pub fn new(services: Arc<ServiceCatalog>) -> Self {
        Self { services }
    }
}

/// Error wrapper mapping the crate taxonomy onto HTTP statuses and the
/// `{ "error": ..., "details"?: ... }` body shape.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self.0 {
            Error::Configuration(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(self.0.to_string()),
            ),
            Error::UnsupportedModel(_) => (StatusCode::BAD_REQUEST, ErrorBody::new(self.0.to_string())),
            Error::NotImplemented(_) => (
                StatusCode::NOT_IMPLEMENTED,
                ErrorBody::new(self.0.to_string()),
            ),
            Error::NoImageData => {
                // Response-shape mismatch, not a network fault; worth its
                // own log line even though the caller sees the same 500.
                warn!("upstream response contained no inline image data");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::with_details("The model request failed.", self.0.to_string()),
                )
            }
            Error::AiProvider(message) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details("The model request failed.", message.clone()),
            ),
            Error::Http(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::with_details("The model request failed.", err.to_string()),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody::new(self.0.to_string()),
            ),
        };

        (status, Json(body)).into_response()
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatReply>, ApiError> {
    let enhancer = state.services.enhancement()?;
    let reply = enhancer.enhance(&request.prompt).await?;
    Ok(Json(ChatReply { reply }))
}

async fn generate_image(
    State(state): State<AppState>,
    Json(request): Json<GenerateImageRequest>,
) -> Result<Json<GenerateImageResponse>, ApiError> {
    let model = ModelId::parse(&request.model)
        .ok_or_else(|| Error::UnsupportedModel(request.model.clone()))?;

    let service = state.services.image_generation(model)?;
    let image = service.generate_image(&request.prompt).await?;

    Ok(Json(GenerateImageResponse {
        image_url: image.to_data_uri(),
    }))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/generate-image", post(generate_image))
        .with_state(state)
}

/// Serve the API on an already-bound listener until the task is cancelled.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, build_router(state)).await
}
