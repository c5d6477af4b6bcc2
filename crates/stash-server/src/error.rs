//! HTTP error mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use stash_core::StashError;
use thiserror::Error;

pub const TEXT_REQUIRED: &str = "Text is required and must be a non-empty string";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("String not found")]
    NotFound,

    /// Body rejected before it reached validation; keeps the extractor's status.
    #[error("Invalid request body")]
    Body(StatusCode),

    /// `context` is the message the client sees; `source` stays in the logs.
    #[error("{context}: {source}")]
    Store {
        context: &'static str,
        #[source]
        source: StashError,
    },
}

impl ApiError {
    pub fn text_required() -> Self {
        ApiError::Validation(TEXT_REQUIRED.to_string())
    }

    /// Wrap a store failure, turning a missing entry into `NotFound`.
    pub fn store(context: &'static str, source: StashError) -> Self {
        if source.is_not_found() {
            ApiError::NotFound
        } else {
            ApiError::Store { context, source }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Body(status) => *status,
            ApiError::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Store { context, .. } => context.to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store { context, source } => tracing::error!("{}: {}", context, source),
            other => tracing::warn!("Rejected request: {}", other),
        }
        let body = Json(json!({ "error": self.client_message() }));
        (self.status(), body).into_response()
    }
}
