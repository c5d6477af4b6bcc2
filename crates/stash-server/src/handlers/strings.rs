//! String entry handlers

use crate::error::ApiError;
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use stash_core::{normalize_text, Entry};
use tracing::{debug, info};

const INVALID_JSON: &str = "Invalid JSON body";

#[derive(Debug, Serialize)]
pub struct StringListResponse {
    strings: Vec<Entry>,
}

#[derive(Debug, Serialize)]
pub struct StringCreatedResponse {
    message: &'static str,
    string: Entry,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: &'static str,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<StringListResponse>, ApiError> {
    let strings = state
        .store
        .list()
        .await
        .map_err(|e| ApiError::store("Failed to fetch strings", e))?;
    debug!("Listed {} strings from {}", strings.len(), state.store.backend());
    Ok(Json(StringListResponse { strings }))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<StringCreatedResponse>), ApiError> {
    let body = match payload {
        Ok(Json(body)) => body,
        // No JSON content type: treat as an empty body.
        Err(JsonRejection::MissingJsonContentType(_)) => Value::Null,
        Err(JsonRejection::JsonSyntaxError(_)) => {
            return Err(ApiError::Validation(INVALID_JSON.to_string()))
        }
        Err(rejection) => return Err(ApiError::Body(rejection.status())),
    };

    let text = body
        .get("text")
        .and_then(Value::as_str)
        .and_then(normalize_text)
        .ok_or_else(ApiError::text_required)?;

    let string = state
        .store
        .create(text)
        .await
        .map_err(|e| ApiError::store("Failed to add string", e))?;
    info!("Added string {} ({})", string.id, state.store.backend());

    Ok((
        StatusCode::CREATED,
        Json(StringCreatedResponse {
            message: "String added successfully",
            string,
        }),
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .delete(&id)
        .await
        .map_err(|e| ApiError::store("Failed to delete string", e))?;
    info!("Deleted string {}", id);

    Ok(Json(MessageResponse {
        message: "String deleted successfully",
    }))
}
