//! Admin config endpoint: `GET`/`POST /admin/api/config`

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use super::{with_store, AppState, ServerError};
use crate::content::ContentSource;

fn error_response(status: StatusCode, error: &str, details: Option<String>) -> Response {
    let body = match details {
        Some(details) => json!({ "error": error, "details": details }),
        None => json!({ "error": error }),
    };
    (status, Json(body)).into_response()
}

/// Return the persisted configuration document
pub async fn get_config<S: ContentSource>(State(state): State<Arc<AppState<S>>>) -> Response {
    match with_store(&state.store, |store| store.load()).await {
        Ok(config) => Json(config).into_response(),
        Err(e) => {
            tracing::error!("Error reading config: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to read config", None)
        }
    }
}

/// Validate and persist a full replacement document
pub async fn post_config<S: ContentSource>(
    State(state): State<Arc<AppState<S>>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Response {
    let candidate = match payload {
        Ok(Json(candidate)) => candidate,
        Err(rejection) => {
            tracing::warn!("Rejected config update: {}", rejection.body_text());
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid config structure",
                Some(rejection.body_text()),
            );
        }
    };

    match with_store(&state.store, move |store| store.save_candidate(candidate)).await {
        Ok(saved) => {
            state.cache.clear();
            tracing::info!(title = %saved.title, theme = %saved.theme, "Config updated");
            Json(json!({ "success": true, "message": "Config saved successfully" })).into_response()
        }
        Err(ServerError::Config(e)) if e.is_validation_error() => {
            tracing::warn!("Rejected config update: {}", e);
            error_response(
                StatusCode::BAD_REQUEST,
                "Invalid config structure",
                Some(e.to_string()),
            )
        }
        Err(e) => {
            tracing::error!("Error saving config: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save config", None)
        }
    }
}
