//! Service info, health, version and cache flush

use crate::server::response::TEXT_PLAIN;
use crate::server::state::AppState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{SecondsFormat, Utc};
use serde_json::json;
use std::collections::HashMap;

/// Query key that triggers the cache-flush acknowledgement
pub const CACHE_FLUSH_PARAM: &str = "CacheFlush";

/// GET /
pub async fn root(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "Rave Web Services Mock API",
        "version": &*state.rws_version,
        "endpoints": {
            "version": "GET /RaveWebServices/version",
            "cacheFlush": "GET /RaveWebServices/WebService.aspx?CacheFlush",
            "datasets": "GET /RaveWebServices/datasets/{dataset}.{format}",
            "clinicalData": "POST /RaveWebServices",
        },
    }))
}

/// GET /health
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }))
}

/// GET /RaveWebServices/version
pub async fn version(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, TEXT_PLAIN)],
        state.rws_version.to_string(),
    )
        .into_response()
}

/// GET /RaveWebServices/WebService.aspx
///
/// Acknowledges `?CacheFlush` without touching the catalog.
pub async fn cache_flush(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.contains_key(CACHE_FLUSH_PARAM) {
        tracing::info!("Cache flush acknowledged");
        (
            StatusCode::OK,
            Json(json!({ "status": &*state.cache_flush_status })),
        )
            .into_response()
    } else {
        (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Unknown query parameter" })),
        )
            .into_response()
    }
}
