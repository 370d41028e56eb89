use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::AppState;

#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let seeded = state.store.seed_complete().await.unwrap_or(false);
    let body = json!({
        "status": "ok",
        "seeded": seeded,
    });
    (StatusCode::OK, Json(body))
}
