use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::candidate_dto::CreateCandidatePayload,
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/candidates",
    responses(
        (status = 200, description = "List of candidates")
    )
)]
#[axum::debug_handler]
pub async fn list_candidates(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let candidates = state.store.candidates().get_all().await?;
    Ok(Json(candidates))
}

#[utoipa::path(
    get,
    path = "/api/candidates/{id}",
    params(
        ("id" = String, Path, description = "Candidate ID")
    ),
    responses(
        (status = 200, description = "Candidate found"),
        (status = 404, description = "Candidate not found")
    )
)]
#[axum::debug_handler]
pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .store
        .candidates()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Candidate {} not found", id)))?;
    Ok(Json(candidate))
}

#[utoipa::path(
    post,
    path = "/api/candidates",
    responses(
        (status = 201, description = "Candidate created successfully"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_candidate(
    State(state): State<AppState>,
    Json(payload): Json<CreateCandidatePayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let candidate = payload.into_candidate();
    state.store.candidates().insert(&candidate).await?;
    Ok((StatusCode::CREATED, Json(candidate)))
}
