use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use validator::Validate;

use crate::{
    dto::assessment_dto::{CreateAssessmentPayload, UpdateAssessmentPayload},
    error::{Error, Result},
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/assessments",
    responses(
        (status = 200, description = "List of assessments")
    )
)]
#[axum::debug_handler]
pub async fn list_assessments(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let assessments = state.store.assessments().get_all().await?;
    Ok(Json(assessments))
}

#[utoipa::path(
    get,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment found"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn get_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let assessment = state
        .store
        .assessments()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("Assessment {} not found", id)))?;
    Ok(Json(assessment))
}

#[utoipa::path(
    post,
    path = "/api/assessments",
    responses(
        (status = 201, description = "Assessment created successfully"),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn create_assessment(
    State(state): State<AppState>,
    Json(payload): Json<CreateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let assessment = payload.into_assessment();
    state.store.assessments().insert(&assessment).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

#[utoipa::path(
    patch,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 200, description = "Assessment updated successfully"),
        (status = 404, description = "Assessment not found")
    )
)]
#[axum::debug_handler]
pub async fn update_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAssessmentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let patch = serde_json::to_value(&payload)?;
    let assessment = state.store.assessments().update(&id, &patch).await?;
    Ok(Json(assessment))
}

#[utoipa::path(
    delete,
    path = "/api/assessments/{id}",
    params(
        ("id" = String, Path, description = "Assessment ID")
    ),
    responses(
        (status = 204, description = "Assessment deleted successfully")
    )
)]
#[axum::debug_handler]
pub async fn delete_assessment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    state.store.assessments().delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
