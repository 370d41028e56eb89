use axum::{
    extract::{Query, State},
    response::{IntoResponse, Json},
};

use crate::{
    dto::pipeline_dto::{ResponseQuery, TimelineQuery},
    error::Result,
    AppState,
};

#[utoipa::path(
    get,
    path = "/api/timelines",
    params(
        ("candidateId" = Option<String>, Query, description = "Filter by candidate"),
        ("jobId" = Option<String>, Query, description = "Filter by job")
    ),
    responses(
        (status = 200, description = "List of timeline entries")
    )
)]
#[axum::debug_handler]
pub async fn list_timelines(
    State(state): State<AppState>,
    Query(query): Query<TimelineQuery>,
) -> Result<impl IntoResponse> {
    let mut timelines = state.store.timelines().get_all().await?;
    if let Some(candidate_id) = &query.candidate_id {
        timelines.retain(|t| &t.candidate_id == candidate_id);
    }
    if let Some(job_id) = &query.job_id {
        timelines.retain(|t| &t.job_id == job_id);
    }
    timelines.sort_by_key(|t| t.timestamp);
    Ok(Json(timelines))
}

#[utoipa::path(
    get,
    path = "/api/responses",
    params(
        ("candidateId" = Option<String>, Query, description = "Filter by candidate"),
        ("assessmentId" = Option<String>, Query, description = "Filter by assessment")
    ),
    responses(
        (status = 200, description = "List of assessment responses")
    )
)]
#[axum::debug_handler]
pub async fn list_responses(
    State(state): State<AppState>,
    Query(query): Query<ResponseQuery>,
) -> Result<impl IntoResponse> {
    let mut responses = state.store.responses().get_all().await?;
    if let Some(candidate_id) = &query.candidate_id {
        responses.retain(|r| &r.candidate_id == candidate_id);
    }
    if let Some(assessment_id) = &query.assessment_id {
        responses.retain(|r| &r.assessment_id == assessment_id);
    }
    Ok(Json(responses))
}
