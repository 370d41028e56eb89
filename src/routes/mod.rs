pub mod assessments;
pub mod candidates;
pub mod health;
pub mod jobs;
pub mod pipeline;

use axum::routing::get;
use axum::Router;

use crate::middleware::chaos::{fault_middleware, latency_middleware};
use crate::AppState;

/// The full dispatcher surface. The chaos layers wrap only the /api
/// namespace; the latency layer is outermost so every call, including one
/// that the fault layer rejects, still pays the simulated network delay.
pub fn api_router(state: AppState) -> Router {
    let chaos = state.chaos.clone();

    let api = Router::new()
        .route(
            "/api/jobs",
            get(jobs::list_jobs).post(jobs::create_job),
        )
        .route(
            "/api/jobs/:id",
            get(jobs::get_job)
                .patch(jobs::update_job)
                .delete(jobs::delete_job),
        )
        .route(
            "/api/candidates",
            get(candidates::list_candidates).post(candidates::create_candidate),
        )
        .route(
            "/api/candidates/:id",
            get(candidates::get_candidate),
        )
        .route(
            "/api/assessments",
            get(assessments::list_assessments).post(assessments::create_assessment),
        )
        .route(
            "/api/assessments/:id",
            get(assessments::get_assessment)
                .patch(assessments::update_assessment)
                .delete(assessments::delete_assessment),
        )
        .route("/api/timelines", get(pipeline::list_timelines))
        .route("/api/responses", get(pipeline::list_responses))
        .layer(axum::middleware::from_fn_with_state(
            chaos.clone(),
            fault_middleware,
        ))
        .layer(axum::middleware::from_fn_with_state(
            chaos,
            latency_middleware,
        ));

    Router::new()
        .route("/health", get(health::health))
        .merge(api)
        .with_state(state)
}
