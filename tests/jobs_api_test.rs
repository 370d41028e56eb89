use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

use talentflow_backend::middleware::chaos::ChaosPolicy;
use talentflow_backend::routes;
use talentflow_backend::store::Store;
use talentflow_backend::AppState;

async fn test_app() -> Router {
    let store = Store::open_in_memory().await.expect("open store");
    routes::api_router(AppState::new(store, ChaosPolicy::disabled()))
}

async fn body_json(resp: axum::response::Response) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn job_crud_round_trip() {
    let app = test_app().await;

    let payload = json!({
        "title": "Platform Engineer",
        "description": "Keep the build green",
        "status": "open"
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_str().expect("created id").to_string();
    assert_eq!(created["title"], "Platform Engineer");
    assert!(created["createdAt"].is_string());

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/jobs/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = body_json(resp).await;
    assert_eq!(fetched["id"], created["id"]);
    assert_eq!(fetched["title"], created["title"]);
    assert_eq!(fetched["status"], "open");

    let req = Request::builder()
        .method("GET")
        .uri("/api/jobs")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let all = body_json(resp).await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn patch_merges_fields_and_keeps_the_rest() {
    let app = test_app().await;

    let payload = json!({ "title": "Data Engineer", "description": "Pipelines" });
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let created = body_json(app.clone().oneshot(req).await.unwrap()).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/jobs/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "paused" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["status"], "paused");
    assert_eq!(updated["title"], "Data Engineer");
    assert_eq!(updated["description"], "Pipelines");
    assert_ne!(updated["updatedAt"], created["updatedAt"]);
}

#[tokio::test]
async fn patch_missing_job_is_404() {
    let app = test_app().await;
    let req = Request::builder()
        .method("PATCH")
        .uri("/api/jobs/no-such-id")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "closed" }).to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn delete_then_get_is_404() {
    let app = test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "Temp Role" }).to_string()))
        .unwrap();
    let created = body_json(app.clone().oneshot(req).await.unwrap()).await;
    let id = created["id"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/jobs/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/jobs/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // Deleting again is still a clean 204, never a fault.
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/jobs/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_candidate_is_404_with_error_body() {
    let app = test_app().await;
    let req = Request::builder()
        .method("GET")
        .uri("/api/candidates/does-not-exist")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn duplicate_id_surfaces_as_500_not_a_crash() {
    let app = test_app().await;
    let payload = json!({ "id": "fixed-id", "title": "Once Only" });

    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);

    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn invalid_payload_is_400() {
    let app = test_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("POST")
        .uri("/api/candidates")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "name": "No Email", "email": "not-an-email" }).to_string(),
        ))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assessment_crud_against_a_job() {
    let app = test_app().await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/jobs")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "id": "job-1", "title": "QA Engineer" }).to_string()))
        .unwrap();
    assert_eq!(
        app.clone().oneshot(req).await.unwrap().status(),
        StatusCode::CREATED
    );

    let payload = json!({
        "jobId": "job-1",
        "title": "QA Skill Test",
        "questions": [
            { "type": "multiple-choice", "text": "Pick one", "options": ["a", "b"] },
            { "type": "coding-challenge", "text": "Reverse a string" }
        ]
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/assessments")
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["questions"][0]["type"], "multiple-choice");
    assert_eq!(created["questions"][1]["type"], "coding-challenge");

    let req = Request::builder()
        .method("PATCH")
        .uri(format!("/api/assessments/{}", id))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "title": "QA Screen v2" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = body_json(resp).await;
    assert_eq!(updated["title"], "QA Screen v2");
    assert_eq!(updated["jobId"], "job-1");

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/api/assessments/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = Request::builder()
        .method("GET")
        .uri(format!("/api/assessments/{}", id))
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
