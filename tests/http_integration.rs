//! HTTP round trips through the full router on the in-memory store.

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use release_tracker::adapters::http::api_router;
use release_tracker::adapters::InMemoryTrackerStore;
use release_tracker::domain::validation::ValidationPolicy;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    api_router(Arc::new(InMemoryTrackerStore::new()), ValidationPolicy::default())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn create_milestone(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/api/milestones", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json
}

async fn create_release(app: &Router, body: Value) -> Value {
    let (status, json) = send(app, Method::POST, "/api/releases", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{}", json);
    json
}

async fn start(app: &Router, milestone_id: &str) {
    let uri = format!("/api/milestones/{}/transition", milestone_id);
    let (status, _) = send(app, Method::POST, &uri, Some(json!({ "state": "IN_PROGRESS" }))).await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Milestones
// =============================================================================

#[tokio::test]
async fn create_then_get_milestone() {
    let app = app();
    let created = create_milestone(&app, json!({ "title": "Alpha", "project_id": 1 })).await;
    assert_eq!(created["state"], "CREATED");
    assert_eq!(created["project_id"], 1);

    let id = created["id"].as_str().unwrap();
    let (status, fetched) = send(&app, Method::GET, &format!("/api/milestones/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn duplicate_title_is_conflict() {
    let app = app();
    create_milestone(&app, json!({ "title": "Alpha", "project_id": 1 })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/milestones",
        Some(json!({ "title": "Alpha", "project_id": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_TITLE");
    assert_eq!(body["details"]["scope"], "project:1");
}

#[tokio::test]
async fn validation_errors_are_listed_per_field() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/milestones",
        Some(json!({
            "start_date": "2099-06-02",
            "due_date": "2099-06-01"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    let fields: Vec<&str> = body["details"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"title"));
    assert!(fields.contains(&"due_date"));
}

#[tokio::test]
async fn past_due_date_is_bad_request() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/milestones",
        Some(json!({ "title": "Late", "due_date": "2000-01-01" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_DUE_DATE");
}

#[tokio::test]
async fn both_scope_keys_are_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/milestones",
        Some(json!({ "title": "Both", "project_id": 1, "group_id": 2 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn free_text_state_is_rejected_before_the_core() {
    let app = app();
    let created = create_milestone(&app, json!({ "title": "Alpha" })).await;
    let uri = format!("/api/milestones/{}/transition", created["id"].as_str().unwrap());

    for state in ["active", "OPEN", "CLOSED", "in_progress"] {
        let (status, _) = send(&app, Method::POST, &uri, Some(json!({ "state": state }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "state {}", state);
    }
}

#[tokio::test]
async fn skipping_a_state_is_conflict() {
    let app = app();
    let created = create_milestone(&app, json!({ "title": "Alpha" })).await;
    let uri = format!("/api/milestones/{}/transition", created["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::POST, &uri, Some(json!({ "state": "COMPLETED" }))).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");
    assert_eq!(body["details"]["from"], "CREATED");
}

#[tokio::test]
async fn list_filters_by_state_and_scope() {
    let app = app();
    let first = create_milestone(&app, json!({ "title": "One", "group_id": 5 })).await;
    create_milestone(&app, json!({ "title": "Two", "group_id": 5 })).await;
    create_milestone(&app, json!({ "title": "Three" })).await;
    start(&app, first["id"].as_str().unwrap()).await;

    let (status, all) = send(&app, Method::GET, "/api/milestones", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all["total"], 3);

    let (_, grouped) = send(&app, Method::GET, "/api/milestones?group_id=5", None).await;
    assert_eq!(grouped["total"], 2);

    let (_, global) = send(&app, Method::GET, "/api/milestones?global=true", None).await;
    assert_eq!(global["total"], 1);
    assert_eq!(global["items"][0]["title"], "Three");

    let (_, started) = send(&app, Method::GET, "/api/milestones?state=IN_PROGRESS", None).await;
    assert_eq!(started["total"], 1);
    assert_eq!(started["items"][0]["id"], first["id"]);

    let (status, _) = send(&app, Method::GET, "/api/milestones?state=open", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/milestones/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "MILESTONE_NOT_FOUND");

    let (status, _) = send(&app, Method::GET, "/api/releases/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Releases and associations
// =============================================================================

#[tokio::test]
async fn association_round_trip() {
    let app = app();
    let milestone = create_milestone(&app, json!({ "title": "Alpha", "project_id": 1 })).await;
    let release = create_release(&app, json!({ "version": "v1.0.0", "project_id": 1 })).await;
    assert!(release["milestone_id"].is_null());

    let milestone_id = milestone["id"].as_str().unwrap();
    let release_id = release["id"].as_str().unwrap();
    let link = format!("/api/releases/{}/milestone/{}", release_id, milestone_id);

    // Not yet started
    let (status, body) = send(&app, Method::POST, &link, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "INVALID_MILESTONE_STATE");

    start(&app, milestone_id).await;

    let (status, linked) = send(&app, Method::POST, &link, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(linked["milestone_id"], milestone["id"]);

    let (status, body) = send(&app, Method::POST, &link, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_ASSOCIATED");

    let (status, owner) = send(
        &app,
        Method::GET,
        &format!("/api/releases/{}/milestone", release_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(owner["id"], milestone["id"]);

    let (_, linked_releases) = send(
        &app,
        Method::GET,
        &format!("/api/milestones/{}/releases", milestone_id),
        None,
    )
    .await;
    assert_eq!(linked_releases["total"], 1);

    let (status, unlinked) = send(&app, Method::DELETE, &link, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(unlinked["milestone_id"].is_null());

    let (status, body) = send(&app, Method::DELETE, &link, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_ASSOCIATED");
}

#[tokio::test]
async fn batch_association_is_all_or_nothing() {
    let app = app();
    let milestone = create_milestone(&app, json!({ "title": "Alpha", "project_id": 1 })).await;
    let other = create_milestone(&app, json!({ "title": "Beta", "project_id": 1 })).await;
    let milestone_id = milestone["id"].as_str().unwrap();
    let other_id = other["id"].as_str().unwrap();
    start(&app, milestone_id).await;
    start(&app, other_id).await;

    let r1 = create_release(&app, json!({ "version": "v1", "project_id": 1 })).await;
    let r2 = create_release(&app, json!({ "version": "v2", "project_id": 1 })).await;
    let r3 = create_release(&app, json!({ "version": "v3", "project_id": 1 })).await;
    let uri = format!("/api/milestones/{}/releases", milestone_id);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "release_ids": [r1["id"], r2["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["total"], 2);

    // Beta takes r3, so a batch of a free r4 plus r3 fails and links neither.
    let r4 = create_release(&app, json!({ "version": "v4", "project_id": 1 })).await;
    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/releases/{}/milestone/{}", r3["id"].as_str().unwrap(), other_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "release_ids": [r4["id"], r3["id"]] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_ASSOCIATED");

    let (_, listed) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(listed["total"], 2);
    let (_, r4_now) = send(&app, Method::GET, &format!("/api/releases/{}", r4["id"].as_str().unwrap()), None).await;
    assert!(r4_now["milestone_id"].is_null());

    let (status, _) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "release_ids": ["not-a-uuid"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn deleting_milestone_detaches_releases() {
    let app = app();
    let milestone = create_milestone(&app, json!({ "title": "Alpha" })).await;
    let release = create_release(&app, json!({ "version": "v1" })).await;
    let milestone_id = milestone["id"].as_str().unwrap();
    let release_id = release["id"].as_str().unwrap();
    start(&app, milestone_id).await;
    send(
        &app,
        Method::POST,
        &format!("/api/releases/{}/milestone/{}", release_id, milestone_id),
        None,
    )
    .await;

    let (status, deleted) = send(
        &app,
        Method::DELETE,
        &format!("/api/milestones/{}", milestone_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["detached_releases"], 1);

    let (_, fetched) = send(&app, Method::GET, &format!("/api/releases/{}", release_id), None).await;
    assert!(fetched["milestone_id"].is_null());

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/releases/{}/milestone", release_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "NOT_ASSOCIATED");
}

#[tokio::test]
async fn duplicate_version_and_release_listing() {
    let app = app();
    create_release(&app, json!({ "version": "v1", "project_id": 3 })).await;
    create_release(&app, json!({ "version": "v1", "project_id": 4 })).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/releases",
        Some(json!({ "version": "v1", "project_id": 3 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "DUPLICATE_VERSION");

    let (_, listed) = send(&app, Method::GET, "/api/releases?project_id=3", None).await;
    assert_eq!(listed["total"], 1);
}

#[tokio::test]
async fn delete_release_then_not_found() {
    let app = app();
    let release = create_release(&app, json!({ "version": "v1" })).await;
    let uri = format!("/api/releases/{}", release["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "RELEASE_NOT_FOUND");
}
