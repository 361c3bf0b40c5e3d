#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use content_calendar::{ContentPost, http_api, sample_posts};
use serde_json::json;
use tower::util::ServiceExt;

fn seeded_router() -> axum::Router {
    let state = http_api::AppState::new(sample_posts());
    http_api::router(state)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn post_lifecycle_via_http_api() {
    let app = seeded_router();

    // Create from a draft payload; the server assigns the id.
    let draft = json!({
        "type": "link",
        "content": "Webinar signup is live",
        "date": "2024-10-28",
        "time": "09:30"
    });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/posts")
                .header("content-type", "application/json")
                .body(Body::from(draft.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["id"], json!("6"));

    // Patch one field.
    let patch = json!({ "content": "Webinar rescheduled" });
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/posts/6")
                .header("content-type", "application/json")
                .body(Body::from(patch.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let updated: ContentPost = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(updated.content, "Webinar rescheduled");
    assert_eq!(updated.time, "09:30");

    // Delete, then confirm it is gone.
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/posts/6")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/posts/6")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("not_found"));
}

#[tokio::test]
async fn list_posts_applies_type_and_search_filters() {
    let app = seeded_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/posts?type=image&search=team")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let posts: Vec<ContentPost> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "3");
}

#[tokio::test]
async fn month_endpoint_returns_one_cell_per_day() {
    let app = seeded_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/calendar/2024/2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["month"], json!("2024-02-01"));
    assert_eq!(view["cells"].as_array().unwrap().len(), 29);
}

#[tokio::test]
async fn month_endpoint_buckets_filtered_posts() {
    let app = seeded_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/calendar/2024/10?type=image")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    let cells = view["cells"].as_array().unwrap();
    assert_eq!(cells.len(), 31);
    let scheduled: usize = cells
        .iter()
        .map(|cell| cell["posts"].as_array().unwrap().len())
        .sum();
    assert_eq!(scheduled, 2);
}

#[tokio::test]
async fn invalid_draft_returns_bad_request() {
    let app = seeded_router();
    let draft = json!({
        "type": "text",
        "content": "",
        "date": "2024-10-28"
    });
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/posts")
                .header("content-type", "application/json")
                .body(Body::from(draft.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_request"));
}

#[tokio::test]
async fn unknown_type_filter_returns_bad_request() {
    let app = seeded_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/posts?type=carousel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("invalid_request"));
}
