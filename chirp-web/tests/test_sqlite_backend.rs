//! The web front end wired to the SQLite-backed service

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use libchirp::service::ChirpService;
use libchirp::{Config, Database, User};
use tempfile::TempDir;
use tower::ServiceExt;

use chirp_web::{router, AppState};

async fn setup() -> (Router, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("chirp.db");
    let db = Database::new(&db_path.to_string_lossy()).await.unwrap();

    db.upsert_user(&User {
        id: "user_1".to_string(),
        username: "alice".to_string(),
        profile_image_url: "https://img.example.com/alice.png".to_string(),
        email_address: Some("alice@example.com".to_string()),
        first_name: None,
        last_name: None,
        private_metadata: None,
        created_at: Utc::now(),
    })
    .await
    .unwrap();

    let service = ChirpService::from_parts(db, Config::default());
    let state = AppState::new(Arc::new(service), Config::default()).unwrap();
    (router(state), temp_dir)
}

async fn submit(app: &Router, content: &str) -> StatusCode {
    let request = Request::builder()
        .method("POST")
        .uri("/posts")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .header("x-chirp-user-id", "user_1")
        .body(Body::from(format!("content={}", content)))
        .unwrap();
    app.clone().oneshot(request).await.unwrap().status()
}

async fn home(app: &Router) -> String {
    let request = Request::builder()
        .uri("/")
        .header("x-chirp-user-id", "user_1")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_post_appears_on_home_and_profile() {
    let (app, _temp_dir) = setup().await;

    assert_eq!(submit(&app, "first").await, StatusCode::SEE_OTHER);

    let html = home(&app).await;
    assert!(html.contains("first"));
    assert!(html.contains("@alice"));

    let request = Request::builder().uri("/@alice").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("first"));
}

#[tokio::test]
async fn test_second_post_in_window_is_rate_limited() {
    let (app, _temp_dir) = setup().await;

    submit(&app, "first").await;
    submit(&app, "second").await;

    let html = home(&app).await;
    assert!(html.contains("You can only post 1 time every 1 minute"));
    assert!(html.contains(r#"value="second""#));
}

#[tokio::test]
async fn test_empty_post_shows_validation_message() {
    let (app, _temp_dir) = setup().await;

    submit(&app, "+++").await;

    let html = home(&app).await;
    assert!(html.contains("Content cannot be empty"));
    assert!(html.contains("No posts yet"));
}
