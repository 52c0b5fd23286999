//! HTTP-level tests for the listing and voting routes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use common::{body_to_string, TestHarness};
use imagerank::config::UpdateMode;
use imagerank::scores::{MemoryScoreStore, ScoreStore};
use imagerank::server::{create_router, AppContext};
use imagerank::storage::{ImageStore, MemoryImageStore};
use imagerank::voting::{VotingService, VotingSettings};
use imagerank_common::{Error, ObjectPage, Result};
use tower::ServiceExt;

struct UnavailableScores;

#[async_trait]
impl ScoreStore for UnavailableScores {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn get(&self, _key: &str) -> Result<Option<i64>> {
        Err(Error::score_store("table unavailable"))
    }

    async fn put(&self, _key: &str, _score: i64) -> Result<()> {
        Err(Error::score_store("table unavailable"))
    }

    async fn add(&self, _key: &str, _delta: i64) -> Result<i64> {
        Err(Error::score_store("table unavailable"))
    }
}

struct UnavailableImages;

#[async_trait]
impl ImageStore for UnavailableImages {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    async fn list_page(&self, _continuation: Option<String>) -> Result<ObjectPage> {
        Err(Error::object_store("bucket unavailable"))
    }

    async fn presigned_url(&self, _key: &str, _expires_in: Duration) -> Result<String> {
        Err(Error::object_store("bucket unavailable"))
    }
}

fn router_over(images: Arc<dyn ImageStore>, scores: Arc<dyn ScoreStore>) -> Router {
    let service = VotingService::new(images, scores, VotingSettings::default());
    create_router(AppContext::new(Arc::new(service)))
}

fn vote_request(body: &'static str) -> Request<Body> {
    Request::post("/vote")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_endpoint() {
    let h = TestHarness::new(&[]);
    let response = h.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn index_lists_images_with_zero_scores() {
    let h = TestHarness::new(&["cat.png", "dog.png"]);

    let response = h.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));

    let body = body_to_string(response.into_body()).await;
    assert!(body.contains("cat.png"));
    assert!(body.contains("dog.png"));
    assert!(body.contains("http://images.test/cat.png?expires=3600"));
    assert_eq!(body.matches("Score: 0").count(), 2);
}

#[tokio::test]
async fn index_of_empty_bucket() {
    let h = TestHarness::new(&[]);
    let body = body_to_string(h.get("/").await.into_body()).await;
    assert!(body.contains("No images yet."));
}

#[tokio::test]
async fn up_vote_without_prior_record_scores_one() {
    let h = TestHarness::new(&["cat.png"]);

    let response = h.post_form("/vote", "image_key=cat.png&vote=up").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");

    assert_eq!(h.scores.get("cat.png").await.unwrap(), Some(1));

    let body = body_to_string(h.get("/").await.into_body()).await;
    assert!(body.contains("Score: 1"));
}

#[tokio::test]
async fn down_vote_decrements() {
    let h = TestHarness::with_scores(
        &["cat.png"],
        MemoryScoreStore::with_scores([("cat.png", 5)]),
        VotingSettings::default(),
    );

    let response = h.post_form("/vote", "image_key=cat.png&vote=down").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(h.scores.get("cat.png").await.unwrap(), Some(4));
}

#[tokio::test]
async fn up_then_down_round_trips_in_read_modify_write_mode() {
    let settings = VotingSettings {
        update_mode: UpdateMode::ReadModifyWrite,
        ..VotingSettings::default()
    };
    let h = TestHarness::with_scores(
        &["cat.png"],
        MemoryScoreStore::with_scores([("cat.png", 2)]),
        settings,
    );

    h.post_form("/vote", "image_key=cat.png&vote=up").await;
    assert_eq!(h.scores.get("cat.png").await.unwrap(), Some(3));
    h.post_form("/vote", "image_key=cat.png&vote=down").await;
    assert_eq!(h.scores.get("cat.png").await.unwrap(), Some(2));
}

#[tokio::test]
async fn unknown_direction_is_rejected_and_score_unchanged() {
    let h = TestHarness::with_scores(
        &["cat.png"],
        MemoryScoreStore::with_scores([("cat.png", 5)]),
        VotingSettings::default(),
    );

    let response = h.post_form("/vote", "image_key=cat.png&vote=sideways").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: serde_json::Value =
        serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
    assert_eq!(body["code"], "validation_error");
    assert!(body["error"].as_str().unwrap().contains("sideways"));

    assert_eq!(h.scores.get("cat.png").await.unwrap(), Some(5));
}

#[tokio::test]
async fn missing_fields_are_rejected() {
    let h = TestHarness::new(&["cat.png"]);

    let response = h.post_form("/vote", "vote=up").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = h.post_form("/vote", "image_key=cat.png").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(h.scores.is_empty());
}

#[tokio::test]
async fn keys_with_spaces_and_slashes_survive_form_encoding() {
    let h = TestHarness::new(&["holiday photos/beach 01.jpg"]);

    let response = h
        .post_form("/vote", "image_key=holiday+photos%2Fbeach+01.jpg&vote=up")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        h.scores.get("holiday photos/beach 01.jpg").await.unwrap(),
        Some(1)
    );
}

#[tokio::test]
async fn json_listing_follows_pages() {
    let h = TestHarness::with_scores(
        &["a.png", "b.png", "c.png"],
        MemoryScoreStore::with_scores([("c.png", -2)]),
        VotingSettings::default(),
    );

    let response = h.get("/api/images").await;
    assert_eq!(response.status(), StatusCode::OK);

    let entries: Vec<serde_json::Value> =
        serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
    let keys: Vec<&str> = entries.iter().map(|e| e["key"].as_str().unwrap()).collect();
    assert_eq!(keys, vec!["a.png", "b.png", "c.png"]);
    assert_eq!(entries[2]["score"], -2);
}

#[tokio::test]
async fn new_uploads_appear_in_listing() {
    let h = TestHarness::new(&["a.png"]);
    h.images.insert("b.png");

    let body = body_to_string(h.get("/").await.into_body()).await;
    assert!(body.contains("b.png"));
}

#[tokio::test]
async fn get_on_vote_is_not_allowed() {
    let h = TestHarness::new(&[]);
    let response = h.get("/vote").await;
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn score_store_failure_is_bad_gateway() {
    let images = Arc::new(MemoryImageStore::new(vec!["cat.png".to_string()]));

    for mode in [UpdateMode::Atomic, UpdateMode::ReadModifyWrite] {
        let settings = VotingSettings {
            update_mode: mode,
            ..VotingSettings::default()
        };
        let service = VotingService::new(images.clone(), Arc::new(UnavailableScores), settings);
        let router = create_router(AppContext::new(Arc::new(service)));

        let response = router
            .oneshot(vote_request("image_key=cat.png&vote=up"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let body: serde_json::Value =
            serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
        assert_eq!(body["code"], "score_store_error");
    }

    let response = router_over(images, Arc::new(UnavailableScores))
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn object_store_failure_is_bad_gateway() {
    let router = router_over(Arc::new(UnavailableImages), Arc::new(MemoryScoreStore::new()));

    let response = router
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let response = router
        .oneshot(Request::get("/api/images").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body: serde_json::Value =
        serde_json::from_str(&body_to_string(response.into_body()).await).unwrap();
    assert_eq!(body["code"], "object_store_error");
}
