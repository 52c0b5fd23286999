//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`] which wires in-memory image and score stores into
//! a [`VotingService`] and the full Axum router, plus helpers for driving it
//! with `tower::ServiceExt::oneshot`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use imagerank::scores::MemoryScoreStore;
use imagerank::server::{create_router, AppContext};
use imagerank::storage::MemoryImageStore;
use imagerank::voting::{VotingService, VotingSettings};

pub struct TestHarness {
    pub images: Arc<MemoryImageStore>,
    pub scores: Arc<MemoryScoreStore>,
    pub service: Arc<VotingService>,
}

impl TestHarness {
    /// Harness over `keys` with no score records.
    pub fn new(keys: &[&str]) -> Self {
        Self::with_scores(keys, MemoryScoreStore::new(), VotingSettings::default())
    }

    pub fn with_scores(keys: &[&str], scores: MemoryScoreStore, settings: VotingSettings) -> Self {
        let images = Arc::new(
            MemoryImageStore::new(keys.iter().map(|k| k.to_string()).collect())
                .with_page_size(2)
                .with_base_url("http://images.test"),
        );
        let scores = Arc::new(scores);
        let service = Arc::new(VotingService::new(
            images.clone(),
            scores.clone(),
            settings,
        ));

        Self {
            images,
            scores,
            service,
        }
    }

    pub fn router(&self) -> Router {
        create_router(AppContext::new(self.service.clone()))
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        self.router()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    /// POST an urlencoded form body to `uri`.
    pub async fn post_form(&self, uri: &str, body: &str) -> Response<Body> {
        self.router()
            .oneshot(
                Request::post(uri)
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

/// Helper to get response body as string
pub async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}
