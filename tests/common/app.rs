//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use crosshatch::models::AppConfig;
use crosshatch::rendering::generate_textures;
use crosshatch::server::{build_router, create_app_state_with, AppState};
use crosshatch::services::{CrosshatchPipeline, FullFrameSegmenter, Segmenter};

/// Side length of the generated test textures
pub const TEST_TEXTURE_SIZE: u32 = 256;

/// Config used by [`TestApp::new`]: small output cap so renders stay cheap
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.max_dimension = 200;
    config.output.optimize_png = false;
    config
}

/// Test application with router and direct access to state
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
}

impl TestApp {
    /// Full-frame segmentation with generated textures
    pub fn new() -> Self {
        Self::with(test_config(), Arc::new(FullFrameSegmenter))
    }

    /// Custom config and segmenter; textures are generated in memory
    pub fn with(config: AppConfig, segmenter: Arc<dyn Segmenter>) -> Self {
        let textures = generate_textures(TEST_TEXTURE_SIZE).expect("Failed to generate textures");
        let pipeline = CrosshatchPipeline::new(
            config.crosshatcher(),
            segmenter,
            Arc::new(textures),
            config.output.optimize_png,
        );
        let state = create_app_state_with(Arc::new(pipeline), Arc::new(config));

        // Build router using shared server module (same as production)
        let router = build_router(state.clone());

        Self { router, state }
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with a raw body
    pub async fn post_bytes(&self, path: &str, body: Vec<u8>) -> TestResponse {
        let request = Request::post(path)
            .header("Content-Type", "application/octet-stream")
            .body(Body::from(body))
            .unwrap();
        self.request(request).await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Header value as a string, if present
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
