//! Mock segmentation service backed by wiremock.

use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the mock serves segmentation on
pub const SEGMENT_PATH: &str = "/segment";

/// Wrapper around wiremock MockServer with convenience methods
pub struct MockSegmentationServer {
    pub server: MockServer,
}

impl MockSegmentationServer {
    /// Start a new mock HTTP server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Get the base URL of the mock server
    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// URL of the segmentation endpoint
    pub fn segment_url(&self) -> String {
        format!("{}{}", self.server.uri(), SEGMENT_PATH)
    }

    /// Answer PNG uploads with the given mask bytes
    pub async fn mock_mask(&self, mask_png: Vec<u8>) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .and(header("content-type", "image/png"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_bytes(mask_png)
                    .insert_header("content-type", "image/png"),
            )
            .expect(1)
            .mount(&self.server)
            .await;
    }

    /// Answer every request with an error status
    pub async fn mock_error(&self, status: u16, message: &str) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string(message))
            .mount(&self.server)
            .await;
    }

    /// Answer with a 200 whose body is not an image
    pub async fn mock_garbage(&self) {
        Mock::given(method("POST"))
            .and(path(SEGMENT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not a mask"))
            .mount(&self.server)
            .await;
    }
}
