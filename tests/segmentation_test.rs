//! Tests for the HTTP segmentation collaborator against a mock service.

mod common;

use axum::http::StatusCode;
use common::{fixtures, MockSegmentationServer, TestApp};
use crosshatch::error::SegmentationError;
use crosshatch::rendering::{decode_luminance, encode_grayscale_png};
use crosshatch::services::{HttpSegmenter, Segmenter};
use hatch_core::Raster;
use std::sync::Arc;
use std::time::Duration;

fn segmenter(server: &MockSegmentationServer) -> HttpSegmenter {
    HttpSegmenter::new(server.segment_url(), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_http_segmenter_returns_mask() {
    let server = MockSegmentationServer::start().await;
    server.mock_mask(fixtures::right_half_mask_png(40, 30)).await;

    let mask = segmenter(&server)
        .segment(&fixtures::portrait(40, 30))
        .await
        .unwrap();

    assert_eq!(mask.dimensions(), (40, 30));
    assert_eq!(mask.get(0, 0), 0);
    assert_eq!(mask.get(39, 29), 255);
}

#[tokio::test]
async fn test_http_segmenter_error_status() {
    let server = MockSegmentationServer::start().await;
    server.mock_error(500, "model crashed").await;

    let err = segmenter(&server)
        .segment(&fixtures::portrait(8, 8))
        .await
        .unwrap_err();

    assert!(matches!(err, SegmentationError::Status(500)), "{err:?}");
}

#[tokio::test]
async fn test_http_segmenter_undecodable_mask() {
    let server = MockSegmentationServer::start().await;
    server.mock_garbage().await;

    let err = segmenter(&server)
        .segment(&fixtures::portrait(8, 8))
        .await
        .unwrap_err();

    assert!(matches!(err, SegmentationError::Decode(_)), "{err:?}");
}

#[tokio::test]
async fn test_http_segmenter_wrong_mask_size() {
    let server = MockSegmentationServer::start().await;
    let small = Raster::filled(20, 20, 255).unwrap();
    server
        .mock_mask(encode_grayscale_png(&small, false).unwrap())
        .await;

    let err = segmenter(&server)
        .segment(&fixtures::portrait(40, 30))
        .await
        .unwrap_err();

    match err {
        SegmentationError::SizeMismatch {
            width,
            height,
            actual_width,
            actual_height,
        } => assert_eq!((width, height, actual_width, actual_height), (40, 30, 20, 20)),
        other => panic!("Expected SizeMismatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_segmenter_timeout() {
    let server = MockSegmentationServer::start().await;
    wiremock::Mock::given(wiremock::matchers::method("POST"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server.server)
        .await;

    let segmenter = HttpSegmenter::new(server.segment_url(), Duration::from_millis(100)).unwrap();
    let err = segmenter
        .segment(&fixtures::portrait(8, 8))
        .await
        .unwrap_err();

    assert!(matches!(err, SegmentationError::Request(_)), "{err:?}");
}

#[tokio::test]
async fn test_api_with_http_segmenter() {
    let server = MockSegmentationServer::start().await;
    server.mock_mask(fixtures::right_half_mask_png(80, 40)).await;
    let app = TestApp::with(common::app::test_config(), Arc::new(segmenter(&server)));

    let response = app
        .post_bytes("/api/crosshatch", fixtures::portrait_png(80, 40))
        .await;

    common::assert_png(&response);
    let output = decode_luminance(response.bytes()).unwrap();
    for y in 0..40 {
        for x in 0..36 {
            assert_eq!(output.get(x, y), 255, "background pixel ({x}, {y})");
        }
    }
}

#[tokio::test]
async fn test_api_segmentation_failure_is_bad_gateway() {
    let server = MockSegmentationServer::start().await;
    server.mock_error(503, "busy").await;
    let app = TestApp::with(common::app::test_config(), Arc::new(segmenter(&server)));

    let response = app
        .post_bytes("/api/crosshatch", fixtures::portrait_png(20, 20))
        .await;

    common::assert_json_error(
        &response,
        StatusCode::BAD_GATEWAY,
        "Segmentation service returned status 503",
    );
}
