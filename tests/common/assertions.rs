//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );

    // Check Content-Type header
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert the rendering headers report `width x height`
pub fn assert_rendered_size(response: &TestResponse, width: u32, height: u32) {
    let reported = (
        response.header("x-crosshatch-width").map(str::to_string),
        response.header("x-crosshatch-height").map(str::to_string),
    );
    assert_eq!(
        reported,
        (Some(width.to_string()), Some(height.to_string())),
        "Unexpected X-Crosshatch-Width/Height"
    );
}

/// Assert JSON error body has expected status field
pub fn assert_json_status(response: &TestResponse, expected_status: u16) {
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected_status as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected_status,
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
}

/// Assert a JSON error response with the given status and message substring
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    assert_json_status(response, expected.as_u16());

    let json: serde_json::Value = response.json();
    let error = json["error"].as_str().unwrap_or_default();
    assert!(
        error.contains(message),
        "Expected error containing {message:?}, got {error:?}"
    );
}
