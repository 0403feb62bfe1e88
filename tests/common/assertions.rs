//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
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

    let content_type = response
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok());
    assert_eq!(
        content_type,
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert an error body `{"status": .., "error": ..}` with the given status
/// whose message contains `needle`
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, needle: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Full response: {}",
        serde_json::to_string_pretty(&json).unwrap()
    );
    let message = json["error"].as_str().unwrap_or_default();
    assert!(
        message.contains(needle),
        "Expected error containing {needle:?}, got {message:?}"
    );
}

/// Assert a quantized-image JSON body is well formed and return it
pub fn assert_valid_image_response(response: &TestResponse) -> serde_json::Value {
    assert_ok(response);
    let json: serde_json::Value = response.json();

    let width = json["width"].as_u64().expect("width");
    let height = json["height"].as_u64().expect("height");
    let pixels = json["pixels"].as_array().expect("pixels array");
    assert_eq!(
        pixels.len() as u64,
        width * height * 4,
        "pixels must hold 4 bytes per pixel"
    );
    assert!(
        json["palette_lab"].as_array().is_some_and(|p| !p.is_empty()),
        "Expected non-empty palette_lab"
    );
    assert!(json["unique_colors"].is_u64(), "Expected unique_colors");
    json
}

/// Extract the pixel array of a quantized-image JSON body
pub fn pixels_of(json: &serde_json::Value) -> Vec<u8> {
    json["pixels"]
        .as_array()
        .expect("pixels array")
        .iter()
        .map(|v| v.as_u64().expect("byte") as u8)
        .collect()
}
