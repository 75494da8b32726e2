//! Tests for the wire types and the status-code → user-message table.

use ripple::error::RippleError;
use ripple::protocol::{
    GenerateRequest, GenerateResponse, MSG_ACCESS_DENIED, MSG_GENERIC, MSG_MODEL_DOWNLOADING,
    MSG_OUT_OF_CREDITS, MSG_SERVERS_UNAVAILABLE, classify_status, server_detail,
};

// ---------------------------------------------------------------------------
// Request wire shape
// ---------------------------------------------------------------------------

#[test]
fn generate_request_wire_shape() {
    let req = GenerateRequest::new(Some("mistralai/Mistral-7B-Instruct-v0.1"), "hi".into(), 128);
    let value = serde_json::to_value(&req).unwrap();

    assert_eq!(value["model_name"], "mistralai/Mistral-7B-Instruct-v0.1");
    assert_eq!(value["out_type"]["answer"], "string");
    assert_eq!(value["prompt"], serde_json::json!(["hi"]));
    assert_eq!(value["max_tokens"], 128);
}

#[test]
fn generate_request_without_model_sends_null() {
    let req = GenerateRequest::new(None, "hi".into(), 64);
    let value = serde_json::to_value(&req).unwrap();
    assert!(value["model_name"].is_null());
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

#[test]
fn generate_response_accessors() {
    let value = serde_json::json!({"status": [false], "data": [{"answer": "partial text"}]});
    let resp = GenerateResponse::from_value(value).unwrap();
    assert!(!resp.finished());
    assert_eq!(resp.fragment(), "partial text");

    let value = serde_json::json!({"status": [true], "data": [{"answer": "full text"}]});
    let resp = GenerateResponse::from_value(value).unwrap();
    assert!(resp.finished());
    assert_eq!(resp.fragment(), "full text");
}

#[test]
fn generate_response_empty_arrays() {
    let value = serde_json::json!({"status": [], "data": []});
    let resp = GenerateResponse::from_value(value).unwrap();
    assert!(!resp.finished());
    assert_eq!(resp.fragment(), "");
}

#[test]
fn generate_response_wrong_shape_is_schema_error() {
    let value = serde_json::json!({"answer": "no envelope"});
    let err = GenerateResponse::from_value(value).unwrap_err();
    assert!(matches!(err, RippleError::SchemaParse(_)));
}

// ---------------------------------------------------------------------------
// Server-supplied detail
// ---------------------------------------------------------------------------

#[test]
fn server_detail_extracts_nested_message() {
    let value = serde_json::json!({"detail": {"detail": "custom server message"}});
    assert_eq!(server_detail(&value), Some("custom server message"));
}

#[test]
fn server_detail_absent_or_misshapen() {
    assert_eq!(server_detail(&serde_json::json!({})), None);
    assert_eq!(server_detail(&serde_json::json!({"detail": "flat"})), None);
    assert_eq!(
        server_detail(&serde_json::json!({"detail": {"detail": 42}})),
        None
    );
}

// ---------------------------------------------------------------------------
// Status classification
// ---------------------------------------------------------------------------

#[test]
fn documented_status_codes_classify() {
    assert_eq!(classify_status(513), MSG_MODEL_DOWNLOADING);
    assert_eq!(classify_status(503), MSG_SERVERS_UNAVAILABLE);
    assert_eq!(classify_status(561), MSG_ACCESS_DENIED);
    assert_eq!(classify_status(402), MSG_OUT_OF_CREDITS);
}

#[test]
fn unknown_status_codes_fall_back_to_generic() {
    for status in [400, 404, 500, 502, 504] {
        assert_eq!(classify_status(status), MSG_GENERIC);
    }
}
