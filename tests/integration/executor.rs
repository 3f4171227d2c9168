//! Request executor behaviour against a live mock server

use super::helpers::MockBackend;
use forum_smoke::client::{ApiClient, ApiRequest, RAW_RESPONSE_KEY};
use forum_smoke::config::HarnessConfig;
use serde_json::json;
use std::net::TcpListener;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_success_parses_json() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/reviews"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": "r1"}]))),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute(&ApiRequest::get("reviews"), None);

    assert!(response.success);
    assert_eq!(response.status, Some(200));
    assert_eq!(response.payload, json!([{"id": "r1"}]));
}

#[test]
fn test_status_mismatch_carries_codes() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/reviews/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({"detail": "Review not found"})),
            ),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute(&ApiRequest::get("reviews/missing"), None);

    assert!(!response.success);
    assert_eq!(response.status, Some(404));
    assert_eq!(
        response.payload,
        json!({"detail": "Review not found", "status_code": 404, "expected_status": 200})
    );
}

#[test]
fn test_malformed_body_falls_back_to_raw_text() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(502).set_body_string("<h1>Bad Gateway</h1>")),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute(&ApiRequest::get("categories"), None);

    assert!(!response.success);
    assert_eq!(response.str_field(RAW_RESPONSE_KEY), Some("<h1>Bad Gateway</h1>"));
    assert_eq!(response.payload["status_code"], 502);
}

#[test]
fn test_empty_body_is_empty_object() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("DELETE"))
            .and(path("/api/reviews/r1"))
            .respond_with(ResponseTemplate::new(204)),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let request = ApiRequest::delete("reviews/r1").expect_status(204);
    let response = client.execute(&request, None);

    assert!(response.success);
    assert_eq!(response.payload, json!({}));
}

#[test]
fn test_bearer_and_json_body_are_sent() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/reviews/r1/comments"))
            .and(header("Authorization", "Bearer secret"))
            .and(header("Content-Type", "application/json"))
            .and(body_json(json!({"content": "Harika!"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "c1"})))
            .expect(1),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let request = ApiRequest::post("reviews/r1/comments")
        .json(json!({"content": "Harika!"}))
        .authorized();
    let response = client.execute(&request, Some("secret"));

    assert!(response.success, "payload: {}", response.payload);
    assert_eq!(response.str_field("id"), Some("c1"));
}

#[test]
fn test_token_not_sent_when_auth_not_required() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": []}))),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    client.execute(&ApiRequest::get("categories"), Some("secret"));

    let requests = backend.received_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[test]
fn test_unsupported_method_makes_no_request() {
    let backend = MockBackend::start();
    let client = ApiClient::new(&backend.config()).unwrap();

    let response = client.execute_named("PATCH", "reviews/r1", Some(json!({})), 200, false, None);

    assert!(!response.success);
    assert_eq!(response.error_message(), Some("Unsupported method: PATCH"));
    assert!(backend.received_paths().is_empty());
}

#[test]
fn test_execute_named_supported_method() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("PUT"))
            .and(path("/api/reviews/r1"))
            .and(header("Authorization", "Bearer secret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "Yeni"}))),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute_named(
        "PUT",
        "reviews/r1",
        Some(json!({"title": "Yeni"})),
        200,
        true,
        Some("secret"),
    );

    assert!(response.success, "payload: {}", response.payload);
    assert_eq!(response.str_field("title"), Some("Yeni"));
}

#[test]
fn test_execute_named_auth_without_token_makes_no_request() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u1"})))
            .expect(0),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute_named("GET", "auth/me", None, 200, true, None);

    assert!(!response.success);
    assert_eq!(response.status, None);
    assert_eq!(response.error_message(), Some("No authentication token"));
    assert!(backend.received_paths().is_empty());
}

#[test]
fn test_execute_named_public_call_ignores_token() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"categories": []}))),
    );

    let client = ApiClient::new(&backend.config()).unwrap();
    let response = client.execute_named("GET", "categories", None, 200, false, Some("secret"));

    assert!(response.success);
    let requests = backend.received_requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[test]
fn test_connection_refused_is_reported_not_raised() {
    // Reserve a port, then free it so nothing is listening there
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = HarnessConfig::new(format!("http://127.0.0.1:{port}"))
        .with_request_timeout(Duration::from_secs(2))
        .with_connect_timeout(Duration::from_secs(1));
    let client = ApiClient::new(&config).unwrap();
    let response = client.execute(&ApiRequest::get("categories"), None);

    assert!(!response.success);
    assert_eq!(response.status, None);
    assert!(response.error_message().is_some_and(|m| !m.is_empty()));
}

#[test]
fn test_timeout_is_reported_not_raised() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/ai/assist"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"suggestion": "çok geç geldi"}))
                    .set_delay(Duration::from_secs(3)),
            ),
    );

    let config = backend.config().with_request_timeout(Duration::from_secs(1));
    let client = ApiClient::new(&config).unwrap();
    let response = client.execute(&ApiRequest::post("ai/assist").json(json!({})), None);

    assert!(!response.success);
    assert!(
        response
            .error_message()
            .is_some_and(|m| m.to_lowercase().contains("timed out")),
        "payload: {}",
        response.payload
    );
}
