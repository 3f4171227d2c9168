//! Full pipeline runs against healthy and partially broken backends

use super::helpers::{username, MockBackend, COMMENT_ID, REVIEW_ID, TOKEN, USER_ID};
use forum_smoke::outcome::Verdict;
use forum_smoke::steps::{Step, PIPELINE};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_healthy_backend_passes_every_step() {
    let backend = MockBackend::start();
    backend.mount_healthy_forum();

    let mut harness = backend.harness();
    let summary = harness.run();

    let failures: Vec<_> = harness.outcomes().iter().filter(|o| !o.success).collect();
    assert!(failures.is_empty(), "unexpected failures: {failures:#?}");
    assert_eq!(summary.attempted, 18);
    assert_eq!(summary.passed, 18);
    assert_eq!(summary.exit_code(), 0);

    let session = harness.session();
    assert_eq!(session.token.as_deref(), Some(TOKEN));
    assert_eq!(session.user_id.as_deref(), Some(USER_ID));
    assert_eq!(session.username.as_deref(), Some(username().as_str()));
    assert_eq!(session.review_id.as_deref(), Some(REVIEW_ID));
    assert_eq!(session.comment_id.as_deref(), Some(COMMENT_ID));
}

#[test]
fn test_outcomes_follow_pipeline_order() {
    let backend = MockBackend::start();
    backend.mount_healthy_forum();

    let mut harness = backend.harness();
    harness.run();

    let names: Vec<&str> = harness.outcomes().iter().map(|o| o.name.as_str()).collect();
    let expected: Vec<&str> = PIPELINE.iter().map(Step::name).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_registration_sends_generated_user() {
    let backend = MockBackend::start();
    backend.mount_healthy_forum();

    let mut harness = backend.harness();
    assert!(harness.run_step(Step::Registration));

    let register = backend
        .received_requests()
        .into_iter()
        .find(|r| r.url.path() == "/api/auth/register")
        .expect("registration request");
    let body: Value = serde_json::from_slice(&register.body).unwrap();
    assert_eq!(
        body,
        json!({
            "email": "test_user_153045@example.com",
            "username": "testuser_153045",
            "password": "TestPass123!"
        })
    );

    assert!(harness.run_step(Step::CurrentUser));
    assert_eq!(
        harness.outcomes()[1].detail,
        format!("- User: {}", username())
    );
}

#[test]
fn test_current_user_must_match_registration() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/auth/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": USER_ID,
                "username": "someone_else",
            }))),
    );

    let mut session = forum_smoke::session::Session::with_run_id("153045");
    session.authenticate(TOKEN.to_string(), USER_ID.to_string(), username());
    let mut harness = forum_smoke::harness::Harness::with_session(&backend.config(), session)
        .unwrap()
        .quiet();

    assert!(!harness.run_step(Step::CurrentUser));
    assert_eq!(
        harness.outcomes()[0].detail,
        "- Expected user testuser_153045, got someone_else"
    );
}

#[test]
fn test_update_round_trips_title() {
    let backend = MockBackend::start();
    backend.mount_healthy_forum();

    let mut harness = backend.harness();
    for step in [Step::Registration, Step::CreateReview, Step::UpdateReview] {
        assert!(harness.run_step(step), "{step} failed");
    }

    let update = backend
        .received_requests()
        .into_iter()
        .find(|r| r.method.as_str() == "PUT")
        .expect("update request");
    let body: Value = serde_json::from_slice(&update.body).unwrap();
    assert_eq!(body["title"], "Güncellenmiş Test İncelemesi");
}

#[test]
fn test_update_fails_when_title_not_echoed() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("PUT"))
            .and(path(format!("/api/reviews/{REVIEW_ID}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": REVIEW_ID,
                "title": "Test Oyun İncelemesi",
            }))),
    );

    let mut session = forum_smoke::session::Session::with_run_id("153045");
    session.token = Some(TOKEN.to_string());
    session.review_id = Some(REVIEW_ID.to_string());
    let mut harness = forum_smoke::harness::Harness::with_session(&backend.config(), session)
        .unwrap()
        .quiet();

    assert!(!harness.run_step(Step::UpdateReview));
    assert!(harness.outcomes()[0].detail.starts_with("- Response: "));
}

#[test]
fn test_ai_outage_still_exits_zero() {
    let backend = MockBackend::start();
    backend.mount_basics();
    backend.mount_auth();
    backend.mount_reviews();
    backend.mount_social();
    backend.mount_profile();
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/ai/assist"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "AI down"}))),
    );
    backend.mount(
        Mock::given(method("POST"))
            .and(path("/api/ai/explain"))
            .respond_with(ResponseTemplate::new(503).set_body_json(json!({"detail": "AI down"}))),
    );

    let mut harness = backend.harness();
    let summary = harness.run();

    assert_eq!(summary.attempted, 18);
    assert_eq!(summary.passed, 16);
    assert_eq!(summary.verdict(), Verdict::Healthy);
    assert_eq!(summary.exit_code(), 0);

    let failed: Vec<&str> = harness
        .outcomes()
        .iter()
        .filter(|o| !o.success)
        .map(|o| o.name.as_str())
        .collect();
    assert_eq!(failed, vec!["AI Writing Assistant", "AI Word Explanation"]);
}

#[test]
fn test_short_ai_text_fails() {
    let backend = MockBackend::start();
    backend.mount_ai("Kısa.", "0123456789");

    let mut harness = backend.harness();
    assert!(!harness.run_step(Step::AiExplain));

    // Exactly ten characters is still too short
    assert!(harness.outcomes()[0].detail.contains("0123456789"));
}

#[test]
fn test_ai_explanation_scenario() {
    let backend = MockBackend::start();
    backend.mount_ai("unused", "Peak yapmak: en yüksek seviyede performans göstermek.");

    let mut harness = backend.harness();
    assert!(harness.run_step(Step::AiExplain));
    assert_eq!(harness.outcomes()[0].detail, "- Got explanation (53 chars)");

    let explain = backend
        .received_requests()
        .into_iter()
        .find(|r| r.url.path() == "/api/ai/explain")
        .expect("explain request");
    let body: Value = serde_json::from_slice(&explain.body).unwrap();
    assert_eq!(body["word"], "peak yapmak");
    assert!(explain.headers.get("authorization").is_none());
}

#[test]
fn test_categories_missing_known_entries_fails() {
    let backend = MockBackend::start();
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"categories": ["Aksiyon", "Korku"]})),
            ),
    );

    let mut harness = backend.harness();
    assert!(!harness.run_step(Step::Categories));
    assert_eq!(harness.outcomes()[0].detail, "- Found 2 categories");
}

#[test]
fn test_long_error_page_keeps_status_in_detail() {
    let backend = MockBackend::start();
    let page = format!("<html><body>{}</body></html>", "Bad Gateway ".repeat(40));
    backend.mount(
        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(502).set_body_string(page)),
    );

    let mut harness = backend.harness();
    assert!(!harness.run_step(Step::Categories));

    let detail = &harness.outcomes()[0].detail;
    assert!(detail.contains("Bad Gateway"), "detail: {detail}");
    assert!(detail.ends_with("(status 502, expected 200)"), "detail: {detail}");
}

#[test]
fn test_read_only_steps_are_idempotent() {
    let backend = MockBackend::start();
    backend.mount_healthy_forum();

    let mut session = forum_smoke::session::Session::with_run_id("153045");
    session.review_id = Some(REVIEW_ID.to_string());
    let mut harness = forum_smoke::harness::Harness::with_session(&backend.config(), session)
        .unwrap()
        .quiet();

    let steps = [Step::Categories, Step::ListReviews, Step::ListComments];
    let first: Vec<bool> = steps.iter().map(|s| harness.run_step(*s)).collect();
    let second: Vec<bool> = steps.iter().map(|s| harness.run_step(*s)).collect();

    assert_eq!(first, second);
    assert_eq!(first, vec![true, true, true]);
    assert_eq!(harness.summary().attempted, 6);
}
