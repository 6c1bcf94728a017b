//! End-to-end tests for the submission flow.
//!
//! Tests cover:
//! 1. Routing: path and method matching, OPTIONS handling on any path
//! 2. Validation: honeypot, required fields, email format
//! 3. Body formats: JSON, urlencoded, multipart, query string
//! 4. Notifications: Discord and Slack payload shapes, best-effort delivery

use http::Method;
use serde_json::{json, Value};

use formulator::Settings;
use formulator_test::{MockWebhooks, TestClient};

fn contact_settings() -> Settings {
    Settings {
        request_path: "/contact".into(),
        honeypot_field: Some("no-spam-pls".into()),
        required_fields: vec!["email".into(), "message".into()],
        email_fields: vec!["email".into()],
        ..Settings::default()
    }
}

/// Contact settings without a honeypot, for body-format tests.
fn plain_settings() -> Settings {
    Settings {
        honeypot_field: None,
        ..contact_settings()
    }
}

// ============================================================================
// 1. Routing
// ============================================================================

#[tokio::test]
async fn test_valid_submission_is_accepted() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "hi", "no-spam-pls": ""}),
        )
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.code().as_deref(), Some("form_submitted"));
    assert_eq!(
        response.header("content-type"),
        Some("application/json;charset=UTF-8")
    );
    assert!(response.has_cors_headers());
}

#[tokio::test]
async fn test_wrong_method_is_rejected() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.get("/contact").await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "method_not_allowed");
    assert_eq!(body["method"], "GET");
    assert_eq!(body["detail"], "Method GET not allowed.");
    assert!(response.has_cors_headers());
}

#[tokio::test]
async fn test_head_is_a_wrong_method() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.head("/contact").await;
    assert_eq!(response.status_code(), 400);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.post_json("/elsewhere", &json!({})).await;

    assert_eq!(response.status_code(), 404);
    assert_eq!(response.code().as_deref(), Some("path_not_found"));
    assert!(response.has_cors_headers());
}

#[tokio::test]
async fn test_path_is_checked_before_method() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.get("/elsewhere").await;
    assert_eq!(response.status_code(), 404);
}

#[tokio::test]
async fn test_preflight_returns_cors_headers() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.preflight("/contact", "https://example.com").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.is_empty());
    assert!(response.has_cors_headers());
    assert!(!response.has_header("allow"));
}

#[tokio::test]
async fn test_bare_options_returns_allow() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.options("/contact").await;

    assert_eq!(response.status_code(), 200);
    assert!(response.is_empty());
    assert_eq!(response.header("allow"), Some("GET, HEAD, POST, OPTIONS"));
    assert!(!response.has_header("access-control-allow-origin"));
}

#[tokio::test]
async fn test_partial_preflight_is_bare_options() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .request(
            Method::OPTIONS,
            "/contact",
            &[("origin", "https://example.com")],
            Vec::new(),
        )
        .await;

    assert!(response.has_header("allow"));
    assert!(!response.has_cors_headers());
}

#[tokio::test]
async fn test_options_on_any_path() {
    let client = TestClient::from_settings(contact_settings());
    let response = client.preflight("/not/configured", "https://example.com").await;
    assert_eq!(response.status_code(), 200);
    assert!(response.has_cors_headers());
}

// ============================================================================
// 2. Validation
// ============================================================================

#[tokio::test]
async fn test_filled_honeypot_is_rejected() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "hi", "no-spam-pls": "bot"}),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "invalid_request");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn test_absent_honeypot_is_rejected() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json("/contact", &json!({"email": "a@b.com", "message": "hi"}))
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.code().as_deref(), Some("invalid_request"));
}

#[tokio::test]
async fn test_honeypot_is_checked_before_allow_list() {
    let settings = Settings {
        form_fields: vec!["email".into(), "message".into()],
        ..contact_settings()
    };
    let client = TestClient::from_settings(settings);
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "hi", "no-spam-pls": "bot"}),
        )
        .await;

    assert_eq!(response.code().as_deref(), Some("invalid_request"));
}

#[tokio::test]
async fn test_missing_required_fields_are_listed_in_order() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json("/contact", &json!({"no-spam-pls": "", "message": ""}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "missing_required_fields");
    assert_eq!(body["detail"], "Some required fields are missing.");

    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["field"], "email");
    assert_eq!(errors[0]["code"], "missing_required_field");
    assert_eq!(errors[1]["field"], "message");
}

#[tokio::test]
async fn test_invalid_email_is_reported_with_value() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "not-an-email", "message": "hi", "no-spam-pls": ""}),
        )
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "invalid_email_fields");
    assert_eq!(body["errors"][0]["field"], "email");
    assert_eq!(body["errors"][0]["code"], "invalid_email");
    assert_eq!(body["errors"][0]["value"], "not-an-email");
}

#[tokio::test]
async fn test_required_check_precedes_email_check() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json("/contact", &json!({"email": "bad", "no-spam-pls": ""}))
        .await;

    assert_eq!(response.code().as_deref(), Some("missing_required_fields"));
}

#[tokio::test]
async fn test_falsy_json_values_count_as_missing() {
    let settings = Settings {
        required_fields: vec!["message".into(), "consent".into()],
        email_fields: Vec::new(),
        ..plain_settings()
    };
    let client = TestClient::from_settings(settings);
    let response = client
        .post_json("/contact", &json!({"message": 0, "consent": false}))
        .await;

    assert_eq!(response.status_code(), 400);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "missing_required_fields");
    assert_eq!(body["errors"][0]["field"], "message");
    assert_eq!(body["errors"][1]["field"], "consent");
}

#[tokio::test]
async fn test_false_honeypot_is_rejected() {
    let client = TestClient::from_settings(contact_settings());
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "hi", "no-spam-pls": false}),
        )
        .await;

    assert_eq!(response.code().as_deref(), Some("invalid_request"));
}

// ============================================================================
// 3. Body formats
// ============================================================================

#[tokio::test]
async fn test_urlencoded_submission() {
    let client = TestClient::from_settings(plain_settings());
    let response = client
        .post_form("/contact", &[("email", "a@b.com"), ("message", "hello there")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.code().as_deref(), Some("form_submitted"));
}

#[tokio::test]
async fn test_multipart_submission() {
    let client = TestClient::from_settings(plain_settings());
    let response = client
        .post_multipart("/contact", &[("email", "a@b.com"), ("message", "hi")])
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.code().as_deref(), Some("form_submitted"));
}

#[tokio::test]
async fn test_lf_multipart_with_empty_honeypot() {
    let client = TestClient::from_settings(contact_settings());
    let body = "--lf\nContent-Disposition: form-data; name=\"email\"\n\na@b.com\n\
                --lf\nContent-Disposition: form-data; name=\"message\"\n\nhi\n\
                --lf\nContent-Disposition: form-data; name=\"no-spam-pls\"\n\n\n\
                --lf--\n";
    let response = client
        .post_raw(
            "/contact",
            "multipart/form-data; boundary=lf",
            body.as_bytes().to_vec(),
        )
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.code().as_deref(), Some("form_submitted"));
}

#[tokio::test]
async fn test_query_string_submission() {
    let client = TestClient::from_settings(plain_settings());
    let response = client
        .request(
            Method::POST,
            "/contact?email=a%40b.com&message=hi",
            &[],
            Vec::new(),
        )
        .await;

    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_malformed_json_counts_as_empty_submission() {
    let client = TestClient::from_settings(plain_settings());
    let response = client
        .post_raw("/contact", "application/json", b"{not json".to_vec())
        .await;

    assert_eq!(response.status_code(), 400);
    assert_eq!(response.code().as_deref(), Some("missing_required_fields"));
}

#[tokio::test]
async fn test_oversized_body_is_internal_error() {
    let settings = Settings {
        max_body_bytes: 16,
        ..plain_settings()
    };
    let client = TestClient::from_settings(settings);
    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "a message longer than sixteen bytes"}),
        )
        .await;

    assert_eq!(response.status_code(), 500);
    let body: Value = response.json().unwrap();
    assert_eq!(body["code"], "internal_error");
    assert_eq!(body["detail"], "Internal server error.");
}

// ============================================================================
// 4. Notifications
// ============================================================================

#[tokio::test]
async fn test_submission_reaches_both_webhooks() {
    let mocks = MockWebhooks::start().await;
    let client = TestClient::from_settings(mocks.configure(plain_settings()));

    let response = client
        .post_json("/contact", &json!({"message": "hi", "email": "a@b.com"}))
        .await;
    assert_eq!(response.status_code(), 200);

    let discord = mocks.discord_requests().await;
    assert_eq!(discord.len(), 1);
    assert_eq!(
        discord[0].content_type.as_deref(),
        Some("application/json;charset=UTF-8")
    );
    assert_eq!(
        discord[0].body,
        json!({"embeds": [{"fields": [
            {"name": "message", "value": "hi"},
            {"name": "email", "value": "a@b.com"}
        ]}]})
    );

    let slack = mocks.slack_requests().await;
    assert_eq!(slack.len(), 1);
    assert_eq!(slack[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        slack[0].body,
        json!({"blocks": [{"type": "section", "fields": [
            {"type": "mrkdwn", "text": "*message*\nhi"},
            {"type": "mrkdwn", "text": "*email*\na@b.com"}
        ]}]})
    );
}

#[tokio::test]
async fn test_webhooks_receive_normalized_fields() {
    let mocks = MockWebhooks::start().await;
    let settings = Settings {
        form_fields: vec!["email".into(), "message".into()],
        ..contact_settings()
    };
    let client = TestClient::from_settings(mocks.configure(settings));

    let response = client
        .post_json(
            "/contact",
            &json!({
                "message": "hi",
                "email": "a@b.com",
                "tracking": "utm",
                "no-spam-pls": ""
            }),
        )
        .await;
    assert_eq!(response.status_code(), 200);

    let discord = mocks.discord_requests().await;
    assert_eq!(
        discord[0].body["embeds"][0]["fields"],
        json!([
            {"name": "email", "value": "a@b.com"},
            {"name": "message", "value": "hi"}
        ])
    );
}

#[tokio::test]
async fn test_failing_webhooks_do_not_fail_submission() {
    let mocks = MockWebhooks::with_status(500, 404).await;
    let client = TestClient::from_settings(mocks.configure(plain_settings()));

    let response = client
        .post_json("/contact", &json!({"email": "a@b.com", "message": "hi"}))
        .await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.code().as_deref(), Some("form_submitted"));
    assert_eq!(mocks.discord_requests().await.len(), 1);
    assert_eq!(mocks.slack_requests().await.len(), 1);
}

#[tokio::test]
async fn test_unreachable_webhook_does_not_fail_submission() {
    let settings = Settings {
        discord_webhook_url: Some("http://127.0.0.1:9/unreachable".into()),
        webhook_timeout_secs: 1,
        ..plain_settings()
    };
    let client = TestClient::from_settings(settings);

    let response = client
        .post_json("/contact", &json!({"email": "a@b.com", "message": "hi"}))
        .await;
    assert_eq!(response.status_code(), 200);
}

#[tokio::test]
async fn test_rejected_submission_is_not_forwarded() {
    let mocks = MockWebhooks::start().await;
    let client = TestClient::from_settings(mocks.configure(contact_settings()));

    let response = client
        .post_json(
            "/contact",
            &json!({"email": "a@b.com", "message": "hi", "no-spam-pls": "bot"}),
        )
        .await;
    assert_eq!(response.status_code(), 400);

    assert!(mocks.discord_requests().await.is_empty());
    assert!(mocks.slack_requests().await.is_empty());
}

#[tokio::test]
async fn test_only_configured_webhook_is_called() {
    let mocks = MockWebhooks::start().await;
    let settings = Settings {
        slack_webhook_url: Some(mocks.slack_url()),
        ..plain_settings()
    };
    let client = TestClient::from_settings(settings);

    client
        .post_json("/contact", &json!({"email": "a@b.com", "message": "hi"}))
        .await;

    assert!(mocks.discord_requests().await.is_empty());
    assert_eq!(mocks.slack_requests().await.len(), 1);
}
