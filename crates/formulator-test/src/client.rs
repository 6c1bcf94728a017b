//! HTTP test client for formulator.
//!
//! This module provides [`TestClient`] for making simulated HTTP requests
//! against the formulator router, and [`TestResponse`] for inspecting the
//! results. Requests go through `tower::ServiceExt::oneshot`, so no port is
//! bound.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use formulator_core::Settings;
//! use formulator_test::TestClient;
//!
//! async fn example() {
//!     let client = TestClient::from_settings(Settings::default());
//!
//!     let response = client.post_json("/", &serde_json::json!({"email": "a@b.com"})).await;
//!     assert_eq!(response.status_code(), 200);
//!     assert_eq!(response.code(), Some("form_submitted".to_string()));
//! }
//! ```

use axum::Router;
use bytes::Bytes;
use http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use tower::ServiceExt;

use formulator_core::{FormulatorError, Settings};
use formulator_http::Envelope;
use formulator_views::FormulatorApp;

/// A test client for making simulated HTTP requests against a router.
#[derive(Debug, Clone)]
pub struct TestClient {
    app: Router,
}

impl TestClient {
    /// Creates a new test client wrapping the given Axum router.
    pub fn new(app: Router) -> Self {
        Self { app }
    }

    /// Creates a client for a [`FormulatorApp`] built from `settings`.
    pub fn from_settings(settings: Settings) -> Self {
        Self::new(FormulatorApp::new(settings).into_axum_router())
    }

    /// Sends a GET request to the given path.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Method::GET, path, &[], Vec::new()).await
    }

    /// Sends a HEAD request to the given path.
    pub async fn head(&self, path: &str) -> TestResponse {
        self.request(Method::HEAD, path, &[], Vec::new()).await
    }

    /// Sends a POST request with a JSON body.
    pub async fn post_json(&self, path: &str, data: &serde_json::Value) -> TestResponse {
        self.post_raw(path, "application/json", data.to_string().into_bytes())
            .await
    }

    /// Sends a POST request with URL-encoded form data, in the given order.
    pub async fn post_form(&self, path: &str, data: &[(&str, &str)]) -> TestResponse {
        self.post_raw(
            path,
            "application/x-www-form-urlencoded",
            Self::encode_form_data(data).into_bytes(),
        )
        .await
    }

    /// Sends a POST request with `multipart/form-data` text fields.
    pub async fn post_multipart(&self, path: &str, data: &[(&str, &str)]) -> TestResponse {
        const BOUNDARY: &str = "formulator-test-boundary";

        let mut body = String::new();
        for (name, value) in data {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));

        let content_type = format!("multipart/form-data; boundary={BOUNDARY}");
        self.post_raw(path, &content_type, body.into_bytes()).await
    }

    /// Sends a POST request with an arbitrary body and content type.
    pub async fn post_raw(&self, path: &str, content_type: &str, body: Vec<u8>) -> TestResponse {
        self.request(Method::POST, path, &[("content-type", content_type)], body)
            .await
    }

    /// Sends a bare OPTIONS request.
    pub async fn options(&self, path: &str) -> TestResponse {
        self.request(Method::OPTIONS, path, &[], Vec::new()).await
    }

    /// Sends a CORS preflight: OPTIONS with `Origin` and both
    /// `Access-Control-Request-*` headers.
    pub async fn preflight(&self, path: &str, origin: &str) -> TestResponse {
        self.request(
            Method::OPTIONS,
            path,
            &[
                ("origin", origin),
                ("access-control-request-method", "POST"),
                ("access-control-request-headers", "Content-Type"),
            ],
            Vec::new(),
        )
        .await
    }

    /// Sends a request with the given method, headers, and body.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        headers: &[(&str, &str)],
        body: Vec<u8>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }

        let req = builder
            .body(axum::body::Body::from(body))
            .expect("request builder should not fail");

        self.send(req).await
    }

    /// Encodes form data as a URL-encoded string.
    fn encode_form_data(data: &[(&str, &str)]) -> String {
        data.iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, NON_ALPHANUMERIC),
                    utf8_percent_encode(v, NON_ALPHANUMERIC)
                )
            })
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Sends the request through the Axum router and builds a `TestResponse`.
    async fn send(&self, req: Request<axum::body::Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(req)
            .await
            .expect("router should not error");

        let status = response.status();
        let headers = response.headers().clone();

        let body_bytes = response
            .into_body()
            .collect()
            .await
            .map_or_else(|_| Bytes::new(), http_body_util::Collected::to_bytes);

        TestResponse {
            status,
            headers,
            body: body_bytes.to_vec(),
        }
    }
}

/// The response from a test request.
#[derive(Debug)]
pub struct TestResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body as raw bytes.
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Returns the response body as a UTF-8 string.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Deserializes the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, FormulatorError> {
        serde_json::from_slice(&self.body)
            .map_err(|e| FormulatorError::SerializationError(e.to_string()))
    }

    /// Deserializes the response body as a response envelope.
    pub fn envelope(&self) -> Result<Envelope, FormulatorError> {
        self.json()
    }

    /// Returns the envelope's `code`, if the body is a JSON object with one.
    pub fn code(&self) -> Option<String> {
        self.json::<serde_json::Value>()
            .ok()
            .and_then(|v| v.get("code").and_then(|c| c.as_str()).map(String::from))
    }

    /// Returns the numeric status code.
    pub fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns the value of a header by name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns `true` if the response has the specified header.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Returns `true` if all three CORS response headers are present.
    pub fn has_cors_headers(&self) -> bool {
        self.header("access-control-allow-origin") == Some("*")
            && self.header("access-control-allow-methods") == Some("GET, HEAD, POST, OPTIONS")
            && self.header("access-control-allow-headers") == Some("Content-Type")
    }

    /// Returns `true` if the body is empty.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
