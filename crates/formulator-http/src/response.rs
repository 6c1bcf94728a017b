//! Response types.
//!
//! Every answer the handler gives is either a JSON [`Envelope`] or an empty
//! OPTIONS reply. [`HttpResponse`] carries status, headers, and body, and
//! converts into an Axum response via [`IntoResponse`].

use axum::response::IntoResponse;
use http::header::{self, HeaderName};
use http::{HeaderMap, HeaderValue, StatusCode};
use serde::{Deserialize, Serialize};

use formulator_core::{FieldError, ResponseCode};

/// Content type of every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=UTF-8";

/// Methods advertised in `Allow` and `Access-Control-Allow-Methods`.
pub const ALLOWED_METHODS: &str = "GET, HEAD, POST, OPTIONS";

/// Request headers a cross-origin caller may send.
pub const ALLOWED_HEADERS: &str = "Content-Type";

/// Pre-rendered body used when the envelope itself cannot be serialized.
const INTERNAL_ERROR_BODY: &str =
    r#"{"code":"internal_error","detail":"Internal server error."}"#;

/// The JSON body of every non-OPTIONS response.
///
/// `errors` is present only on validation failures, `method` only on
/// `method_not_allowed`.
///
/// # Examples
///
/// ```
/// use formulator_core::ResponseCode;
/// use formulator_http::Envelope;
///
/// let envelope = Envelope::new(ResponseCode::PathNotFound);
/// let json = serde_json::to_value(&envelope).unwrap();
/// assert_eq!(json["code"], "path_not_found");
/// assert_eq!(json["detail"], "Path not found.");
/// assert!(json.get("errors").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Outcome code.
    pub code: ResponseCode,
    /// The rejected method, for `method_not_allowed`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Human-readable outcome.
    pub detail: String,
    /// Field-level errors of a failed validation stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<FieldError>>,
}

impl Envelope {
    /// Creates an envelope with the code's default detail.
    pub fn new(code: ResponseCode) -> Self {
        Self {
            code,
            method: None,
            detail: code.detail().to_string(),
            errors: None,
        }
    }

    /// Creates a `method_not_allowed` envelope naming the offending method.
    pub fn method_not_allowed(method: &str) -> Self {
        Self {
            code: ResponseCode::MethodNotAllowed,
            method: Some(method.to_string()),
            detail: format!("Method {method} not allowed."),
            errors: None,
        }
    }

    /// Attaches a list of field errors.
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldError>) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Returns the HTTP status for this envelope's code.
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.code.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// An HTTP response produced by the handler.
///
/// # Examples
///
/// ```
/// use formulator_core::ResponseCode;
/// use formulator_http::HttpResponse;
///
/// let response = HttpResponse::from_code(ResponseCode::FormSubmitted);
/// assert_eq!(response.status(), http::StatusCode::OK);
/// assert_eq!(response.header("access-control-allow-origin"), Some("*"));
/// ```
#[derive(Debug, Clone)]
pub struct HttpResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl HttpResponse {
    /// Creates an empty response with the given status and no headers.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Renders an envelope as JSON with the JSON content type and CORS headers.
    ///
    /// A serialization failure yields the generic 500 envelope instead.
    pub fn json(envelope: &Envelope) -> Self {
        match serde_json::to_vec(envelope) {
            Ok(body) => {
                let mut response = Self::empty(envelope.status());
                response.body = body;
                response.insert_json_headers();
                response
            }
            Err(e) => {
                tracing::error!(error = %e, code = %envelope.code, "failed to serialize response envelope");
                Self::internal_error()
            }
        }
    }

    /// Renders the envelope for a code with its default detail.
    pub fn from_code(code: ResponseCode) -> Self {
        Self::json(&Envelope::new(code))
    }

    /// Renders a validation failure carrying its field errors.
    pub fn rejected(code: ResponseCode, errors: Vec<FieldError>) -> Self {
        Self::json(&Envelope::new(code).with_errors(errors))
    }

    /// Renders a `method_not_allowed` response.
    pub fn method_not_allowed(method: &str) -> Self {
        Self::json(&Envelope::method_not_allowed(method))
    }

    /// The structured 500 response. Never carries diagnostic text.
    pub fn internal_error() -> Self {
        let mut response = Self::empty(StatusCode::INTERNAL_SERVER_ERROR);
        response.body = INTERNAL_ERROR_BODY.as_bytes().to_vec();
        response.insert_json_headers();
        response
    }

    /// An empty 200 answering a CORS preflight: CORS headers only.
    pub fn preflight() -> Self {
        let mut response = Self::empty(StatusCode::OK);
        response.insert_cors_headers();
        response
    }

    /// An empty 200 answering a plain OPTIONS request: `Allow` only.
    pub fn options_allow() -> Self {
        let mut response = Self::empty(StatusCode::OK);
        response
            .headers
            .insert(header::ALLOW, HeaderValue::from_static(ALLOWED_METHODS));
        response
    }

    /// Returns the status code.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns a header value as a string, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns the body bytes.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    fn insert_json_headers(&mut self) {
        self.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        self.insert_cors_headers();
    }

    fn insert_cors_headers(&mut self) {
        for (name, value) in cors_headers() {
            self.headers.insert(name, value);
        }
    }
}

/// The three CORS headers attached to every JSON response and preflight.
pub fn cors_headers() -> [(HeaderName, HeaderValue); 3] {
    [
        (
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ),
        (
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ),
    ]
}

impl IntoResponse for HttpResponse {
    fn into_response(self) -> axum::response::Response {
        let mut response = axum::response::Response::new(axum::body::Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
