//! Incoming request type.
//!
//! [`FormRequest`] holds the parts of an HTTP request the handler looks at:
//! method, path, query string, headers, and the buffered body. Its
//! [`submission`](FormRequest::submission) method turns the body into the flat
//! [`FieldMap`] the validation pipeline works on.

use http::{HeaderMap, Method};
use serde_json::Value;

use formulator_core::FieldMap;

use crate::multipart;
use crate::querydict;

/// An incoming form-submission request.
///
/// Instances are typically created from an incoming Axum request via
/// [`FormRequest::from_axum`], or with [`FormRequest::builder`] in tests.
///
/// # Examples
///
/// ```
/// use formulator_http::FormRequest;
///
/// let request = FormRequest::builder()
///     .method(http::Method::POST)
///     .path("/contact")
///     .content_type("application/json")
///     .body(br#"{"email": "ada@example.com"}"#.to_vec())
///     .build();
///
/// assert_eq!(request.path(), "/contact");
/// assert_eq!(request.submission().get("email"), Some("ada@example.com"));
/// ```
#[derive(Debug, Clone)]
pub struct FormRequest {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl FormRequest {
    /// Creates a new builder for constructing a `FormRequest`.
    pub fn builder() -> FormRequestBuilder {
        FormRequestBuilder::default()
    }

    /// Creates a `FormRequest` from Axum request parts and the buffered body.
    pub fn from_axum(parts: http::request::Parts, body: Vec<u8>) -> Self {
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);

        Self {
            method: parts.method,
            path: parts.uri.path().to_string(),
            query_string: parts.uri.query().unwrap_or("").to_string(),
            content_type,
            headers: parts.headers,
            body,
        }
    }

    /// Returns the HTTP method.
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path (without the query string).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string, without the leading `?`.
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the `Content-Type` header value, if present.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Returns the request headers.
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the raw request body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns `true` if the request carries a header with the given name.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Returns `true` if this is a CORS preflight request.
    ///
    /// A preflight carries `Origin`, `Access-Control-Request-Method`, and
    /// `Access-Control-Request-Headers`. The method itself is not checked here.
    pub fn is_cors_preflight(&self) -> bool {
        self.has_header(http::header::ORIGIN.as_str())
            && self.has_header(http::header::ACCESS_CONTROL_REQUEST_METHOD.as_str())
            && self.has_header(http::header::ACCESS_CONTROL_REQUEST_HEADERS.as_str())
    }

    /// Decodes the submitted fields.
    ///
    /// The source is chosen by content type:
    ///
    /// - contains `application/json`: the body as a JSON object
    /// - contains `form`: the body as multipart or URL-encoded fields
    /// - anything else: the URL query string
    ///
    /// Decoding is total. Malformed input yields an empty or partial map and
    /// nothing is validated here.
    pub fn submission(&self) -> FieldMap {
        let content_type = self.content_type().unwrap_or("");

        if content_type.contains("application/json") {
            decode_json(&self.body)
        } else if content_type.contains("form") {
            if content_type.contains("multipart/form-data") {
                multipart::extract_boundary(content_type)
                    .map(|boundary| multipart::parse_multipart(&self.body, boundary))
                    .unwrap_or_default()
            } else {
                querydict::parse(&String::from_utf8_lossy(&self.body))
            }
        } else {
            querydict::parse(&self.query_string)
        }
    }
}

/// Decodes a JSON object body into a [`FieldMap`].
///
/// Strings are kept as-is, numbers and `true` become their JSON text, and
/// nested arrays or objects become compact JSON text. Falsy members (`null`,
/// `false`, and numeric zero) are omitted, so they read as absent. A malformed
/// body or a non-object top level decodes to an empty map.
pub fn decode_json(body: &[u8]) -> FieldMap {
    let object = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(object)) => object,
        Ok(_) => {
            tracing::debug!("JSON submission is not an object");
            return FieldMap::new();
        }
        Err(e) => {
            tracing::debug!(error = %e, "malformed JSON submission");
            return FieldMap::new();
        }
    };

    object
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(s) => Some((name, s)),
            other => Some((name, other.to_string())),
        })
        .collect()
}

/// Builder for constructing [`FormRequest`] instances.
#[derive(Debug)]
pub struct FormRequestBuilder {
    method: Method,
    path: String,
    query_string: String,
    content_type: Option<String>,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl Default for FormRequestBuilder {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
            content_type: None,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }
}

impl FormRequestBuilder {
    /// Sets the HTTP method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_string();
        self
    }

    /// Sets the query string.
    #[must_use]
    pub fn query_string(mut self, qs: &str) -> Self {
        self.query_string = qs.to_string();
        self
    }

    /// Sets the content type, both as a field and as a header.
    #[must_use]
    pub fn content_type(mut self, ct: &str) -> Self {
        self.content_type = Some(ct.to_string());
        self.header(http::header::CONTENT_TYPE.as_str(), ct)
    }

    /// Adds a header. Invalid names or values are ignored.
    #[must_use]
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::header::HeaderName::from_bytes(name.as_bytes()),
            http::header::HeaderValue::from_str(value),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the request body.
    #[must_use]
    pub fn body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Builds the `FormRequest`.
    pub fn build(self) -> FormRequest {
        FormRequest {
            method: self.method,
            path: self.path,
            query_string: self.query_string,
            content_type: self.content_type,
            headers: self.headers,
            body: self.body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content_type: &str, body: &str) -> FormRequest {
        FormRequest::builder()
            .method(Method::POST)
            .content_type(content_type)
            .body(body.as_bytes().to_vec())
            .build()
    }

    #[test]
    fn test_builder_defaults() {
        let request = FormRequest::builder().build();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.query_string(), "");
        assert!(request.content_type().is_none());
        assert!(request.body().is_empty());
    }

    #[test]
    fn test_from_axum() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/contact?ref=home")
            .header("content-type", "application/json")
            .body(())
            .unwrap();
        let (parts, ()) = request.into_parts();

        let req = FormRequest::from_axum(parts, b"{}".to_vec());
        assert_eq!(req.method(), &Method::POST);
        assert_eq!(req.path(), "/contact");
        assert_eq!(req.query_string(), "ref=home");
        assert_eq!(req.content_type(), Some("application/json"));
        assert_eq!(req.body(), b"{}");
    }

    #[test]
    fn test_cors_preflight_requires_all_three_headers() {
        let full = FormRequest::builder()
            .method(Method::OPTIONS)
            .header("origin", "https://example.com")
            .header("access-control-request-method", "POST")
            .header("access-control-request-headers", "content-type")
            .build();
        assert!(full.is_cors_preflight());

        let partial = FormRequest::builder()
            .method(Method::OPTIONS)
            .header("origin", "https://example.com")
            .header("access-control-request-method", "POST")
            .build();
        assert!(!partial.is_cors_preflight());
    }

    // ── JSON ────────────────────────────────────────────────────────

    #[test]
    fn test_submission_json_object() {
        let req = post(
            "application/json",
            r#"{"message": "hi", "email": "a@b.com", "no-spam-pls": ""}"#,
        );
        let fields = req.submission();
        assert_eq!(fields.get("email"), Some("a@b.com"));
        assert_eq!(fields.get("message"), Some("hi"));
        assert_eq!(fields.get("no-spam-pls"), Some(""));
        assert_eq!(
            fields.keys().collect::<Vec<_>>(),
            vec!["message", "email", "no-spam-pls"]
        );
    }

    #[test]
    fn test_submission_json_with_charset() {
        let req = post("application/json; charset=utf-8", r#"{"a": "1"}"#);
        assert_eq!(req.submission().get("a"), Some("1"));
    }

    #[test]
    fn test_decode_json_scalar_rendering() {
        let fields = decode_json(
            br#"{"age": 42, "ratio": 1.5, "subscribe": true, "gone": null, "tags": ["a", "b"], "meta": {"k": 1}}"#,
        );
        assert_eq!(fields.get("age"), Some("42"));
        assert_eq!(fields.get("ratio"), Some("1.5"));
        assert_eq!(fields.get("subscribe"), Some("true"));
        assert!(!fields.contains_key("gone"));
        assert_eq!(fields.get("tags"), Some(r#"["a","b"]"#));
        assert_eq!(fields.get("meta"), Some(r#"{"k":1}"#));
    }

    #[test]
    fn test_decode_json_drops_falsy_members() {
        let fields = decode_json(
            br#"{"consent": false, "count": 0, "ratio": 0.0, "neg": -0, "kept": "0", "one": 1}"#,
        );
        assert!(!fields.contains_key("consent"));
        assert!(!fields.contains_key("count"));
        assert!(!fields.contains_key("ratio"));
        assert!(!fields.contains_key("neg"));
        assert_eq!(fields.get("kept"), Some("0"));
        assert_eq!(fields.get("one"), Some("1"));
        assert_eq!(fields.len(), 2);
    }

    #[test]
    fn test_decode_json_malformed_is_empty() {
        assert!(decode_json(b"{not json").is_empty());
        assert!(decode_json(b"").is_empty());
    }

    #[test]
    fn test_decode_json_non_object_is_empty() {
        assert!(decode_json(b"[1, 2, 3]").is_empty());
        assert!(decode_json(br#""just a string""#).is_empty());
    }

    // ── Forms ───────────────────────────────────────────────────────

    #[test]
    fn test_submission_urlencoded() {
        let req = post(
            "application/x-www-form-urlencoded",
            "email=a%40b.com&message=hello+there",
        );
        let fields = req.submission();
        assert_eq!(fields.get("email"), Some("a@b.com"));
        assert_eq!(fields.get("message"), Some("hello there"));
    }

    #[test]
    fn test_submission_multipart() {
        let body = "--xyz\r\n\
                    Content-Disposition: form-data; name=\"email\"\r\n\
                    \r\n\
                    a@b.com\r\n\
                    --xyz--\r\n";
        let req = post("multipart/form-data; boundary=xyz", body);
        assert_eq!(req.submission().get("email"), Some("a@b.com"));
    }

    #[test]
    fn test_submission_multipart_without_boundary_is_empty() {
        let req = post("multipart/form-data", "--xyz\r\n");
        assert!(req.submission().is_empty());
    }

    // ── Query string fallback ───────────────────────────────────────

    #[test]
    fn test_submission_falls_back_to_query_string() {
        let req = FormRequest::builder()
            .method(Method::POST)
            .query_string("email=a%40b.com")
            .content_type("text/plain")
            .body(b"email=ignored%40x.com".to_vec())
            .build();
        assert_eq!(req.submission().get("email"), Some("a@b.com"));
    }

    #[test]
    fn test_submission_without_content_type_uses_query_string() {
        let req = FormRequest::builder().query_string("a=1").build();
        assert_eq!(req.submission().get("a"), Some("1"));
    }
}
