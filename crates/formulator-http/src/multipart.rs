//! `multipart/form-data` decoding.
//!
//! Only text fields are kept. Parts that carry a `filename` parameter are file
//! uploads and are skipped entirely; a submission never contains file content.

use formulator_core::FieldMap;

/// Extracts the boundary string from a `Content-Type: multipart/form-data` header.
///
/// The boundary is specified as `boundary=<value>` in the Content-Type header.
/// Returns `None` if the boundary cannot be found.
pub fn extract_boundary(content_type: &str) -> Option<&str> {
    for part in content_type.split(';') {
        let trimmed = part.trim();
        if let Some(boundary) = trimmed.strip_prefix("boundary=") {
            let boundary = boundary.trim_matches('"');
            if boundary.is_empty() {
                return None;
            }
            return Some(boundary);
        }
    }
    None
}

/// Parses a multipart body into its text fields.
///
/// Splits the body by the boundary delimiter, then reads each part's
/// `Content-Disposition` header. Parts without a `name` and parts with a
/// `filename` are ignored. Malformed parts are skipped, never reported.
///
/// # Examples
///
/// ```
/// use formulator_http::multipart::parse_multipart;
///
/// let body = "--b\r\nContent-Disposition: form-data; name=\"email\"\r\n\r\nada@example.com\r\n--b--\r\n";
/// let fields = parse_multipart(body.as_bytes(), "b");
/// assert_eq!(fields.get("email"), Some("ada@example.com"));
/// ```
pub fn parse_multipart(body: &[u8], boundary: &str) -> FieldMap {
    let mut fields = FieldMap::new();

    let delimiter = format!("--{boundary}");

    // Multipart boundaries are ASCII
    let body_str = String::from_utf8_lossy(body);

    for part in body_str.split(delimiter.as_str()) {
        // One line break each side belongs to the delimiter, CRLF or bare LF
        let part = part
            .strip_prefix("\r\n")
            .or_else(|| part.strip_prefix('\n'))
            .unwrap_or(part);
        let part = part
            .strip_suffix("\r\n")
            .or_else(|| part.strip_suffix('\n'))
            .unwrap_or(part);

        // Preamble, closing marker, or nothing at all
        if part.is_empty() || part.starts_with("--") {
            continue;
        }

        let (headers_str, body_content) = if let Some(pos) = part.find("\r\n\r\n") {
            (&part[..pos], &part[pos + 4..])
        } else if let Some(pos) = part.find("\n\n") {
            (&part[..pos], &part[pos + 2..])
        } else {
            continue;
        };

        let mut field_name = None;
        let mut is_file = false;

        for header_line in headers_str.lines() {
            let Some((name, value)) = header_line.trim().split_once(':') else {
                continue;
            };
            if name.trim().eq_ignore_ascii_case("content-disposition") {
                field_name = extract_header_param(value, "name");
                is_file = extract_header_param(value, "filename").is_some();
            }
        }

        let Some(name) = field_name else {
            continue;
        };
        if is_file {
            tracing::debug!(field = %name, "ignoring file part in multipart submission");
            continue;
        }

        fields.insert(name, body_content);
    }

    fields
}

/// Extracts a parameter value from a header value string.
///
/// For example, from `form-data; name="field1"; filename="file.txt"`,
/// `extract_header_param(value, "name")` returns `Some("field1")`. Parameters
/// are matched whole, so `name` never matches inside `filename`.
fn extract_header_param(header_value: &str, param_name: &str) -> Option<String> {
    header_value.split(';').find_map(|segment| {
        let (key, value) = segment.trim().split_once('=')?;
        if key.trim().eq_ignore_ascii_case(param_name) {
            Some(value.trim().trim_matches('"').to_string())
        } else {
            None
        }
    })
}
