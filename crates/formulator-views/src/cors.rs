//! OPTIONS handling.
//!
//! OPTIONS is answered on any path before routing. A CORS preflight gets the
//! CORS headers; any other OPTIONS request gets an `Allow` header. Both
//! replies are empty 200s.

use formulator_http::{FormRequest, HttpResponse};

/// Answers an OPTIONS request, or returns `None` for every other method.
pub fn handle_options(request: &FormRequest) -> Option<HttpResponse> {
    if request.method() != http::Method::OPTIONS {
        return None;
    }

    if request.is_cors_preflight() {
        tracing::debug!("answering CORS preflight");
        Some(HttpResponse::preflight())
    } else {
        tracing::debug!("answering plain OPTIONS");
        Some(HttpResponse::options_allow())
    }
}
