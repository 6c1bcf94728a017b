//! # formulator-http
//!
//! HTTP layer for formulator. Provides the [`FormRequest`] type that decodes a
//! request body into a flat [`FieldMap`](formulator_core::FieldMap), and the
//! [`HttpResponse`] / [`Envelope`] types that render every answer as JSON with
//! CORS headers.
//!
//! ## Modules
//!
//! - [`request`] - Incoming request wrapper and body decoding
//! - [`querydict`] - Query-string and URL-encoded form decoding
//! - [`multipart`] - `multipart/form-data` decoding
//! - [`response`] - Response envelope and CORS headers

pub mod multipart;
pub mod querydict;
pub mod request;
pub mod response;

pub use request::{FormRequest, FormRequestBuilder};
pub use response::{cors_headers, Envelope, HttpResponse};
