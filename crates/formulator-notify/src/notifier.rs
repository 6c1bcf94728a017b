//! The [`Notifier`] trait and the shared delivery helper.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;

use formulator_core::FieldMap;

use crate::error::NotifyError;

/// A webhook target that accepted submissions are forwarded to.
///
/// Implementations render the fields in the order given and deliver them in
/// a single request.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short target name used in logs and reports (e.g. `"discord"`).
    fn name(&self) -> &'static str;

    /// Delivers one submission.
    async fn notify(&self, fields: &FieldMap) -> Result<(), NotifyError>;
}

/// POSTs a JSON payload with the given content type and checks for a 2xx.
pub(crate) async fn post_json<T: Serialize + Sync>(
    client: &reqwest::Client,
    url: &str,
    content_type: &'static str,
    payload: &T,
) -> Result<(), NotifyError> {
    let body = serde_json::to_vec(payload)?;

    let response = client
        .post(url)
        .header(CONTENT_TYPE, content_type)
        .body(body)
        .send()
        .await?;

    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(NotifyError::Status {
            status: status.as_u16(),
        })
    }
}
