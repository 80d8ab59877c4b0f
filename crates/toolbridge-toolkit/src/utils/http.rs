use log::{debug, warn};
use reqwest::Response;
use serde_json::Value;

use crate::error::{Result, ToolkitError};

/// Reads a response body as JSON, turning non-success statuses into
/// [`ToolkitError::Status`] with the body attached.
pub(crate) async fn read_json(response: Response) -> Result<Value> {
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        warn!("{url} answered with status {status}");
        return Err(ToolkitError::Status { status, body });
    }

    debug!("{url} answered with {} bytes", body.len());
    serde_json::from_str(&body).map_err(|err| {
        warn!("{url} returned a body that is not JSON: {err}");
        ToolkitError::Json(err)
    })
}
