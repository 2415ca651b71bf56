//! Shared HTTP response helpers for the sync client.
//!
//! Centralizes the status-code check so the client stays focused on
//! request construction and acknowledgment mapping.

use crate::error::SyncError;

/// Check an HTTP response for error conditions.
///
/// Returns the response unchanged on success; a non-success status maps
/// to [`SyncError::Rejected`] with the status code and response body.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SyncError> {
    if !resp.status().is_success() {
        return Err(SyncError::Rejected {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}
