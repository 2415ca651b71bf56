//! # plinth-sync
//!
//! Catalog export/sync client for Plinth.
//!
//! Pushes the serialized schema catalog to the authoring backend so both
//! processes agree on the set of available block types and their shapes,
//! and reports a per-type diff outcome (updated / unchanged / failed).
//!
//! Sync failures are never fatal to the exporting process: the local
//! catalog stays authoritative, the failure is logged and reported, and
//! the caller carries on. Sync runs on an authoring or build trigger,
//! never on the page-render path.

mod error;
mod http;
mod report;
mod state;

pub use error::SyncError;
pub use report::{SyncOutcome, SyncReport};
pub use state::SyncState;

use std::time::Duration;

use plinth_schema::CatalogDocument;
use serde::{Deserialize, Serialize};

use crate::http::check_response;

/// Fixed sub-path the backend accepts catalog documents on.
pub const SYNC_PATH: &str = "/api/blocks/sync-schemas";

/// The backend's acknowledgment of a pushed catalog document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncAck {
    pub success: bool,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub unchanged: u64,
    #[serde(default)]
    pub message: Option<String>,
}

/// HTTP client that pushes catalog documents to the backend catalog owner.
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
}

impl SyncClient {
    /// Create a client for the backend at `base_url` with a bounded
    /// request timeout.
    ///
    /// # Panics
    ///
    /// Panics if the underlying `reqwest::Client` fails to build.
    #[must_use]
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::builder()
                .user_agent(concat!("plinth/", env!("CARGO_PKG_VERSION")))
                .timeout(timeout)
                .build()
                .expect("reqwest client should build"),
            base_url,
        }
    }

    /// Transmit `document` and parse the acknowledgment.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] on transport failure, timeout, non-success
    /// status, or an acknowledgment that does not parse.
    pub async fn push(&self, document: &CatalogDocument) -> Result<SyncAck, SyncError> {
        let url = format!("{}{SYNC_PATH}", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(document)
            .send()
            .await
            .map_err(|error| SyncError::from_transport(&error))?;
        let resp = check_response(resp).await?;
        resp.json::<SyncAck>()
            .await
            .map_err(|error| SyncError::MalformedAck(error.to_string()))
    }

    /// Push `document` and classify every block type.
    ///
    /// On an acknowledged success the per-type outcome is the diff against
    /// the last acknowledged document in `state` (so re-sending an
    /// unchanged document reports all entries `Unchanged`), and `state`
    /// advances. Any failure leaves `state` untouched and marks every
    /// entry `Failed` with the reason -- it never propagates.
    pub async fn sync(&self, document: &CatalogDocument, state: &mut SyncState) -> SyncReport {
        match self.push(document).await {
            Ok(ack) if ack.success => {
                let report = SyncReport::from_diff(document, state.last.as_ref(), ack.message);
                tracing::info!(
                    updated = ack.updated,
                    unchanged = ack.unchanged,
                    "catalog synced with backend"
                );
                state.last = Some(document.clone());
                report
            }
            Ok(ack) => {
                let reason = ack
                    .message
                    .unwrap_or_else(|| "sync rejected by backend".to_string());
                tracing::warn!(%reason, "catalog sync completed with errors");
                SyncReport::all_failed(document, &reason)
            }
            Err(error) => {
                tracing::warn!(%error, base_url = %self.base_url, "could not sync catalog with backend");
                SyncReport::all_failed(document, &error.to_string())
            }
        }
    }

    /// The backend base URL this client pushes to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}
