//! Per-type sync outcome reporting.
//!
//! The backend's acknowledgment only carries aggregate counts, so the
//! per-type classification is derived locally by diffing the pushed
//! document against the last one the backend acknowledged.

use std::collections::BTreeMap;
use std::fmt;

use plinth_schema::CatalogDocument;
use serde::Serialize;

/// Diff outcome for one block type in one sync attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum SyncOutcome {
    Updated,
    Unchanged,
    Failed(String),
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Updated => f.write_str("updated"),
            Self::Unchanged => f.write_str("unchanged"),
            Self::Failed(reason) => write!(f, "failed ({reason})"),
        }
    }
}

/// The result of one sync attempt, keyed by block type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SyncReport {
    pub outcomes: BTreeMap<String, SyncOutcome>,
    /// Message the backend attached to its acknowledgment, if any.
    pub remote_message: Option<String>,
}

impl SyncReport {
    /// Classify every entry of `document` against the last acknowledged
    /// document: new or changed schemas are `Updated`, identical ones
    /// `Unchanged`.
    #[must_use]
    pub fn from_diff(
        document: &CatalogDocument,
        last_acked: Option<&CatalogDocument>,
        remote_message: Option<String>,
    ) -> Self {
        let outcomes = document
            .schemas
            .iter()
            .map(|(id, schema)| {
                let unchanged = last_acked
                    .and_then(|last| last.schemas.get(id))
                    .is_some_and(|previous| previous == schema);
                let outcome = if unchanged {
                    SyncOutcome::Unchanged
                } else {
                    SyncOutcome::Updated
                };
                (id.clone(), outcome)
            })
            .collect();

        Self {
            outcomes,
            remote_message,
        }
    }

    /// Mark every entry of `document` failed for the same reason -- the
    /// shape of a transport-level or rejected attempt.
    #[must_use]
    pub fn all_failed(document: &CatalogDocument, reason: &str) -> Self {
        Self {
            outcomes: document
                .schemas
                .keys()
                .map(|id| (id.clone(), SyncOutcome::Failed(reason.to_string())))
                .collect(),
            remote_message: None,
        }
    }

    #[must_use]
    pub fn updated(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Updated))
    }

    #[must_use]
    pub fn unchanged(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Unchanged))
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.count(|outcome| matches!(outcome, SyncOutcome::Failed(_)))
    }

    /// True when no entry failed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failed() == 0
    }

    fn count(&self, predicate: impl Fn(&SyncOutcome) -> bool) -> usize {
        self.outcomes.values().filter(|o| predicate(o)).count()
    }
}
