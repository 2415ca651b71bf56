//! The last acknowledged catalog document.
//!
//! Kept so a later sync can tell per block type whether anything changed.
//! Persisting it is best-effort: a missing or corrupt state file only
//! means the next sync reports everything `Updated` once.

use std::path::Path;

use plinth_schema::CatalogDocument;
use serde::{Deserialize, Serialize};

/// What the backend last acknowledged, if anything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncState {
    pub last: Option<CatalogDocument>,
}

impl SyncState {
    /// Load persisted state; a missing or unreadable file yields the
    /// empty state.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "ignoring corrupt sync state");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Persist state next to the exported document.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error; callers treat it as a warning.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let text = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(path, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn missing_file_loads_empty() {
        let state = SyncState::load(Path::new("/nonexistent/sync-state.json"));
        assert!(state.last.is_none());
    }

    #[test]
    fn state_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let mut schemas = BTreeMap::new();
        schemas.insert("Banner".to_string(), serde_json::json!({"type": "object"}));
        let state = SyncState {
            last: Some(CatalogDocument {
                schemas,
                components: BTreeMap::new(),
            }),
        };
        state.save(&path).unwrap();

        let back = SyncState::load(&path);
        assert_eq!(back.last, state.last);
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(SyncState::load(&path).last.is_none());
    }
}
