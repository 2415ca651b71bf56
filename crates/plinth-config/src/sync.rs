//! Backend sync configuration.

use serde::{Deserialize, Serialize};

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncConfig {
    /// Base URL of the authoring backend that owns the remote catalog.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Bounded timeout for one sync attempt; expiry is a failed outcome,
    /// not a process-level fault.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SyncConfig {
    #[must_use]
    pub const fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = SyncConfig::default();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert_eq!(config.timeout().as_secs(), 10);
    }
}
