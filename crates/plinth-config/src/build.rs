//! Catalog build trigger configuration.

use serde::{Deserialize, Serialize};

fn default_blocks_dir() -> String {
    "blocks".to_string()
}

fn default_out_file() -> String {
    "storage/sections.json".to_string()
}

const fn default_watch_poll_ms() -> u64 {
    750
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BuildConfig {
    /// Directory walked for declarative TOML block definitions.
    #[serde(default = "default_blocks_dir")]
    pub blocks_dir: String,

    /// Where the exported catalog document is written.
    #[serde(default = "default_out_file")]
    pub out_file: String,

    /// Poll interval for the watch trigger.
    #[serde(default = "default_watch_poll_ms")]
    pub watch_poll_ms: u64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            blocks_dir: default_blocks_dir(),
            out_file: default_out_file(),
            watch_poll_ms: default_watch_poll_ms(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = BuildConfig::default();
        assert_eq!(config.blocks_dir, "blocks");
        assert_eq!(config.out_file, "storage/sections.json");
        assert_eq!(config.watch_poll_ms, 750);
    }
}
