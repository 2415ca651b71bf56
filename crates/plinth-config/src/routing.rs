//! Request routing configuration.

use serde::{Deserialize, Serialize};

const fn default_max_depth() -> usize {
    3
}

const fn default_child_page_size() -> u32 {
    12
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutingConfig {
    /// Maximum number of path segments a request may carry. The resolver
    /// itself has no intrinsic depth limit; this is the routing layer's
    /// policy, kept configurable on purpose.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Fixed pagination window for a page's child listing.
    #[serde(default = "default_child_page_size")]
    pub child_page_size: u32,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            child_page_size: default_child_page_size(),
        }
    }
}
