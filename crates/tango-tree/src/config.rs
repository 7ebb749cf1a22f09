//! Runtime configuration.
//!
//! ```
//! use tango_tree::{RebuildPolicy, TangoConfig};
//!
//! let config = TangoConfig::default()
//!     .with_policy(RebuildPolicy::Incremental)
//!     .with_verify_invariants(true);
//! assert_eq!(config.policy, RebuildPolicy::Incremental);
//! ```

use serde::{Deserialize, Serialize};

/// How the auxiliary trees follow a change of the preferred marking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RebuildPolicy {
    /// Discard every auxiliary tree and rebuild all of them from the
    /// marking after each operation.
    #[default]
    Full,
    /// Split and merge only the auxiliary trees whose preferred edges
    /// changed.
    Incremental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TangoConfig {
    pub policy: RebuildPolicy,
    /// Run the full invariant check after every mutation, also in release
    /// builds. Debug builds always check.
    pub verify_invariants: bool,
}

impl TangoConfig {
    pub fn with_policy(mut self, policy: RebuildPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_verify_invariants(mut self, verify: bool) -> Self {
        self.verify_invariants = verify;
        self
    }
}
