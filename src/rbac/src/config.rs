//! Authorizer configuration

use serde::{Deserialize, Serialize};

/// Authorizer configuration
///
/// Meant to be embedded in the host service's own configuration; every field
/// has a default so a partial section deserializes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthorizerConfig {
    /// Refuse bindings whose role is not stored at write time
    pub strict_role_references: bool,

    /// Collect evaluation counters
    pub enable_metrics: bool,
}

impl Default for AuthorizerConfig {
    fn default() -> Self {
        Self {
            strict_role_references: false,
            enable_metrics: true,
        }
    }
}
