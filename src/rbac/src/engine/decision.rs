//! Check decision types

use serde::{Deserialize, Serialize};

/// Outcome of a permission check, with the path that granted it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDecision {
    /// Role the check started from
    pub role: String,

    /// Permission requested
    pub permission: String,

    /// Whether the permission is granted
    pub allowed: bool,

    /// Node values of the granting path, root first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granted_by: Option<Vec<String>>,

    /// Paths found from the role to the permission
    pub paths_found: usize,

    /// Paths walked before the decision was reached
    pub paths_evaluated: usize,
}

impl CheckDecision {
    /// Create an allow decision
    pub fn allow(
        role: impl Into<String>,
        permission: impl Into<String>,
        granted_by: Vec<String>,
        paths_found: usize,
        paths_evaluated: usize,
    ) -> Self {
        Self {
            role: role.into(),
            permission: permission.into(),
            allowed: true,
            granted_by: Some(granted_by),
            paths_found,
            paths_evaluated,
        }
    }

    /// Create a deny decision
    pub fn deny(
        role: impl Into<String>,
        permission: impl Into<String>,
        paths_found: usize,
        paths_evaluated: usize,
    ) -> Self {
        Self {
            role: role.into(),
            permission: permission.into(),
            allowed: false,
            granted_by: None,
            paths_found,
            paths_evaluated,
        }
    }
}
