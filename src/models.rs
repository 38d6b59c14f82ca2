//! Frontend Models
//!
//! UI-side data structures. Resource records themselves come from `resource_tree`.

use std::collections::HashSet;
use std::sync::Arc;

use resource_tree::PermissionGate;
use serde::{Deserialize, Serialize};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

impl NoticeLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            NoticeLevel::Success => "notice success",
            NoticeLevel::Warning => "notice warning",
            NoticeLevel::Error => "notice error",
        }
    }
}

/// A toast-style message shown above the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u32,
    pub level: NoticeLevel,
    pub message: String,
}

/// Permissions granted to the acting principal (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet(Arc<HashSet<String>>);

impl PermissionSet {
    pub fn new(permissions: impl IntoIterator<Item = String>) -> Self {
        Self(Arc::new(permissions.into_iter().collect()))
    }

    pub fn contains(&self, permission: &str) -> bool {
        self.0.contains(permission)
    }
}

impl PermissionGate for PermissionSet {
    fn has_permission(&self, permission: &str) -> bool {
        self.contains(permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permission_set_gate() {
        let perms = PermissionSet::new(vec!["resources.edit".to_string(), "resources.read".to_string()]);
        assert!(perms.has_permission("resources.edit"));
        assert!(!perms.has_permission("roles.edit"));
        assert!(!PermissionSet::default().has_permission("resources.edit"));
    }
}
