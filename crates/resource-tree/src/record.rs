//! Resource Records
//!
//! Flat resource records as delivered by the host. The tree never mutates them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource identifier (integer or string, as delivered by the host)
///
/// Ordering is total: integers sort before strings, then by natural order.
/// The sorter relies on this as its fallback key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    Int(i64),
    Str(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Int(id) => write!(f, "{}", id),
            ResourceId::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(id: i64) -> Self {
        ResourceId::Int(id)
    }
}

impl From<i32> for ResourceId {
    fn from(id: i32) -> Self {
        ResourceId::Int(id.into())
    }
}

impl From<u32> for ResourceId {
    fn from(id: u32) -> Self {
        ResourceId::Int(id.into())
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        ResourceId::Str(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        ResourceId::Str(id)
    }
}

/// Lifecycle status of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResourceStatus {
    #[default]
    Active,
    Inactive,
    Archived,
}

impl ResourceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceStatus::Active => "active",
            ResourceStatus::Inactive => "inactive",
            ResourceStatus::Archived => "archived",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(ResourceStatus::Active),
            "inactive" => Some(ResourceStatus::Inactive),
            "archived" => Some(ResourceStatus::Archived),
            _ => None,
        }
    }
}

/// A governed resource (server, database, application, ...) with an optional parent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: ResourceId,
    #[serde(default)]
    pub parent_id: Option<ResourceId>,
    pub name: String,
    /// Resource kind, e.g. "server" or "database"
    #[serde(rename = "type", default)]
    pub resource_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: ResourceStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    // Display only
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl ResourceRecord {
    /// Create a record with only id, parent and name set
    pub fn new(id: impl Into<ResourceId>, parent_id: Option<ResourceId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_id,
            name: name.into(),
            resource_type: String::new(),
            description: None,
            status: ResourceStatus::default(),
            location: None,
            owner: None,
            tags: Vec::new(),
            created_at: None,
            updated_at: None,
            roles: Vec::new(),
            permissions: Vec::new(),
        }
    }

    pub fn with_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = resource_type.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ResourceStatus) -> Self {
        self.status = status;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_record() {
        let json = r#"{
            "id": 7,
            "parent_id": "srv-1",
            "name": "DB-7",
            "type": "database",
            "status": "archived",
            "created_at": "2024-03-01T10:00:00Z",
            "roles": ["reader"]
        }"#;

        let record: ResourceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, ResourceId::Int(7));
        assert_eq!(record.parent_id, Some(ResourceId::from("srv-1")));
        assert_eq!(record.resource_type, "database");
        assert_eq!(record.status, ResourceStatus::Archived);
        assert!(record.created_at.is_some());
        assert!(record.updated_at.is_none());
        assert_eq!(record.roles, vec!["reader".to_string()]);
    }

    #[test]
    fn test_null_parent_is_none() {
        let record: ResourceRecord =
            serde_json::from_str(r#"{"id": 1, "parent_id": null, "name": "Prod"}"#).unwrap();
        assert_eq!(record.parent_id, None);
        assert_eq!(record.status, ResourceStatus::Active);
    }

    #[test]
    fn test_id_ordering() {
        assert!(ResourceId::Int(2) < ResourceId::Int(10));
        assert!(ResourceId::Int(999) < ResourceId::from("a"));
        assert!(ResourceId::from("a") < ResourceId::from("b"));
    }

    #[test]
    fn test_status_strings() {
        for status in [ResourceStatus::Active, ResourceStatus::Inactive, ResourceStatus::Archived] {
            assert_eq!(ResourceStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ResourceStatus::parse(""), None);
    }
}
