//! Sibling Sorting
//!
//! Reorders siblings at every level. Children never move across parents.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::node::{Forest, TreeNode};

/// Field used to order siblings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Name,
    Type,
    Created,
    Modified,
    /// Stable total order, used when nothing else is asked for
    #[default]
    Id,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Name,
        SortKey::Type,
        SortKey::Created,
        SortKey::Modified,
        SortKey::Id,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Type => "type",
            SortKey::Created => "created",
            SortKey::Modified => "modified",
            SortKey::Id => "id",
        }
    }

    /// Unknown keys fall back to the id order
    pub fn parse(s: &str) -> Self {
        match s {
            "name" => SortKey::Name,
            "type" => SortKey::Type,
            "created" => SortKey::Created,
            "modified" => SortKey::Modified,
            _ => SortKey::Id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "desc" => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Sort key and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct SortSpec {
    #[serde(default)]
    pub key: SortKey,
    #[serde(default)]
    pub order: SortOrder,
}

impl SortSpec {
    pub fn new(key: SortKey, order: SortOrder) -> Self {
        Self { key, order }
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.key.as_str(), self.order.as_str())
    }
}

/// Compare two siblings.
///
/// `Desc` only reverses the key comparison; ties always fall back to
/// ascending id so they keep the same relative order in both directions.
pub fn compare_nodes(a: &TreeNode, b: &TreeNode, spec: SortSpec) -> Ordering {
    let (ra, rb) = (&a.resource, &b.resource);
    let by_key = match spec.key {
        SortKey::Name => ra.name.to_lowercase().cmp(&rb.name.to_lowercase()),
        SortKey::Type => ra.resource_type.cmp(&rb.resource_type),
        SortKey::Created => ra.created_at.cmp(&rb.created_at),
        SortKey::Modified => ra.updated_at.cmp(&rb.updated_at),
        SortKey::Id => Ordering::Equal,
    };
    let by_key = match spec.order {
        SortOrder::Asc => by_key,
        SortOrder::Desc => by_key.reverse(),
    };
    by_key.then_with(|| {
        if spec.key == SortKey::Id && spec.order == SortOrder::Desc {
            b.id.cmp(&a.id)
        } else {
            a.id.cmp(&b.id)
        }
    })
}

/// Sort every sibling list in the forest
pub fn sort_forest(forest: Forest, spec: SortSpec) -> Forest {
    Forest::new(sort_siblings(forest.roots, spec))
}

fn sort_siblings(mut nodes: Vec<TreeNode>, spec: SortSpec) -> Vec<TreeNode> {
    nodes.sort_by(|a, b| compare_nodes(a, b, spec));
    for node in &mut nodes {
        let children = std::mem::take(&mut node.children);
        node.children = sort_siblings(children, spec);
    }
    nodes
}
