//! Visibility Filter
//!
//! Keeps every node that matches, plus the ancestor chain leading to it.
//! `is_visible` marks whether the node itself matched.

use serde::{Deserialize, Serialize};

use crate::node::{Forest, TreeNode};
use crate::record::ResourceStatus;

/// Active filter predicates. All active predicates must hold for a node to match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeFilter {
    /// Case-insensitive substring over name, description and type
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub has_children_only: bool,
    #[serde(default)]
    pub selected_only: bool,
    #[serde(default)]
    pub status: Option<ResourceStatus>,
}

impl TreeFilter {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn is_active(&self) -> bool {
        !self.text.trim().is_empty() || self.has_children_only || self.selected_only || self.status.is_some()
    }

    /// Whether the node itself satisfies every active predicate
    pub fn matches(&self, node: &TreeNode) -> bool {
        if self.has_children_only && !node.has_children {
            return false;
        }
        if self.selected_only && !node.is_selected {
            return false;
        }
        if let Some(status) = self.status {
            if node.resource.status != status {
                return false;
            }
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let resource = &node.resource;
        resource.name.to_lowercase().contains(&needle)
            || resource.resource_type.to_lowercase().contains(&needle)
            || resource
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle))
    }
}

/// Apply `filter` to the forest.
///
/// Subtrees without any match are dropped. With no active predicate the
/// forest comes back unchanged, every node visible.
pub fn filter_forest(forest: Forest, filter: &TreeFilter) -> Forest {
    if !filter.is_active() {
        return forest;
    }
    let roots = forest
        .roots
        .into_iter()
        .filter_map(|root| filter_node(root, filter))
        .collect();
    Forest::new(roots)
}

fn filter_node(mut node: TreeNode, filter: &TreeFilter) -> Option<TreeNode> {
    let self_match = filter.matches(&node);
    let children = std::mem::take(&mut node.children);
    node.children = children
        .into_iter()
        .filter_map(|child| filter_node(child, filter))
        .collect();

    if self_match || !node.children.is_empty() {
        node.is_visible = self_match;
        Some(node)
    } else {
        None
    }
}
