//! Tree Nodes
//!
//! Derived tree structure. Ownership flows downward through `children`;
//! `parent` is only an id to resolve against the forest.

use std::sync::Arc;

use crate::record::{ResourceId, ResourceRecord};

/// A materialized node of the resource hierarchy
#[derive(Debug, Clone, PartialEq)]
pub struct TreeNode {
    pub id: ResourceId,
    pub resource: Arc<ResourceRecord>,
    /// Ordered children (sorted order once the sorter has run)
    pub children: Vec<TreeNode>,
    /// Depth, 0 for roots
    pub level: usize,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// Whether the node itself matches the active filter
    pub is_visible: bool,
    /// Whether the node had children before filtering
    pub has_children: bool,
    /// Parent id (lookup only)
    pub parent: Option<ResourceId>,
}

impl TreeNode {
    /// Pre-order iterator over this node and its descendants
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder { stack: vec![self] }
    }

    /// Whether `id` is this node or one of its descendants
    pub fn subtree_contains(&self, id: &ResourceId) -> bool {
        self.iter().any(|node| &node.id == id)
    }

    pub fn find(&self, id: &ResourceId) -> Option<&TreeNode> {
        self.iter().find(|node| &node.id == id)
    }
}

/// A collection of disjoint trees
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    pub roots: Vec<TreeNode>,
}

impl Forest {
    pub fn new(roots: Vec<TreeNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Pre-order iterator over every node
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            stack: self.roots.iter().rev().collect(),
        }
    }

    pub fn find(&self, id: &ResourceId) -> Option<&TreeNode> {
        self.iter().find(|node| &node.id == id)
    }

    pub fn contains(&self, id: &ResourceId) -> bool {
        self.find(id).is_some()
    }

    /// Resolve the parent node of `id`
    pub fn parent_of(&self, id: &ResourceId) -> Option<&TreeNode> {
        let parent_id = self.find(id)?.parent.as_ref()?;
        self.find(parent_id)
    }

    /// Ids of all nodes in pre-order
    pub fn ids(&self) -> Vec<ResourceId> {
        self.iter().map(|node| node.id.clone()).collect()
    }
}

/// Depth-first, parent-before-children traversal
pub struct PreOrder<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
