//! Expansion / Selection State
//!
//! Two id sets owned by the application. The builder only queries them;
//! every mutation here reports what changed so the owner can react.

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::node::Forest;
use crate::record::{ResourceId, ResourceRecord};

/// Ids added to / removed from a set by one operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetDelta {
    pub added: Vec<ResourceId>,
    pub removed: Vec<ResourceId>,
}

impl SetDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    fn added(id: &ResourceId) -> Self {
        Self {
            added: vec![id.clone()],
            removed: Vec::new(),
        }
    }

    fn removed(id: &ResourceId) -> Self {
        Self {
            added: Vec::new(),
            removed: vec![id.clone()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSelection {
    #[serde(default)]
    expanded: HashSet<ResourceId>,
    #[serde(default)]
    selected: HashSet<ResourceId>,
}

impl TreeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_expanded(&self, id: &ResourceId) -> bool {
        self.expanded.contains(id)
    }

    pub fn is_selected(&self, id: &ResourceId) -> bool {
        self.selected.contains(id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Selected ids in sorted order
    pub fn selected_ids(&self) -> Vec<ResourceId> {
        let mut ids: Vec<ResourceId> = self.selected.iter().cloned().collect();
        ids.sort();
        ids
    }

    // ========================
    // Expansion
    // ========================

    pub fn expand(&mut self, id: &ResourceId) -> SetDelta {
        if self.expanded.insert(id.clone()) {
            SetDelta::added(id)
        } else {
            SetDelta::default()
        }
    }

    pub fn collapse(&mut self, id: &ResourceId) -> SetDelta {
        if self.expanded.remove(id) {
            SetDelta::removed(id)
        } else {
            SetDelta::default()
        }
    }

    pub fn toggle_expanded(&mut self, id: &ResourceId) -> SetDelta {
        if self.is_expanded(id) {
            self.collapse(id)
        } else {
            self.expand(id)
        }
    }

    /// Expand every node that has children
    pub fn expand_all(&mut self, forest: &Forest) -> SetDelta {
        let mut delta = SetDelta::default();
        for node in forest.iter().filter(|n| n.has_children) {
            if self.expanded.insert(node.id.clone()) {
                delta.added.push(node.id.clone());
            }
        }
        delta
    }

    pub fn collapse_all(&mut self) -> SetDelta {
        let mut removed: Vec<ResourceId> = self.expanded.drain().collect();
        removed.sort();
        SetDelta {
            added: Vec::new(),
            removed,
        }
    }

    // ========================
    // Selection
    // ========================

    pub fn toggle_selected(&mut self, id: &ResourceId) -> SetDelta {
        if self.selected.remove(id) {
            SetDelta::removed(id)
        } else {
            self.selected.insert(id.clone());
            SetDelta::added(id)
        }
    }

    /// Select every node of the (filtered) forest
    pub fn select_all_visible(&mut self, forest: &Forest) -> SetDelta {
        let mut delta = SetDelta::default();
        for node in forest.iter() {
            if self.selected.insert(node.id.clone()) {
                delta.added.push(node.id.clone());
            }
        }
        delta
    }

    /// Deselect every node of the (filtered) forest, leaving hidden selections intact
    pub fn clear_visible(&mut self, forest: &Forest) -> SetDelta {
        let mut delta = SetDelta::default();
        for node in forest.iter() {
            if self.selected.remove(&node.id) {
                delta.removed.push(node.id.clone());
            }
        }
        delta
    }

    /// Forget ids that no longer exist after a refresh
    pub fn retain_known(&mut self, records: &[Arc<ResourceRecord>]) -> SetDelta {
        let known: HashSet<&ResourceId> = records.iter().map(|r| &r.id).collect();
        let mut removed: Vec<ResourceId> = self
            .selected
            .iter()
            .chain(self.expanded.iter())
            .filter(|id| !known.contains(id))
            .cloned()
            .collect();
        removed.sort();
        removed.dedup();

        self.selected.retain(|id| known.contains(id));
        self.expanded.retain(|id| known.contains(id));
        SetDelta {
            added: Vec::new(),
            removed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_forest;
    use crate::filter::{filter_forest, TreeFilter};

    fn make_record(id: i64, parent_id: Option<i64>, name: &str) -> Arc<ResourceRecord> {
        Arc::new(ResourceRecord::new(id, parent_id.map(ResourceId::from), name))
    }

    fn id(n: i64) -> ResourceId {
        ResourceId::from(n)
    }

    #[test]
    fn test_toggle_expanded() {
        let mut selection = TreeSelection::new();
        assert_eq!(selection.toggle_expanded(&id(1)).added, vec![id(1)]);
        assert!(selection.is_expanded(&id(1)));
        assert_eq!(selection.toggle_expanded(&id(1)).removed, vec![id(1)]);
        assert!(!selection.is_expanded(&id(1)));
        assert!(selection.collapse(&id(1)).is_empty());
    }

    #[test]
    fn test_selection_independent_of_expansion() {
        let mut selection = TreeSelection::new();
        selection.toggle_selected(&id(3));
        assert!(selection.is_selected(&id(3)));
        assert!(!selection.is_expanded(&id(3)));
        assert_eq!(selection.selected_ids(), vec![id(3)]);
    }

    #[test]
    fn test_select_all_and_clear_only_touch_visible() {
        let records = vec![
            make_record(1, None, "web"),
            make_record(2, None, "db-main"),
            make_record(3, None, "db-replica"),
        ];
        let mut selection = TreeSelection::new();
        selection.toggle_selected(&id(1));

        let forest = build_forest(&records, &selection);
        let visible = filter_forest(forest, &TreeFilter::text("db"));

        let delta = selection.select_all_visible(&visible);
        assert_eq!(delta.added.len(), 2);
        assert_eq!(selection.selected_ids(), vec![id(1), id(2), id(3)]);

        let delta = selection.clear_visible(&visible);
        assert_eq!(delta.removed.len(), 2);
        assert_eq!(selection.selected_ids(), vec![id(1)]);
    }

    #[test]
    fn test_expand_all_and_collapse_all() {
        let records = vec![make_record(1, None, "a"), make_record(2, Some(1), "b"), make_record(3, None, "c")];
        let mut selection = TreeSelection::new();
        let forest = build_forest(&records, &selection);

        let delta = selection.expand_all(&forest);
        assert_eq!(delta.added, vec![id(1)]);
        assert_eq!(selection.collapse_all().removed, vec![id(1)]);
        assert!(!selection.is_expanded(&id(1)));
    }

    #[test]
    fn test_retain_known() {
        let records = vec![make_record(1, None, "a")];
        let mut selection = TreeSelection::new();
        selection.expand(&id(1));
        selection.expand(&id(5));
        selection.toggle_selected(&id(5));

        let delta = selection.retain_known(&records);
        assert_eq!(delta.removed, vec![id(5)]);
        assert!(selection.is_expanded(&id(1)));
        assert_eq!(selection.selected_count(), 0);
    }

    #[test]
    fn test_serde_round_trip_of_snapshot() {
        let mut selection = TreeSelection::new();
        selection.expand(&id(1));
        selection.toggle_selected(&ResourceId::from("srv"));
        let json = serde_json::to_string(&selection).unwrap();
        let restored: TreeSelection = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, selection);
    }
}
