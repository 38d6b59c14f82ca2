//! Tree Builder
//!
//! Materializes a flat, parent-pointer record list into a forest.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::node::{Forest, TreeNode};
use crate::record::{ResourceId, ResourceRecord};
use crate::state::TreeSelection;

struct BuildContext<'a> {
    records: &'a [Arc<ResourceRecord>],
    /// Resolved parent id -> child record indices, in input order
    children_map: HashMap<Option<&'a ResourceId>, Vec<usize>>,
    selection: &'a TreeSelection,
}

/// Build a forest from resource records.
///
/// Records whose parent is absent, unknown, or themselves become roots.
/// Sibling order follows input order. Duplicate ids keep the last record.
pub fn build_forest(records: &[Arc<ResourceRecord>], selection: &TreeSelection) -> Forest {
    // Pass 1: index by id
    let mut by_id: HashMap<&ResourceId, usize> = HashMap::with_capacity(records.len());
    for (idx, record) in records.iter().enumerate() {
        if by_id.insert(&record.id, idx).is_some() {
            warn!(id = %record.id, "duplicate resource id, keeping the last record");
        }
    }

    let live: Vec<usize> = (0..records.len())
        .filter(|idx| by_id.get(&records[*idx].id) == Some(idx))
        .collect();

    // Pass 2: link by resolved parent
    let mut children_map: HashMap<Option<&ResourceId>, Vec<usize>> = HashMap::new();
    for &idx in &live {
        let record = &records[idx];
        let parent = record
            .parent_id
            .as_ref()
            .filter(|pid| **pid != record.id && by_id.contains_key(pid));
        children_map.entry(parent).or_default().push(idx);
    }

    let ctx = BuildContext {
        records,
        children_map,
        selection,
    };

    let mut visited = vec![false; records.len()];
    let mut roots = Vec::new();
    if let Some(root_indices) = ctx.children_map.get(&None) {
        for &idx in root_indices {
            roots.push(attach(&ctx, idx, None, 0, &mut visited));
        }
    }

    // Anything not reached from a root sits on a parent cycle
    for &idx in &live {
        if !visited[idx] {
            warn!(id = %records[idx].id, "parent cycle detected, promoting record to root");
            roots.push(attach(&ctx, idx, None, 0, &mut visited));
        }
    }

    debug!(records = records.len(), roots = roots.len(), "built resource forest");
    Forest::new(roots)
}

fn attach(
    ctx: &BuildContext<'_>,
    idx: usize,
    parent: Option<&ResourceId>,
    level: usize,
    visited: &mut [bool],
) -> TreeNode {
    visited[idx] = true;
    let record = &ctx.records[idx];

    let mut children = Vec::new();
    if let Some(child_indices) = ctx.children_map.get(&Some(&record.id)) {
        for &child_idx in child_indices {
            if !visited[child_idx] {
                children.push(attach(ctx, child_idx, Some(&record.id), level + 1, visited));
            }
        }
    }

    TreeNode {
        id: record.id.clone(),
        resource: Arc::clone(record),
        has_children: !children.is_empty(),
        children,
        level,
        is_expanded: ctx.selection.is_expanded(&record.id),
        is_selected: ctx.selection.is_selected(&record.id),
        is_visible: true,
        parent: parent.cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(id: i64, parent_id: Option<i64>) -> Arc<ResourceRecord> {
        Arc::new(ResourceRecord::new(id, parent_id.map(ResourceId::from), format!("Resource {}", id)))
    }

    fn id(n: i64) -> ResourceId {
        ResourceId::from(n)
    }

    fn assert_well_formed(forest: &Forest) {
        fn check(node: &TreeNode) {
            for child in &node.children {
                assert_eq!(child.level, node.level + 1);
                assert_eq!(child.parent.as_ref(), Some(&node.id));
                check(child);
            }
        }
        for root in &forest.roots {
            assert_eq!(root.level, 0);
            assert!(root.parent.is_none());
            check(root);
        }
        let mut ids = forest.ids();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "a node appears twice");
    }

    #[test]
    fn test_build_links_children() {
        let records = vec![
            make_record(1, None),
            make_record(2, None),
            make_record(3, Some(1)),
            make_record(4, Some(1)),
            make_record(5, Some(3)),
        ];
        let forest = build_forest(&records, &TreeSelection::default());

        assert_eq!(forest.roots.len(), 2);
        let root = &forest.roots[0];
        assert_eq!(root.id, id(1));
        assert!(root.has_children);
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children[0].id, id(5));
        assert_eq!(root.children[0].children[0].level, 2);
        assert!(!forest.roots[1].has_children);
        assert_well_formed(&forest);
    }

    #[test]
    fn test_child_before_parent_in_input() {
        let records = vec![make_record(3, Some(2)), make_record(2, Some(1)), make_record(1, None)];
        let forest = build_forest(&records, &TreeSelection::default());

        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].children[0].children[0].id, id(3));
        assert_well_formed(&forest);
    }

    #[test]
    fn test_orphan_promoted_to_root() {
        let records = vec![make_record(1, None), make_record(2, Some(1)), make_record(3, Some(99))];
        let forest = build_forest(&records, &TreeSelection::default());

        let root_ids: Vec<ResourceId> = forest.roots.iter().map(|n| n.id.clone()).collect();
        assert_eq!(root_ids, vec![id(1), id(3)]);
        assert_eq!(forest.roots[1].level, 0);
        assert!(forest.roots[1].parent.is_none());
    }

    #[test]
    fn test_self_parent_is_root() {
        let records = vec![make_record(1, Some(1)), make_record(2, Some(1))];
        let forest = build_forest(&records, &TreeSelection::default());

        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].children[0].id, id(2));
    }

    #[test_log::test]
    fn test_parent_cycle_is_broken() {
        let records = vec![
            make_record(1, Some(2)),
            make_record(2, Some(1)),
            make_record(3, Some(2)),
        ];
        let forest = build_forest(&records, &TreeSelection::default());

        assert_eq!(forest.len(), 3);
        assert_eq!(forest.roots.len(), 1);
        assert_eq!(forest.roots[0].id, id(1));
        assert_well_formed(&forest);
    }

    #[test_log::test]
    fn test_duplicate_id_last_wins() {
        let first = make_record(1, None);
        let mut second = ResourceRecord::new(1, None, "Replacement");
        second.resource_type = "server".to_string();
        let records = vec![first, Arc::new(second), make_record(2, Some(1))];
        let forest = build_forest(&records, &TreeSelection::default());

        assert_eq!(forest.len(), 2);
        assert_eq!(forest.roots[0].resource.name, "Replacement");
        assert_eq!(forest.roots[0].children.len(), 1);
    }

    #[test]
    fn test_selection_flags_copied() {
        let records = vec![make_record(1, None), make_record(2, Some(1))];
        let mut selection = TreeSelection::default();
        selection.expand(&id(1));
        selection.toggle_selected(&id(2));
        let forest = build_forest(&records, &selection);

        assert!(forest.roots[0].is_expanded);
        assert!(!forest.roots[0].is_selected);
        assert!(forest.roots[0].children[0].is_selected);
        assert!(forest.iter().all(|n| n.is_visible));
    }

    #[test]
    fn test_build_is_deterministic() {
        let records = vec![
            make_record(4, Some(2)),
            make_record(1, None),
            make_record(2, Some(1)),
            make_record(3, Some(1)),
            make_record(5, Some(77)),
        ];
        let selection = TreeSelection::default();
        assert_eq!(build_forest(&records, &selection), build_forest(&records, &selection));
    }

    #[test]
    fn test_empty_input() {
        let forest = build_forest(&[], &TreeSelection::default());
        assert!(forest.is_empty());
    }
}
