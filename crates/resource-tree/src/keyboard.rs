//! Keyboard Navigation
//!
//! Arrow-key movement over the rows a user can actually see: nodes of the
//! filtered forest, descending only into expanded nodes.

use std::sync::Arc;

use crate::node::{Forest, TreeNode};
use crate::record::{ResourceId, ResourceRecord};

/// A row of the rendered tree, in display order
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleRow {
    pub id: ResourceId,
    pub resource: Arc<ResourceRecord>,
    pub level: usize,
    pub parent: Option<ResourceId>,
    pub has_children: bool,
    pub is_expanded: bool,
    pub is_selected: bool,
    /// False for ancestors kept only to reach a filter match
    pub is_visible: bool,
}

impl VisibleRow {
    fn from_node(node: &TreeNode) -> Self {
        Self {
            id: node.id.clone(),
            resource: Arc::clone(&node.resource),
            level: node.level,
            parent: node.parent.clone(),
            has_children: node.has_children,
            is_expanded: node.is_expanded,
            is_selected: node.is_selected,
            is_visible: node.is_visible,
        }
    }
}

/// Flatten the filtered forest into display order.
/// Children follow their parent only when the parent is expanded.
pub fn flatten_visible(forest: &Forest) -> Vec<VisibleRow> {
    fn collect(nodes: &[TreeNode], result: &mut Vec<VisibleRow>) {
        for node in nodes {
            result.push(VisibleRow::from_node(node));
            if node.is_expanded {
                collect(&node.children, result);
            }
        }
    }

    let mut result = Vec::new();
    collect(&forest.roots, &mut result);
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavKey {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Home,
    End,
}

impl NavKey {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key_name(key: &str) -> Option<Self> {
        match key {
            "ArrowUp" => Some(NavKey::Up),
            "ArrowDown" => Some(NavKey::Down),
            "ArrowLeft" => Some(NavKey::Left),
            "ArrowRight" => Some(NavKey::Right),
            "Enter" => Some(NavKey::Enter),
            " " | "Spacebar" => Some(NavKey::Space),
            "Home" => Some(NavKey::Home),
            "End" => Some(NavKey::End),
            _ => None,
        }
    }
}

/// What a key press asks the owner to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEffect {
    None,
    /// Focus moved to this node
    Focus(ResourceId),
    Expand(ResourceId),
    Collapse(ResourceId),
    /// Hand the node to the "resource selected" handler
    Activate(ResourceId),
}

/// Tracks the focused node. Focus is independent of selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardNavigator {
    focused: Option<ResourceId>,
}

impl KeyboardNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused(&self) -> Option<&ResourceId> {
        self.focused.as_ref()
    }

    pub fn set_focus(&mut self, id: Option<ResourceId>) {
        self.focused = id;
    }

    pub fn handle(&mut self, key: NavKey, forest: &Forest) -> NavEffect {
        let rows = flatten_visible(forest);
        if rows.is_empty() {
            return NavEffect::None;
        }
        let current = self
            .focused
            .as_ref()
            .and_then(|id| rows.iter().position(|row| &row.id == id));

        match (key, current) {
            (NavKey::Home, _) | (NavKey::Up | NavKey::Down, None) => self.focus(&rows[0]),
            (NavKey::End, _) => self.focus(&rows[rows.len() - 1]),
            (_, None) => NavEffect::None,
            (NavKey::Down, Some(idx)) => match rows.get(idx + 1) {
                Some(row) => self.focus(row),
                None => NavEffect::None,
            },
            (NavKey::Up, Some(idx)) => match idx.checked_sub(1) {
                Some(prev) => self.focus(&rows[prev]),
                None => NavEffect::None,
            },
            (NavKey::Right, Some(idx)) => {
                let row = &rows[idx];
                if row.has_children && !row.is_expanded {
                    NavEffect::Expand(row.id.clone())
                } else {
                    NavEffect::None
                }
            }
            (NavKey::Left, Some(idx)) => {
                let row = &rows[idx];
                if row.is_expanded {
                    NavEffect::Collapse(row.id.clone())
                } else {
                    match row.parent.as_ref().and_then(|pid| rows.iter().find(|r| &r.id == pid)) {
                        Some(parent) => self.focus(parent),
                        None => NavEffect::None,
                    }
                }
            }
            (NavKey::Enter | NavKey::Space, Some(idx)) => NavEffect::Activate(rows[idx].id.clone()),
        }
    }

    fn focus(&mut self, row: &VisibleRow) -> NavEffect {
        self.focused = Some(row.id.clone());
        NavEffect::Focus(row.id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::build_forest;
    use crate::state::TreeSelection;

    fn make_record(id: &str, parent_id: Option<&str>) -> Arc<ResourceRecord> {
        Arc::new(ResourceRecord::new(id, parent_id.map(ResourceId::from), id))
    }

    fn id(s: &str) -> ResourceId {
        ResourceId::from(s)
    }

    fn records() -> Vec<Arc<ResourceRecord>> {
        vec![
            make_record("R", None),
            make_record("C1", Some("R")),
            make_record("C2", Some("R")),
            make_record("C2a", Some("C2")),
        ]
    }

    fn row_ids(forest: &Forest) -> Vec<ResourceId> {
        flatten_visible(forest).into_iter().map(|r| r.id).collect()
    }

    #[test]
    fn test_collapsed_children_hidden() {
        let mut selection = TreeSelection::default();
        selection.expand(&id("R"));
        let forest = build_forest(&records(), &selection);
        assert_eq!(row_ids(&forest), vec![id("R"), id("C1"), id("C2")]);

        let rows = flatten_visible(&forest);
        assert_eq!(rows[2].level, 1);
        assert!(rows[2].has_children);
    }

    #[test]
    fn test_up_down_without_wraparound() {
        let mut selection = TreeSelection::default();
        selection.expand(&id("R"));
        let forest = build_forest(&records(), &selection);
        let mut nav = KeyboardNavigator::new();

        assert_eq!(nav.handle(NavKey::Down, &forest), NavEffect::Focus(id("R")));
        assert_eq!(nav.handle(NavKey::Up, &forest), NavEffect::None);
        assert_eq!(nav.handle(NavKey::Down, &forest), NavEffect::Focus(id("C1")));
        assert_eq!(nav.handle(NavKey::Down, &forest), NavEffect::Focus(id("C2")));
        assert_eq!(nav.handle(NavKey::Down, &forest), NavEffect::None);
        assert_eq!(nav.focused(), Some(&id("C2")));
        assert_eq!(nav.handle(NavKey::Home, &forest), NavEffect::Focus(id("R")));
        assert_eq!(nav.handle(NavKey::End, &forest), NavEffect::Focus(id("C2")));
    }

    #[test]
    fn test_right_and_left() {
        let mut selection = TreeSelection::default();
        selection.expand(&id("R"));
        let forest = build_forest(&records(), &selection);
        let mut nav = KeyboardNavigator::new();
        nav.set_focus(Some(id("C2")));

        assert_eq!(nav.handle(NavKey::Right, &forest), NavEffect::Expand(id("C2")));
        assert_eq!(nav.focused(), Some(&id("C2")));

        // collapsed => focus parent
        assert_eq!(nav.handle(NavKey::Left, &forest), NavEffect::Focus(id("R")));
        // expanded => collapse, focus stays
        assert_eq!(nav.handle(NavKey::Left, &forest), NavEffect::Collapse(id("R")));
        assert_eq!(nav.focused(), Some(&id("R")));
        // childless => no-op
        nav.set_focus(Some(id("C1")));
        assert_eq!(nav.handle(NavKey::Right, &forest), NavEffect::None);
    }

    #[test]
    fn test_left_on_collapsed_root_is_noop() {
        let forest = build_forest(&records(), &TreeSelection::default());
        let mut nav = KeyboardNavigator::new();
        nav.set_focus(Some(id("R")));
        assert_eq!(nav.handle(NavKey::Left, &forest), NavEffect::None);
    }

    #[test]
    fn test_activate_does_not_select() {
        let forest = build_forest(&records(), &TreeSelection::default());
        let mut nav = KeyboardNavigator::new();
        nav.set_focus(Some(id("R")));
        assert_eq!(nav.handle(NavKey::Enter, &forest), NavEffect::Activate(id("R")));
        assert_eq!(nav.handle(NavKey::Space, &forest), NavEffect::Activate(id("R")));
        assert!(flatten_visible(&forest).iter().all(|r| !r.is_selected));
    }

    #[test]
    fn test_stale_focus_restarts_at_top() {
        let forest = build_forest(&records(), &TreeSelection::default());
        let mut nav = KeyboardNavigator::new();
        nav.set_focus(Some(id("gone")));
        assert_eq!(nav.handle(NavKey::Enter, &forest), NavEffect::None);
        assert_eq!(nav.handle(NavKey::Down, &forest), NavEffect::Focus(id("R")));
    }

    #[test]
    fn test_key_names() {
        assert_eq!(NavKey::from_key_name("ArrowDown"), Some(NavKey::Down));
        assert_eq!(NavKey::from_key_name(" "), Some(NavKey::Space));
        assert_eq!(NavKey::from_key_name("Tab"), None);
    }
}
