//! Tree Utilities
//!
//! Helper functions for tree rendering.

use resource_tree::{DropPosition, DropTarget, ResourceId, VisibleRow};

/// Indentation per level in pixels
pub const INDENT_PX: usize = 20;

pub fn indent_px(level: usize) -> usize {
    level * INDENT_PX
}

/// Transient interaction state affecting a row's look
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInteraction {
    pub dragging_id: Option<ResourceId>,
    pub drop_target: Option<DropTarget>,
    pub focused: Option<ResourceId>,
}

/// CSS classes for a row
pub fn row_class(row: &VisibleRow, interaction: &RowInteraction) -> String {
    let mut c = String::from("tree-item-wrapper");
    if row.is_selected { c.push_str(" selected"); }
    // Ancestor kept only to reach a filter match
    if !row.is_visible { c.push_str(" dimmed"); }
    if interaction.focused.as_ref() == Some(&row.id) { c.push_str(" focused"); }
    if interaction.dragging_id.as_ref() == Some(&row.id) { c.push_str(" dragging"); }
    if let Some(target) = &interaction.drop_target {
        if target.target == row.id {
            c.push_str(match target.position {
                DropPosition::Before => " drop-before",
                DropPosition::Inside => " drop-inside",
                DropPosition::After => " drop-after",
            });
        }
    }
    c
}

/// Controls that handle their own keys (Space toggles a checkbox, Enter presses a button)
pub fn is_form_control(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "BUTTON" | "SELECT" | "TEXTAREA"
    )
}

/// Expand toggle glyph, `None` for leaves
pub fn toggle_glyph(row: &VisibleRow) -> Option<&'static str> {
    if !row.has_children {
        None
    } else if row.is_expanded {
        Some("▼")
    } else {
        Some("▶")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_tree::{build_forest, flatten_visible, ResourceRecord, TreeSelection};
    use std::sync::Arc;

    fn rows() -> Vec<VisibleRow> {
        let records = vec![
            Arc::new(ResourceRecord::new(1, None, "Prod")),
            Arc::new(ResourceRecord::new(2, Some(ResourceId::from(1)), "DB")),
        ];
        let mut selection = TreeSelection::new();
        selection.expand(&ResourceId::from(1));
        selection.toggle_selected(&ResourceId::from(2));
        flatten_visible(&build_forest(&records, &selection))
    }

    #[test]
    fn test_row_class() {
        let rows = rows();
        let interaction = RowInteraction {
            dragging_id: Some(ResourceId::from(2)),
            drop_target: Some(DropTarget {
                target: ResourceId::from(1),
                position: DropPosition::Inside,
            }),
            focused: Some(ResourceId::from(1)),
        };

        assert_eq!(row_class(&rows[0], &interaction), "tree-item-wrapper focused drop-inside");
        assert_eq!(row_class(&rows[1], &interaction), "tree-item-wrapper selected dragging");
    }

    #[test]
    fn test_toggle_glyph_and_indent() {
        let rows = rows();
        assert_eq!(toggle_glyph(&rows[0]), Some("▼"));
        assert_eq!(toggle_glyph(&rows[1]), None);
        assert_eq!(indent_px(rows[1].level), 20);
    }

    #[test]
    fn test_row_controls_keep_their_keys() {
        // Row checkbox and collapse button
        assert!(is_form_control("INPUT"));
        assert!(is_form_control("button"));
        assert!(!is_form_control("DIV"));
        assert!(!is_form_control("SPAN"));
    }
}
