//! Resource Tree Engine
//!
//! Materializes flat resource records into a hierarchy and drives the
//! interactive parts of a tree widget without touching the DOM:
//! - builder: flat parent-pointer list -> forest
//! - sort / filter: per-level ordering and ancestor-preserving visibility
//! - state: expansion and selection sets owned by the application
//! - drag: drag-and-drop reparent state machine
//! - keyboard: arrow-key navigation over the visible rows

pub mod builder;
pub mod config;
pub mod drag;
pub mod error;
pub mod filter;
pub mod keyboard;
pub mod node;
pub mod record;
pub mod sort;
pub mod state;

use std::sync::Arc;

pub use builder::build_forest;
pub use config::TreeConfig;
pub use drag::{DragEngine, DragState, DropOutcome, DropPosition, DropTarget, MoveRequest, PermissionGate, Point, RowHit};
pub use error::{DragError, TreeError, TreeResult};
pub use filter::{filter_forest, TreeFilter};
pub use keyboard::{flatten_visible, KeyboardNavigator, NavEffect, NavKey, VisibleRow};
pub use node::{Forest, TreeNode};
pub use record::{ResourceId, ResourceRecord, ResourceStatus};
pub use sort::{sort_forest, SortKey, SortOrder, SortSpec};
pub use state::{SetDelta, TreeSelection};

/// Build, sort, then filter
pub fn materialize(
    records: &[Arc<ResourceRecord>],
    selection: &TreeSelection,
    sort: SortSpec,
    filter: &TreeFilter,
) -> Forest {
    let forest = build_forest(records, selection);
    let forest = sort_forest(forest, sort);
    filter_forest(forest, filter)
}
