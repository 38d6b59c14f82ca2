//! Drag-and-Drop Reparenting
//!
//! Explicit state machine turning pointer input into a reparent request:
//!
//! `Idle -> Pressed -> Dragging <-> Hovering -> Idle`
//!
//! The engine performs no I/O. A committed drop yields a [`MoveRequest`]
//! which the caller hands to its move callback.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::TreeConfig;
use crate::error::{DragError, TreeError, TreeResult};
use crate::node::Forest;
use crate::record::ResourceId;

/// Pointer position in client coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where, relative to the target row, the dragged node lands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    Inside,
    After,
}

impl DropPosition {
    /// Classify a vertical offset within a row.
    ///
    /// The top `edge_fraction` of the row is `Before`, the bottom one `After`,
    /// everything between is `Inside`.
    pub fn from_offset(offset_y: f64, row_height: f64, edge_fraction: f64) -> Self {
        if row_height <= 0.0 {
            return DropPosition::Inside;
        }
        let ratio = offset_y / row_height;
        if ratio < edge_fraction {
            DropPosition::Before
        } else if ratio > 1.0 - edge_fraction {
            DropPosition::After
        } else {
            DropPosition::Inside
        }
    }
}

/// Pointer over a row, with the row's vertical geometry
#[derive(Debug, Clone, PartialEq)]
pub struct RowHit {
    pub target: ResourceId,
    pub row_top: f64,
    pub row_height: f64,
    pub pointer_y: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropTarget {
    pub target: ResourceId,
    pub position: DropPosition,
}

/// Reparent request handed to the move collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveRequest {
    pub resource_id: ResourceId,
    pub new_parent_id: Option<ResourceId>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Pointer down on a node, not yet past the movement threshold
    Pressed { dragged: ResourceId, origin: Point },
    Dragging { dragged: ResourceId, origin: Point },
    Hovering {
        dragged: ResourceId,
        origin: Point,
        target: DropTarget,
    },
}

/// Result of releasing the pointer
#[derive(Debug, Clone, PartialEq)]
pub enum DropOutcome {
    /// No gesture in progress
    Ignored,
    /// Pressed and released without dragging
    Click(ResourceId),
    /// Released without a target
    Cancelled,
    Rejected(DragError),
    Move(MoveRequest),
}

/// Answers "may the acting principal do X"
pub trait PermissionGate {
    fn has_permission(&self, permission: &str) -> bool;
}

impl<F> PermissionGate for F
where
    F: Fn(&str) -> bool,
{
    fn has_permission(&self, permission: &str) -> bool {
        self(permission)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DragEngine {
    state: DragState,
    read_only: bool,
    threshold_px: f64,
    edge_fraction: f64,
    edit_permission: String,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new(&TreeConfig::default())
    }
}

impl DragEngine {
    pub fn new(config: &TreeConfig) -> Self {
        Self {
            state: DragState::Idle,
            read_only: config.read_only,
            threshold_px: config.drag_threshold_px,
            edge_fraction: config.edge_fraction,
            edit_permission: config.edit_permission.clone(),
        }
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
        if read_only {
            self.cancel();
        }
    }

    /// Node being dragged (once past the threshold)
    pub fn dragged(&self) -> Option<&ResourceId> {
        match &self.state {
            DragState::Dragging { dragged, .. } | DragState::Hovering { dragged, .. } => Some(dragged),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.dragged().is_some()
    }

    pub fn drop_target(&self) -> Option<&DropTarget> {
        match &self.state {
            DragState::Hovering { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Start a gesture on `id`. Any stale gesture is discarded.
    pub fn pointer_down(&mut self, id: ResourceId, at: Point, gate: &impl PermissionGate) -> TreeResult<()> {
        self.state = DragState::Idle;
        if self.read_only {
            return Err(TreeError::ReadOnly);
        }
        if !gate.has_permission(&self.edit_permission) {
            return Err(TreeError::NotPermitted(self.edit_permission.clone()));
        }

        self.state = if self.threshold_px <= 0.0 {
            debug!(id = %id, "drag started");
            DragState::Dragging { dragged: id, origin: at }
        } else {
            DragState::Pressed { dragged: id, origin: at }
        };
        Ok(())
    }

    /// Pointer moved anywhere. Promotes a press to a drag past the threshold.
    pub fn pointer_move(&mut self, at: Point) {
        if let DragState::Pressed { dragged, origin } = &self.state {
            let dx = (at.x - origin.x).abs();
            let dy = (at.y - origin.y).abs();
            if dx > self.threshold_px || dy > self.threshold_px {
                debug!(id = %dragged, "drag started");
                self.state = DragState::Dragging {
                    dragged: dragged.clone(),
                    origin: *origin,
                };
            }
        }
    }

    /// Drop target a row hit resolves to
    pub fn target_for(&self, hit: &RowHit) -> DropTarget {
        DropTarget {
            target: hit.target.clone(),
            position: DropPosition::from_offset(hit.pointer_y - hit.row_top, hit.row_height, self.edge_fraction),
        }
    }

    /// Pointer is over a row. Only meaningful while dragging.
    pub fn hover(&mut self, hit: RowHit) {
        let target = self.target_for(&hit);
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            DragState::Dragging { dragged, origin } | DragState::Hovering { dragged, origin, .. } => {
                DragState::Hovering { dragged, origin, target }
            }
            other => other,
        };
    }

    /// Pointer left every row; the drag continues without a target
    pub fn leave(&mut self) {
        let state = std::mem::take(&mut self.state);
        self.state = match state {
            DragState::Hovering { dragged, origin, .. } => DragState::Dragging { dragged, origin },
            other => other,
        };
    }

    /// Abort the gesture. Returns whether anything was in progress.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.state != DragState::Idle;
        if was_active {
            debug!("drag cancelled");
        }
        self.state = DragState::Idle;
        was_active
    }

    /// Release the pointer and resolve the gesture.
    ///
    /// `forest` must be the unfiltered tree so the descendant check sees
    /// every node. The engine is `Idle` afterwards in every case.
    pub fn pointer_up(&mut self, forest: &Forest) -> DropOutcome {
        match std::mem::take(&mut self.state) {
            DragState::Idle => DropOutcome::Ignored,
            DragState::Pressed { dragged, .. } => DropOutcome::Click(dragged),
            DragState::Dragging { .. } => {
                debug!("drag released without a target");
                DropOutcome::Cancelled
            }
            DragState::Hovering { dragged, target, .. } => match resolve_move(forest, &dragged, &target) {
                Ok(request) => {
                    debug!(
                        id = %request.resource_id,
                        parent = ?request.new_parent_id,
                        position = ?target.position,
                        "drop accepted"
                    );
                    DropOutcome::Move(request)
                }
                Err(err) => {
                    warn!(%err, "drop rejected");
                    DropOutcome::Rejected(err)
                }
            },
        }
    }
}

/// Validate a drop and work out the new parent
pub fn resolve_move(forest: &Forest, dragged: &ResourceId, target: &DropTarget) -> TreeResult<MoveRequest> {
    let dragged_node = forest
        .find(dragged)
        .ok_or_else(|| TreeError::UnknownNode(dragged.clone()))?;
    if dragged_node.subtree_contains(&target.target) {
        return Err(TreeError::IntoOwnDescendant {
            dragged: dragged.clone(),
            target: target.target.clone(),
        });
    }

    let new_parent_id = match target.position {
        DropPosition::Inside => Some(target.target.clone()),
        DropPosition::Before | DropPosition::After => {
            let target_node = forest
                .find(&target.target)
                .ok_or_else(|| TreeError::UnknownNode(target.target.clone()))?;
            target_node.parent.clone()
        }
    };

    Ok(MoveRequest {
        resource_id: dragged.clone(),
        new_parent_id,
    })
}
