//! Engine Errors

use thiserror::Error;

use crate::record::ResourceId;

/// Common result type for engine operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors surfaced to the user. Display strings double as notice text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Cannot move resource {dragged} into its own descendant {target}")]
    IntoOwnDescendant {
        dragged: ResourceId,
        target: ResourceId,
    },

    #[error("Resource {0} is no longer in the tree")]
    UnknownNode(ResourceId),

    #[error("Missing permission `{0}` to edit resources")]
    NotPermitted(String),

    #[error("The resource tree is read-only")]
    ReadOnly,

    #[error("Invalid tree configuration: {0}")]
    InvalidConfig(String),
}

/// Errors of the drag-and-drop engine
pub type DragError = TreeError;
