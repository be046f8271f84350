//! Error types for the drag engine.
//!
//! Commands on the engine are deliberately infallible: a command that is not
//! valid for the current phase is a silent no-op (logged at debug level).
//! The only fallible public surface is marshal registration.

use crate::types::{DraggableId, DroppableId};
use thiserror::Error;

/// Errors from dimension marshal registration misuse.
#[derive(Error, Debug)]
pub enum MarshalError {
    /// A provider for this draggable id is already registered
    #[error("draggable `{0}` is already registered")]
    DuplicateDraggable(DraggableId),

    /// A provider for this droppable id is already registered
    #[error("droppable `{0}` is already registered")]
    DuplicateDroppable(DroppableId),
}

/// Result type alias for marshal operations
pub type MarshalResult<T> = Result<T, MarshalError>;
