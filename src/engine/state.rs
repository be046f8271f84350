//! Drag phase state - the single source of truth for "is a drag happening,
//! and in what phase".
//!
//! Phases advance forward through a strict sequence; the only backwards
//! edge is cancellation, which returns to `Idle`:
//!
//! ```text
//! Idle -> Collecting      (lift: measurements requested)
//! Collecting -> Dragging  (all expected publications arrived)
//! Dragging -> Dragging    (pointer/keyboard/scroll movement)
//! Dragging -> DropAnimating -> DropComplete   (drop with settle animation)
//! Dragging -> DropComplete                    (drop already at rest)
//! DropComplete -> Idle    (clean: session discarded)
//!
//! Collecting|Dragging -> Canceled -> Idle     (cancel)
//! ```
//!
//! Phases are compared by value; there is exactly one `DragState` at a time
//! and every other component sees it as a read-only snapshot.

use crate::dimension_map::DimensionMap;
use crate::geometry::Position;
use crate::types::{DragLocation, DragResult, DraggableId, Impact};
use serde::Serialize;

/// Where the active drag session is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No session.
    Idle,
    /// A lift happened; measurements are being collected.
    Collecting,
    /// Dimensions are in; movement commands are valid.
    Dragging,
    /// The item was released and is settling into place.
    DropAnimating,
    /// The result is final; awaiting `clean`.
    DropComplete,
    /// Transient exit taken by `cancel`; delivered to subscribers on the way
    /// back to `Idle`, never the settled phase.
    Canceled,
}

impl Phase {
    /// True while movement commands are meaningful.
    pub fn is_dragging(&self) -> bool {
        matches!(self, Phase::Dragging)
    }

    /// True from lift until the session is discarded.
    pub fn is_occupied(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    /// True once a drop result exists.
    pub fn is_dropping(&self) -> bool {
        matches!(self, Phase::DropAnimating | Phase::DropComplete)
    }
}

/// The full snapshot of one active drag session.
///
/// Created when collection completes, discarded by `clean`. Movement
/// commands replace `impact` and `position` atomically; nothing outside the
/// engine ever mutates this.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DragState {
    pub phase: Phase,
    /// The item being dragged.
    pub critical: DraggableId,
    /// Where the critical item started.
    pub origin: DragLocation,
    /// Where it would land if released now, and who must move aside.
    pub impact: Impact,
    /// Last known drag position in client space.
    pub position: Position,
    /// Drag position when the session became active; used to decide whether
    /// a drop needs a settle animation.
    pub lift_position: Position,
    /// Set when the drop is finalized.
    pub result: Option<DragResult>,
    /// All dimensions published into this session.
    pub dimensions: DimensionMap,
}

impl DragState {
    /// The drag offset accumulated since lift.
    pub fn drag_offset(&self) -> Position {
        self.position - self.lift_position
    }

    /// True when releasing now would leave the item where it started.
    pub fn is_at_rest(&self) -> bool {
        self.drag_offset().is_zero()
            && self.impact.destination.as_ref() == Some(&self.origin)
    }
}

/// What subscribers receive on every committed transition. `state` is None
/// in `Idle` and `Collecting`, where no full session snapshot exists yet.
#[derive(Clone, Copy, Debug)]
pub struct StateSnapshot<'a> {
    pub phase: Phase,
    pub state: Option<&'a DragState>,
}
