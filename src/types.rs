//! Core types for the drag engine.
//!
//! This module defines the fundamental data structures shared across the
//! engine: stable identities for draggables and droppables, the published
//! dimension snapshots, and the computed consequence of a drag position
//! (`Impact`).
//!
//! Dimensions are immutable once published into a drag session. Updates
//! (droppable scrolling) replace the entry wholesale rather than mutating it.

use crate::geometry::{Axis, Position, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Identities
// ============================================================================

/// Stable identity of a single reorderable item.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DraggableId(pub String);

/// Stable identity of a drop zone.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DroppableId(pub String);

impl DraggableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl DroppableId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DraggableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for DroppableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DraggableId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<&str> for DroppableId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DraggableId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<String> for DroppableId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ============================================================================
// Dimensions
// ============================================================================

/// Measured geometry of a draggable, captured during collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DraggableDimension {
    pub id: DraggableId,
    /// The droppable this draggable belonged to at measurement time.
    pub droppable_id: DroppableId,
    /// Border-box rectangle in client space.
    pub client: Rect,
    /// Border-box including margins; used for placeholder sizing by hosts.
    pub margin_box: Rect,
    /// Window scroll at measurement time, so later scroll deltas can be
    /// reconciled against a fixed coordinate frame.
    pub window_scroll: Position,
}

/// Measured geometry of a droppable, captured during collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DroppableDimension {
    pub id: DroppableId,
    pub axis: Axis,
    /// Border-box rectangle in client space.
    pub client: Rect,
    /// Container scroll at measurement time.
    pub scroll: Position,
    /// Latest known container scroll. Scroll updates publish a replacement
    /// entry with a new value here; `scroll` itself never changes.
    pub current_scroll: Position,
    pub is_enabled: bool,
}

impl DroppableDimension {
    /// How far the container has scrolled since measurement.
    pub fn scroll_diff(&self) -> Position {
        self.current_scroll - self.scroll
    }

    /// A copy of this entry with an updated current scroll.
    pub fn with_scroll(&self, current_scroll: Position) -> DroppableDimension {
        DroppableDimension {
            current_scroll,
            ..self.clone()
        }
    }
}

// ============================================================================
// Impact
// ============================================================================

/// Where the dragged item would land if released now.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragLocation {
    pub droppable_id: DroppableId,
    pub index: usize,
}

impl DragLocation {
    pub fn new(droppable_id: impl Into<DroppableId>, index: usize) -> Self {
        Self {
            droppable_id: droppable_id.into(),
            index,
        }
    }
}

/// A single item that must visually move aside for the dragged item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Displacement {
    pub draggable_id: DraggableId,
    /// False on the first frame of a drag and on scroll reconciliation, to
    /// avoid a visible jump; true for pointer/keyboard movement.
    pub should_animate: bool,
}

/// The computed consequence of the current drag position: a destination and
/// the ordered set of items displaced to make room.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// None when no enabled droppable exists to land in.
    pub destination: Option<DragLocation>,
    /// Never contains the dragged item itself.
    pub displaced: Vec<Displacement>,
}

impl Impact {
    /// A no-op placement at a known location with nothing displaced.
    pub fn resting(location: DragLocation) -> Self {
        Self {
            destination: Some(location),
            displaced: Vec::new(),
        }
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Payload for the drag-start notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragStart {
    pub draggable_id: DraggableId,
    pub source: DragLocation,
}

/// Payload for the drag-end notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DragResult {
    pub draggable_id: DraggableId,
    pub source: DragLocation,
    /// None when the drag was canceled or the item did not move.
    pub destination: Option<DragLocation>,
}
