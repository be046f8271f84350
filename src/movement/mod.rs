//! Movement engine - pure impact computation.
//!
//! Everything in this module is state-in/state-out: given the published
//! dimensions and a directional or positional input, compute which droppable
//! the dragged item would land in, at which index, and which items must move
//! aside. No side effects, no access to geometry beyond what is passed in.
//!
//! ## Modules
//!
//! - `pointer` - continuous pointer movement and window-scroll reinterpretation
//! - `keyboard` - discrete main-axis steps and cross-axis droppable hops
//!
//! ## Animation policy
//!
//! The initial impact established when a drag becomes active is
//! non-animating (prevents a visible snap on the first frame). Pointer and
//! keyboard movement animate. Window-scroll reconciliation never animates:
//! the item did not move relative to the list, the viewport did.

mod keyboard;
mod pointer;

pub use keyboard::{cross_axis_move, step_in_list};
pub use pointer::resolve_pointer_move;

use crate::dimension_map::DimensionMap;
use crate::geometry::Position;
use crate::types::{DraggableId, Impact};

/// Reinterpret the dragged item's effective position after the window
/// scrolled. All stored dimensions live in a fixed client-coordinate frame
/// captured at collection time; scrolling changes what occupies a screen
/// position without changing any stored rectangle, so the last known
/// position plus the scroll delta re-runs the pointer resolution.
pub fn move_by_window_scroll(
    map: &DimensionMap,
    critical: &DraggableId,
    position: Position,
    delta: Position,
) -> Impact {
    resolve_pointer_move(map, critical, position + delta, false)
}

/// Shared displacement rule.
///
/// Within the critical item's home droppable the displaced set is the items
/// strictly between its original position and the destination index (the
/// items whose slots the drag passes through). In a foreign droppable every
/// item at or after the insertion index shifts to make room. The critical
/// item itself is never displaced.
pub(crate) fn displaced_in(
    map: &DimensionMap,
    droppable_id: &crate::types::DroppableId,
    critical: &DraggableId,
    destination: usize,
    should_animate: bool,
) -> Vec<crate::types::Displacement> {
    let ordered = map.ordered(droppable_id);

    let ids: Vec<&DraggableId> = match ordered.iter().position(|id| id == critical) {
        Some(origin) => {
            if destination > origin {
                ordered[origin + 1..=destination.min(ordered.len() - 1)]
                    .iter()
                    .collect()
            } else if destination < origin {
                ordered[destination..origin].iter().collect()
            } else {
                Vec::new()
            }
        }
        None => ordered
            .iter()
            .skip(destination)
            .filter(|id| *id != critical)
            .collect(),
    };

    ids.into_iter()
        .map(|id| crate::types::Displacement {
            draggable_id: id.clone(),
            should_animate,
        })
        .collect()
}
