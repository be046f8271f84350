//! Discrete keyboard movement.
//!
//! Keyboard steps are index-based, not position-based: a main-axis step
//! shifts the destination index by one within the current droppable, a
//! cross-axis step hops to the geometrically adjacent droppable. Invalid
//! steps (list boundary, no adjacent droppable) are accepted and return the
//! impact unchanged - the command is never an error.

use crate::dimension_map::DimensionMap;
use crate::geometry::Position;
use crate::movement::displaced_in;
use crate::types::{DragLocation, DraggableId, DroppableDimension, Impact};
use tracing::trace;

/// Shift the destination index by `delta` slots within the current
/// destination droppable, clamped to the valid range.
///
/// The valid range is `0..len` when the critical item belongs to the list
/// (its own slot counts) and `0..=len` in a foreign list (it can append).
pub fn step_in_list(
    map: &DimensionMap,
    critical: &DraggableId,
    impact: &Impact,
    delta: isize,
) -> Impact {
    let Some(destination) = &impact.destination else {
        return impact.clone();
    };

    let ordered = map.ordered(&destination.droppable_id);
    let is_home = ordered.iter().any(|id| id == critical);
    let max = if is_home {
        ordered.len().saturating_sub(1)
    } else {
        ordered.len()
    };

    let index = destination.index.saturating_add_signed(delta).min(max);
    if index == destination.index {
        trace!(index, "keyboard step clamped at list boundary");
        return impact.clone();
    }

    Impact {
        destination: Some(DragLocation {
            droppable_id: destination.droppable_id.clone(),
            index,
        }),
        displaced: displaced_in(map, &destination.droppable_id, critical, index, true),
    }
}

/// Hop to the adjacent enabled droppable in the given cross-axis direction.
///
/// The target is the nearest enabled droppable whose center is strictly
/// offset from the current droppable's center in that direction
/// (equidistant candidates resolve by publication order). The insertion
/// index is the slot whose main-axis midpoint is closest to the drag's last
/// known main-axis position. With no candidate the impact is unchanged.
pub fn cross_axis_move(
    map: &DimensionMap,
    critical: &DraggableId,
    impact: &Impact,
    position: Position,
    forward: bool,
) -> Impact {
    let Some(destination) = &impact.destination else {
        return impact.clone();
    };
    let Some(current) = map.droppable(&destination.droppable_id) else {
        return impact.clone();
    };

    let Some(target) = adjacent_droppable(map, current, forward) else {
        trace!(
            from = %current.id,
            forward,
            "no adjacent droppable on the cross axis"
        );
        return impact.clone();
    };

    let main = target.axis.main(position);
    let mut index = closest_slot(map, target, main);

    // The critical item's own slot is already part of its home list.
    let ordered = map.ordered(&target.id);
    if ordered.iter().any(|id| id == critical) {
        index = index.min(ordered.len().saturating_sub(1));
    }

    Impact {
        destination: Some(DragLocation {
            droppable_id: target.id.clone(),
            index,
        }),
        displaced: displaced_in(map, &target.id, critical, index, true),
    }
}

/// Nearest enabled droppable strictly beyond `current` on the cross axis.
fn adjacent_droppable<'a>(
    map: &'a DimensionMap,
    current: &DroppableDimension,
    forward: bool,
) -> Option<&'a DroppableDimension> {
    let axis = current.axis;
    let here = current.client.cross_center(axis);

    let mut best: Option<(f32, &DroppableDimension)> = None;
    for candidate in map.droppables_ranked() {
        if candidate.id == current.id || !candidate.is_enabled {
            continue;
        }
        let there = candidate.client.cross_center(axis);
        let ahead = if forward { there > here } else { there < here };
        if !ahead {
            continue;
        }
        let distance = (there - here).abs();
        // Strict < keeps the earliest-published candidate on ties.
        if best.is_none_or(|(d, _)| distance < d) {
            best = Some((distance, candidate));
        }
    }
    best.map(|(_, candidate)| candidate)
}

/// Index of the slot whose main-axis midpoint is closest to `main`; one past
/// it when `main` lies beyond that midpoint.
fn closest_slot(map: &DimensionMap, target: &DroppableDimension, main: f32) -> usize {
    let ordered = map.ordered(&target.id);
    if ordered.is_empty() {
        return 0;
    }

    let mut best: Option<(f32, usize, f32)> = None;
    for (i, id) in ordered.iter().enumerate() {
        let Some(rect) = map.effective_rect(id) else {
            continue;
        };
        let mid = rect.main_center(target.axis);
        let distance = (mid - main).abs();
        if best.is_none_or(|(d, _, _)| distance < d) {
            best = Some((distance, i, mid));
        }
    }

    let Some((_, i, mid)) = best else {
        return 0;
    };
    if main > mid { i + 1 } else { i }
}
