//! Pointer movement resolution.
//!
//! Pointer moves arrive at display frequency, so this path stays allocation
//! light: one droppable lookup through the spatial index, one linear scan of
//! the target's ordered draggables.

use crate::dimension_map::DimensionMap;
use crate::geometry::Position;
use crate::movement::displaced_in;
use crate::types::{DragLocation, DraggableId, DroppableDimension, Impact};

/// Resolve a pointer position to an impact.
///
/// Target selection: the enabled droppable containing the pointer (ties:
/// smallest rectangle, then publication order), falling back to the nearest
/// enabled droppable. With no enabled droppable at all the impact has no
/// destination.
///
/// Index selection: the dragged item is conceptually inserted just before
/// the first draggable whose main-axis midpoint is greater than the
/// pointer's main-axis coordinate, so items before the pointer keep their
/// position and items after it shift one slot.
pub fn resolve_pointer_move(
    map: &DimensionMap,
    critical: &DraggableId,
    pointer: Position,
    should_animate: bool,
) -> Impact {
    let Some(target) = map.target_droppable(pointer) else {
        return Impact::default();
    };

    let index = insertion_index(map, target, critical, target.axis.main(pointer));
    let displaced = displaced_in(map, &target.id, critical, index, should_animate);

    Impact {
        destination: Some(DragLocation {
            droppable_id: target.id.clone(),
            index,
        }),
        displaced,
    }
}

/// Index of the first draggable whose midpoint exceeds the main-axis
/// coordinate; list length if none. Clamped to the last valid slot when the
/// critical item already belongs to the target (its own slot is part of the
/// list).
fn insertion_index(
    map: &DimensionMap,
    target: &DroppableDimension,
    critical: &DraggableId,
    main: f32,
) -> usize {
    let ordered = map.ordered(&target.id);

    let index = ordered
        .iter()
        .position(|id| {
            map.effective_rect(id)
                .is_some_and(|rect| rect.main_center(target.axis) > main)
        })
        .unwrap_or(ordered.len());

    if ordered.iter().any(|id| id == critical) {
        index.min(ordered.len().saturating_sub(1))
    } else {
        index
    }
}
