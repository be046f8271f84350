//! Movement resolution on horizontal lists.
//!
//! The inline movement tests run against vertical lists; these cover the
//! axis-relative accessors with horizontally ordered rows, where the main
//! axis is x and cross-axis hops travel vertically.

use dragkit::movement::{cross_axis_move, move_by_window_scroll, resolve_pointer_move, step_in_list};
use dragkit::{
    Axis, DimensionMap, DragLocation, DraggableDimension, DraggableId, DroppableDimension,
    DroppableId, Impact, Position, Rect,
};

fn horizontal_row(id: &str, top: f32) -> DroppableDimension {
    DroppableDimension {
        id: DroppableId::from(id),
        axis: Axis::Horizontal,
        client: Rect::new(0.0, top, 400.0, top + 100.0),
        scroll: Position::ZERO,
        current_scroll: Position::ZERO,
        is_enabled: true,
    }
}

fn row_item(id: &str, row: &str, top: f32, slot: usize) -> DraggableDimension {
    let left = slot as f32 * 100.0;
    let rect = Rect::new(left, top, left + 100.0, top + 100.0);
    DraggableDimension {
        id: DraggableId::from(id),
        droppable_id: DroppableId::from(row),
        client: rect,
        margin_box: rect,
        window_scroll: Position::ZERO,
    }
}

/// Row "r1" with three items side by side, row "r2" below it with one.
fn two_rows() -> DimensionMap {
    let mut map = DimensionMap::new();
    map.publish_droppables(vec![horizontal_row("r1", 0.0), horizontal_row("r2", 120.0)]);
    map.publish_draggables(vec![
        row_item("r1-0", "r1", 0.0, 0),
        row_item("r1-1", "r1", 0.0, 1),
        row_item("r1-2", "r1", 0.0, 2),
        row_item("r2-0", "r2", 120.0, 0),
    ]);
    map
}

#[test]
fn test_pointer_resolves_along_x_in_horizontal_list() {
    let map = two_rows();
    let critical = DraggableId::from("r1-0");

    // Past every midpoint (50, 150, 250): clamps to the last home slot.
    let impact = resolve_pointer_move(&map, &critical, Position::new(260.0, 50.0), true);
    let destination = impact.destination.unwrap();
    assert_eq!(destination.droppable_id.as_str(), "r1");
    assert_eq!(destination.index, 2);
    assert_eq!(impact.displaced.len(), 2);
    assert_eq!(impact.displaced[0].draggable_id.as_str(), "r1-1");
    assert_eq!(impact.displaced[1].draggable_id.as_str(), "r1-2");
}

#[test]
fn test_pointer_over_foreign_row_inserts_by_x() {
    let map = two_rows();
    let critical = DraggableId::from("r1-0");

    let impact = resolve_pointer_move(&map, &critical, Position::new(30.0, 170.0), true);
    let destination = impact.destination.unwrap();
    assert_eq!(destination.droppable_id.as_str(), "r2");
    assert_eq!(destination.index, 0);
    assert_eq!(impact.displaced.len(), 1);
    assert_eq!(impact.displaced[0].draggable_id.as_str(), "r2-0");
}

#[test]
fn test_cross_axis_hop_travels_vertically_between_rows() {
    let map = two_rows();
    let critical = DraggableId::from("r1-2");
    let impact = Impact::resting(DragLocation::new("r1", 2));

    // Dragging at x=250: beyond r2-0's midpoint, so it lands after it.
    let over = cross_axis_move(&map, &critical, &impact, Position::new(250.0, 50.0), true);
    let destination = over.destination.as_ref().unwrap();
    assert_eq!(destination.droppable_id.as_str(), "r2");
    assert_eq!(destination.index, 1);
    assert!(over.displaced.is_empty());

    let back = cross_axis_move(&map, &critical, &over, Position::new(250.0, 50.0), false);
    assert_eq!(back.destination.unwrap().droppable_id.as_str(), "r1");
}

#[test]
fn test_step_can_append_in_foreign_list_but_not_past_it() {
    let map = two_rows();
    let critical = DraggableId::from("r1-0");
    let in_foreign = Impact {
        destination: Some(DragLocation::new("r2", 0)),
        displaced: vec![],
    };

    // One item in r2: the foreign range is 0..=1.
    let stepped = step_in_list(&map, &critical, &in_foreign, 1);
    assert_eq!(stepped.destination.as_ref().unwrap().index, 1);

    let clamped = step_in_list(&map, &critical, &stepped, 1);
    assert_eq!(clamped, stepped);
}

#[test]
fn test_window_scroll_shifts_along_x() {
    let map = two_rows();
    let critical = DraggableId::from("r1-0");

    let impact = move_by_window_scroll(
        &map,
        &critical,
        Position::new(50.0, 50.0),
        Position::new(160.0, 0.0),
    );

    assert_eq!(impact.destination.unwrap().index, 2);
    assert_eq!(impact.displaced.len(), 2);
    assert!(impact.displaced.iter().all(|d| !d.should_animate));
}
