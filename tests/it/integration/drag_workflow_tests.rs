//! Full drag workflow integration tests.

use crate::helpers::{
    TestEngineBuilder, capture_results, draggable_dimension, droppable_dimension,
    lift_and_collect, point_in_slot, record_phases,
};
use dragkit::{DragLocation, DroppableId, Phase, Position};

#[test]
fn test_full_pointer_drag_workflow() {
    let mut engine = TestEngineBuilder::new()
        .with_list("a", 3)
        .with_list("b", 2)
        .build();
    let phases = record_phases(&mut engine);
    let results = capture_results(&engine);

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));

    let state = engine.state().unwrap();
    assert_eq!(state.phase, Phase::Dragging);
    assert_eq!(state.origin, DragLocation::new("a", 0));
    // The initial impact is a resting placement at the origin.
    assert_eq!(state.impact.destination, Some(DragLocation::new("a", 0)));
    assert!(state.impact.displaced.is_empty());
    // The drag starts from the critical item's center.
    assert_eq!(state.position, Position::new(50.0, 50.0));
    assert_eq!(state.lift_position, state.position);

    // Drag past a-1 and a-2.
    engine.move_to(point_in_slot(0, 1, 0.75));
    let state = engine.state().unwrap();
    assert_eq!(state.impact.destination, Some(DragLocation::new("a", 2)));
    assert_eq!(state.impact.displaced.len(), 2);
    assert!(state.impact.displaced.iter().all(|d| d.should_animate));

    engine.drop();
    assert_eq!(engine.phase(), Phase::DropAnimating);
    let result = engine.state().unwrap().result.clone().unwrap();
    assert_eq!(result.destination, Some(DragLocation::new("a", 2)));
    // The drag-end notification waits for the settle animation.
    assert!(results.lock().is_empty());

    engine.drop_animation_finished();
    assert_eq!(engine.phase(), Phase::DropComplete);
    assert_eq!(results.lock().as_slice(), &[result]);

    engine.clean();
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.state().is_none());

    assert_eq!(
        phases.lock().as_slice(),
        &[
            Phase::Collecting,
            Phase::Collecting,
            Phase::Dragging,
            Phase::Dragging,
            Phase::DropAnimating,
            Phase::DropComplete,
            Phase::Idle,
        ]
    );
}

#[test]
fn test_drop_without_movement_skips_settle_animation() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    let results = capture_results(&engine);

    lift_and_collect(&mut engine, "a-1", DragLocation::new("a", 1));
    engine.drop();

    // Nothing moved: no settle animation, and no destination is reported.
    assert_eq!(engine.phase(), Phase::DropComplete);
    let ended = results.lock();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].destination, None);
    assert_eq!(ended[0].source, DragLocation::new("a", 1));
}

#[test]
fn test_drag_into_foreign_list() {
    let mut engine = TestEngineBuilder::new()
        .with_list("a", 3)
        .with_list("b", 2)
        .build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.move_to(point_in_slot(1, 0, 0.25));

    let state = engine.state().unwrap();
    assert_eq!(state.impact.destination, Some(DragLocation::new("b", 0)));
    let displaced: Vec<&str> = state
        .impact
        .displaced
        .iter()
        .map(|d| d.draggable_id.as_str())
        .collect();
    assert_eq!(displaced, ["b-0", "b-1"]);
}

#[test]
fn test_lift_from_disabled_list_starts_with_no_destination() {
    let mut engine = TestEngineBuilder::new().with_disabled_list("a", 3).build();
    let results = capture_results(&engine);

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));

    // The home list cannot accept drops, so there is nowhere to land yet.
    let state = engine.state().unwrap();
    assert_eq!(state.impact.destination, None);
    assert!(state.impact.displaced.is_empty());

    engine.drop();
    assert_eq!(engine.phase(), Phase::DropAnimating);
    engine.drop_animation_finished();

    let ended = results.lock();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].destination, None);
}

#[test]
fn test_drag_out_of_disabled_list_into_enabled_one() {
    let mut engine = TestEngineBuilder::new()
        .with_disabled_list("a", 3)
        .with_list("b", 2)
        .build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    assert_eq!(engine.state().unwrap().impact.destination, None);

    engine.move_to(point_in_slot(1, 0, 0.25));

    let state = engine.state().unwrap();
    let destination = state.impact.destination.as_ref().unwrap();
    assert_eq!(destination.droppable_id.as_str(), "b");
    assert_eq!(destination.index, 0);
}

#[test]
fn test_commands_outside_a_drag_are_ignored() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    let phases = record_phases(&mut engine);
    let results = capture_results(&engine);

    engine.move_forward();
    engine.move_to(Position::new(50.0, 175.0));
    engine.drop();
    engine.cancel();
    engine.drop_animation_finished();
    engine.clean();

    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.state().is_none());
    assert!(phases.lock().is_empty());
    assert!(results.lock().is_empty());
}

#[test]
fn test_second_lift_is_rejected_while_occupied() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();

    engine.lift("a-0", DragLocation::new("a", 0));
    engine.lift("a-2", DragLocation::new("a", 2));
    engine.collect_dimensions();

    // The first lift owns the session.
    let state = engine.state().unwrap();
    assert_eq!(state.critical.as_str(), "a-0");

    engine.lift("a-2", DragLocation::new("a", 2));
    assert_eq!(engine.phase(), Phase::Dragging);
}

#[test]
fn test_droppable_scroll_update_reresolves_without_animation() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.move_to(point_in_slot(0, 1, 0.75));
    assert!(
        engine
            .state()
            .unwrap()
            .impact
            .displaced
            .iter()
            .all(|d| d.should_animate)
    );

    // The list scrolls down 100px under the stationary pointer: the impact
    // is re-derived against the shifted content without animation.
    engine.update_droppable_scroll("a", Position::new(0.0, 100.0));

    let state = engine.state().unwrap();
    assert_eq!(state.impact.destination, Some(DragLocation::new("a", 2)));
    assert!(!state.impact.displaced.is_empty());
    assert!(state.impact.displaced.iter().all(|d| !d.should_animate));
}

#[test]
fn test_scroll_update_for_unknown_droppable_is_ignored() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    let before = engine.state().unwrap().clone();

    engine.update_droppable_scroll("nope", Position::new(0.0, 50.0));

    assert_eq!(engine.state().unwrap(), &before);
}

#[test]
fn test_scroll_updates_while_collecting_commit_only_on_match() {
    let mut engine = TestEngineBuilder::new().with_list("a", 2).build();
    let phases = record_phases(&mut engine);

    engine.lift("a-0", DragLocation::new("a", 0));
    assert_eq!(phases.lock().len(), 1);

    // Nothing published yet: nothing to patch, nothing to deliver.
    engine.update_droppable_scroll("a", Position::new(0.0, 30.0));
    assert_eq!(phases.lock().len(), 1);

    engine.publish_droppables(vec![droppable_dimension("a", 0.0, true)]);
    assert_eq!(phases.lock().len(), 2);

    engine.update_droppable_scroll("nope", Position::new(0.0, 30.0));
    assert_eq!(phases.lock().len(), 2);

    engine.update_droppable_scroll("a", Position::new(0.0, 30.0));
    assert_eq!(phases.lock().len(), 3);

    engine.publish_draggables(vec![
        draggable_dimension("a", 0.0, 0),
        draggable_dimension("a", 0.0, 1),
    ]);
    assert_eq!(phases.lock().len(), 4);
    assert_eq!(engine.phase(), Phase::Dragging);

    // The patch applied during collection survives into the session.
    let state = engine.state().unwrap();
    let home = state.dimensions.droppable(&DroppableId::from("a")).unwrap();
    assert_eq!(home.scroll_diff(), Position::new(0.0, 30.0));
}

#[test]
fn test_window_scroll_moves_the_drag_position() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.move_by_window_scroll(Position::new(0.0, 120.0));

    let state = engine.state().unwrap();
    assert_eq!(state.position, Position::new(50.0, 170.0));
    assert_eq!(state.impact.destination, Some(DragLocation::new("a", 2)));
    assert_eq!(state.impact.displaced.len(), 2);
    assert!(state.impact.displaced.iter().all(|d| !d.should_animate));
}

#[test]
fn test_queued_window_scroll_applies_once_per_flush() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    let phases = record_phases(&mut engine);

    engine.queue_window_scroll(Position::new(0.0, 60.0));
    engine.queue_window_scroll(Position::new(0.0, 60.0));
    assert!(phases.lock().is_empty());

    engine.flush_window_scroll();
    assert_eq!(phases.lock().len(), 1);
    assert_eq!(engine.state().unwrap().position, Position::new(50.0, 170.0));

    // Nothing pending: a second flush commits nothing.
    engine.flush_window_scroll();
    assert_eq!(phases.lock().len(), 1);
}
