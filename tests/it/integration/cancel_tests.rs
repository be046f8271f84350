//! Cancellation integration tests.

use crate::helpers::{
    TestEngineBuilder, capture_results, lift_and_collect, point_in_slot, record_phases,
};
use dragkit::{DragLocation, Phase};

#[test]
fn test_cancel_while_collecting() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    let phases = record_phases(&mut engine);
    let results = capture_results(&engine);

    engine.lift("a-0", DragLocation::new("a", 0));
    engine.cancel();

    assert_eq!(engine.phase(), Phase::Idle);
    assert!(!engine.marshal_mut().is_collecting());
    // Subscribers observe the transient exit before the machine settles.
    assert_eq!(
        phases.lock().as_slice(),
        &[Phase::Collecting, Phase::Canceled, Phase::Idle]
    );

    // The end notification carries no destination.
    let ended = results.lock();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].draggable_id.as_str(), "a-0");
    assert_eq!(ended[0].source, DragLocation::new("a", 0));
    assert_eq!(ended[0].destination, None);
}

#[test]
fn test_cancel_while_dragging_discards_the_destination() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    let results = capture_results(&engine);

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.move_to(point_in_slot(0, 2, 0.25));
    assert_eq!(
        engine.state().unwrap().impact.destination,
        Some(DragLocation::new("a", 2))
    );

    engine.cancel();

    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.state().is_none());
    let ended = results.lock();
    assert_eq!(ended.len(), 1);
    assert_eq!(ended[0].destination, None);
}

#[test]
fn test_cancel_after_drop_is_ignored() {
    let mut engine = TestEngineBuilder::new().with_list("a", 3).build();
    let results = capture_results(&engine);

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.move_to(point_in_slot(0, 2, 0.25));
    engine.drop();
    assert_eq!(engine.phase(), Phase::DropAnimating);

    // The result is already final; cancel is not an escape hatch here.
    engine.cancel();
    assert_eq!(engine.phase(), Phase::DropAnimating);
    assert!(results.lock().is_empty());

    engine.drop_animation_finished();
    assert_eq!(results.lock()[0].destination, Some(DragLocation::new("a", 2)));
}

#[test]
fn test_lift_after_cancel_starts_fresh() {
    let mut engine = TestEngineBuilder::new()
        .with_list("a", 3)
        .with_list("b", 2)
        .build();

    lift_and_collect(&mut engine, "a-0", DragLocation::new("a", 0));
    engine.cancel();
    assert_eq!(engine.phase(), Phase::Idle);

    lift_and_collect(&mut engine, "b-1", DragLocation::new("b", 1));
    let state = engine.state().unwrap();
    assert_eq!(state.critical.as_str(), "b-1");
    assert_eq!(state.origin, DragLocation::new("b", 1));
    assert!(state.result.is_none());
}
