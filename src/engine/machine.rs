//! The drag engine - command surface and phase transitions.
//!
//! `DragEngine` owns the single drag session and is the only component that
//! mutates it. Commands arrive as high-level intents (`lift`, `move_to`,
//! `drop`, ...) and are applied through an explicit command queue: a command
//! dispatched while another is being committed is deferred until the current
//! one fully settles, so transitions are never interleaved and subscribers
//! observe them in order.
//!
//! Commands that are not valid for the current phase are defensive no-ops
//! (logged at debug level, state untouched). This tolerates duplicate or
//! late-arriving events from the input source.

use crate::dimension_map::DimensionMap;
use crate::engine::hooks::{Dispatcher, HookRegistry, SubscriptionId};
use crate::engine::state::{DragState, Phase, StateSnapshot};
use crate::geometry::Position;
use crate::marshal::{DimensionMarshal, ScrollCoalescer};
use crate::movement;
use crate::profile_scope;
use crate::types::{
    DragLocation, DragResult, DragStart, DraggableDimension, DraggableId, DroppableDimension,
    DroppableId, Impact,
};
use std::collections::VecDeque;
use tracing::{debug, warn};

/// A high-level intent applied to the state machine.
#[derive(Debug, Clone)]
enum Command {
    Lift(DraggableId, DragLocation),
    Move(Position),
    MoveForward,
    MoveBackward,
    CrossAxisMoveForward,
    CrossAxisMoveBackward,
    MoveByWindowScroll(Position),
    Drop,
    Cancel,
    DropAnimationFinished,
    Clean,
    PublishDroppables(Vec<DroppableDimension>),
    PublishDraggables(Vec<DraggableDimension>),
    UpdateDroppableScroll(DroppableId, Position),
}

/// The active session, from lift to clean.
enum Session {
    /// Waiting on dimension publications.
    Collecting {
        critical: DraggableId,
        origin: DragLocation,
        pass: u64,
        droppables: Option<Vec<DroppableDimension>>,
        draggables: Option<Vec<DraggableDimension>>,
    },
    /// Dimensions are in; `state.phase` is Dragging, DropAnimating or
    /// DropComplete.
    Active(Box<DragState>),
}

/// Hook to fire after a transition commits.
enum HookEvent {
    Started(DragStart),
    Ended(DragResult),
}

/// The drag interaction engine. One instance per drag context; independent
/// engines do not share any state.
pub struct DragEngine {
    marshal: DimensionMarshal,
    session: Option<Session>,
    dispatcher: Dispatcher,
    scroll: ScrollCoalescer,
    queue: VecDeque<Command>,
    dispatching: bool,
}

impl Default for DragEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DragEngine {
    pub fn new() -> Self {
        Self {
            marshal: DimensionMarshal::new(),
            session: None,
            dispatcher: Dispatcher::new(),
            scroll: ScrollCoalescer::new(),
            queue: VecDeque::new(),
            dispatching: false,
        }
    }

    // ------------------------------------------------------------------
    // Introspection
    // ------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        match &self.session {
            None => Phase::Idle,
            Some(Session::Collecting { .. }) => Phase::Collecting,
            Some(Session::Active(state)) => state.phase,
        }
    }

    /// The session snapshot, once dimensions are in.
    pub fn state(&self) -> Option<&DragState> {
        match &self.session {
            Some(Session::Active(state)) => Some(state),
            _ => None,
        }
    }

    // ------------------------------------------------------------------
    // Collaborator wiring
    // ------------------------------------------------------------------

    /// The dimension marshal, for provider registration.
    pub fn marshal_mut(&mut self) -> &mut DimensionMarshal {
        &mut self.marshal
    }

    /// The shared hook registry; swap drag-start/drag-end callbacks in it
    /// between sessions.
    pub fn hooks(&self) -> HookRegistry {
        self.dispatcher.hooks()
    }

    pub fn subscribe(
        &mut self,
        subscriber: Box<dyn FnMut(StateSnapshot<'_>) + Send>,
    ) -> SubscriptionId {
        self.dispatcher.subscribe(subscriber)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.dispatcher.unsubscribe(id)
    }

    // ------------------------------------------------------------------
    // Command surface
    // ------------------------------------------------------------------

    /// Begin a drag of `draggable_id`, which currently sits at `origin`.
    /// Rejected while any session is active; `cancel` first.
    pub fn lift(&mut self, draggable_id: impl Into<DraggableId>, origin: DragLocation) {
        self.dispatch(Command::Lift(draggable_id.into(), origin));
    }

    /// Continuous pointer movement.
    pub fn move_to(&mut self, position: Position) {
        self.dispatch(Command::Move(position));
    }

    /// Keyboard: one slot further along the main axis.
    pub fn move_forward(&mut self) {
        self.dispatch(Command::MoveForward);
    }

    /// Keyboard: one slot back along the main axis.
    pub fn move_backward(&mut self) {
        self.dispatch(Command::MoveBackward);
    }

    /// Keyboard: hop to the next droppable on the cross axis.
    pub fn cross_axis_move_forward(&mut self) {
        self.dispatch(Command::CrossAxisMoveForward);
    }

    /// Keyboard: hop to the previous droppable on the cross axis.
    pub fn cross_axis_move_backward(&mut self) {
        self.dispatch(Command::CrossAxisMoveBackward);
    }

    /// The window scrolled by `delta` while dragging.
    pub fn move_by_window_scroll(&mut self, delta: Position) {
        self.dispatch(Command::MoveByWindowScroll(delta));
    }

    /// Record a scroll delta without recomputing yet; a later
    /// `flush_window_scroll` applies the folded total. Use for
    /// high-frequency scroll streams.
    pub fn queue_window_scroll(&mut self, delta: Position) {
        self.scroll.record(delta);
    }

    /// Apply whatever `queue_window_scroll` accumulated.
    pub fn flush_window_scroll(&mut self) {
        if let Some(delta) = self.scroll.take() {
            self.move_by_window_scroll(delta);
        }
    }

    /// Release the item, finalizing the destination.
    pub fn drop(&mut self) {
        self.dispatch(Command::Drop);
    }

    /// Abort the drag; the item returns to its origin.
    pub fn cancel(&mut self) {
        self.dispatch(Command::Cancel);
    }

    /// The host finished the settle animation.
    pub fn drop_animation_finished(&mut self) {
        self.dispatch(Command::DropAnimationFinished);
    }

    /// Discard a completed session. Always safe to call.
    pub fn clean(&mut self) {
        self.dispatch(Command::Clean);
    }

    // ------------------------------------------------------------------
    // Publication surface (dimension marshal collaborators)
    // ------------------------------------------------------------------

    /// Drive the marshal's in-flight pass and feed the results in. Call
    /// once layout has settled after a lift.
    pub fn collect_dimensions(&mut self) {
        let Some(bundle) = self.marshal.collect() else {
            return;
        };
        let current_pass = match &self.session {
            Some(Session::Collecting { pass, .. }) => Some(*pass),
            _ => None,
        };
        if current_pass != Some(bundle.pass) {
            debug!(pass = bundle.pass, "discarding stale collection bundle");
            return;
        }
        self.publish_droppables(bundle.droppables);
        self.publish_draggables(bundle.draggables);
    }

    pub fn publish_droppables(&mut self, list: Vec<DroppableDimension>) {
        self.dispatch(Command::PublishDroppables(list));
    }

    pub fn publish_draggables(&mut self, list: Vec<DraggableDimension>) {
        self.dispatch(Command::PublishDraggables(list));
    }

    pub fn update_droppable_scroll(&mut self, id: impl Into<DroppableId>, scroll: Position) {
        self.dispatch(Command::UpdateDroppableScroll(id.into(), scroll));
    }

    // ------------------------------------------------------------------
    // Dispatch
    // ------------------------------------------------------------------

    /// Apply a command, deferring it if another is mid-commit. Transitions
    /// triggered while one is being processed run after it settles.
    fn dispatch(&mut self, command: Command) {
        self.queue.push_back(command);
        if self.dispatching {
            return;
        }
        self.dispatching = true;
        while let Some(command) = self.queue.pop_front() {
            self.apply(command);
        }
        self.dispatching = false;
    }

    fn apply(&mut self, command: Command) {
        match command {
            Command::Lift(id, origin) => self.apply_lift(id, origin),
            Command::Move(position) => self.apply_move(position),
            Command::MoveForward => self.apply_step(1),
            Command::MoveBackward => self.apply_step(-1),
            Command::CrossAxisMoveForward => self.apply_cross_axis(true),
            Command::CrossAxisMoveBackward => self.apply_cross_axis(false),
            Command::MoveByWindowScroll(delta) => self.apply_window_scroll(delta),
            Command::Drop => self.apply_drop(),
            Command::Cancel => self.apply_cancel(),
            Command::DropAnimationFinished => self.apply_drop_animation_finished(),
            Command::Clean => self.apply_clean(),
            Command::PublishDroppables(list) => self.apply_publish_droppables(list),
            Command::PublishDraggables(list) => self.apply_publish_draggables(list),
            Command::UpdateDroppableScroll(id, scroll) => self.apply_scroll_update(id, scroll),
        }
    }

    /// Notify observers of a committed transition: subscribers first, then
    /// the lifecycle hook for this transition, both after the state settled.
    fn commit(&mut self, hook: Option<HookEvent>) {
        let phase = self.phase();
        let state = match &self.session {
            Some(Session::Active(state)) => Some(state.as_ref()),
            _ => None,
        };
        self.dispatcher.state_committed(StateSnapshot { phase, state });

        match hook {
            Some(HookEvent::Started(start)) => self.dispatcher.drag_started(&start),
            Some(HookEvent::Ended(result)) => self.dispatcher.drag_ended(&result),
            None => {}
        }
    }

    fn reject(&self, command: &str) {
        debug!(command, phase = ?self.phase(), "command not valid in this phase; ignoring");
    }

    // ------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------

    fn apply_lift(&mut self, critical: DraggableId, origin: DragLocation) {
        if self.session.is_some() {
            // A second lift is not the cancellation path.
            self.reject("lift");
            return;
        }
        let pass = self.marshal.start_collection(critical.clone());
        debug!(critical = %critical, ?origin, "lift: collecting dimensions");
        self.session = Some(Session::Collecting {
            critical,
            origin,
            pass,
            droppables: None,
            draggables: None,
        });
        self.commit(None);
    }

    fn apply_publish_droppables(&mut self, list: Vec<DroppableDimension>) {
        match &mut self.session {
            Some(Session::Collecting { droppables, .. }) => {
                *droppables = Some(list);
                self.try_begin_dragging();
            }
            _ => self.reject("publish_droppables"),
        }
    }

    fn apply_publish_draggables(&mut self, list: Vec<DraggableDimension>) {
        match &mut self.session {
            Some(Session::Collecting { draggables, .. }) => {
                *draggables = Some(list);
                self.try_begin_dragging();
            }
            _ => self.reject("publish_draggables"),
        }
    }

    /// Once both bulk publications for the pass have arrived, establish the
    /// initial impact and enter `Dragging`. No external completion signal
    /// exists; the machine advances on its own.
    fn try_begin_dragging(&mut self) {
        let (critical, origin, droppables, draggables) = match self.session.take() {
            Some(Session::Collecting {
                critical,
                origin,
                droppables: Some(droppables),
                draggables: Some(draggables),
                ..
            }) => (critical, origin, droppables, draggables),
            other => {
                // Still waiting for the other publication.
                self.session = other;
                self.commit(None);
                return;
            }
        };

        let mut dimensions = DimensionMap::new();
        dimensions.publish_droppables(droppables);
        dimensions.publish_draggables(draggables);

        let Some(dimension) = dimensions.draggable(&critical).cloned() else {
            warn!(critical = %critical, "critical draggable missing from publications; abandoning lift");
            self.marshal.stop_collection();
            self.commit(None);
            return;
        };

        let position = dimension.client.center();
        let start = DragStart {
            draggable_id: critical.clone(),
            source: origin.clone(),
        };

        // The initial impact is a no-op placement at the origin; nothing is
        // displaced and nothing animates on the first frame. A destination
        // must always be an enabled droppable, so a lift out of a
        // drop-disabled list starts with no destination at all.
        let impact = match dimensions.droppable(&origin.droppable_id) {
            Some(home) if home.is_enabled => Impact::resting(origin.clone()),
            _ => Impact::default(),
        };

        debug!(critical = %critical, "dimensions published; drag active");
        self.session = Some(Session::Active(Box::new(DragState {
            phase: Phase::Dragging,
            critical,
            impact,
            origin,
            position,
            lift_position: position,
            result: None,
            dimensions,
        })));
        self.commit(Some(HookEvent::Started(start)));
    }

    fn apply_scroll_update(&mut self, id: DroppableId, scroll: Position) {
        match &mut self.session {
            Some(Session::Collecting { droppables, .. }) => {
                // Applied to the pending publication, in arrival order.
                let entry = droppables
                    .as_mut()
                    .and_then(|list| list.iter_mut().find(|d| d.id == id));
                let Some(entry) = entry else {
                    debug!(droppable = %id, "scroll update matched no pending droppable");
                    return;
                };
                *entry = entry.with_scroll(scroll);
                self.commit(None);
            }
            Some(Session::Active(state)) if state.phase == Phase::Dragging => {
                if !state.dimensions.update_droppable_scroll(&id, scroll) {
                    debug!(droppable = %id, "scroll update for unknown droppable");
                    return;
                }
                // The viewport moved under the pointer, not the item: the
                // impact is re-derived without animation.
                state.impact = movement::resolve_pointer_move(
                    &state.dimensions,
                    &state.critical,
                    state.position,
                    false,
                );
                self.commit(None);
            }
            _ => self.reject("update_droppable_scroll"),
        }
    }

    fn apply_move(&mut self, position: Position) {
        profile_scope!("pointer_move");
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("move");
            return;
        };
        if state.phase != Phase::Dragging {
            self.reject("move");
            return;
        }

        let impact =
            movement::resolve_pointer_move(&state.dimensions, &state.critical, position, true);
        state.impact = impact;
        state.position = position;
        self.commit(None);
    }

    fn apply_step(&mut self, delta: isize) {
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("move_forward/backward");
            return;
        };
        if state.phase != Phase::Dragging {
            self.reject("move_forward/backward");
            return;
        }

        state.impact =
            movement::step_in_list(&state.dimensions, &state.critical, &state.impact, delta);
        self.commit(None);
    }

    fn apply_cross_axis(&mut self, forward: bool) {
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("cross_axis_move");
            return;
        };
        if state.phase != Phase::Dragging {
            self.reject("cross_axis_move");
            return;
        }

        state.impact = movement::cross_axis_move(
            &state.dimensions,
            &state.critical,
            &state.impact,
            state.position,
            forward,
        );
        self.commit(None);
    }

    fn apply_window_scroll(&mut self, delta: Position) {
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("move_by_window_scroll");
            return;
        };
        if state.phase != Phase::Dragging {
            self.reject("move_by_window_scroll");
            return;
        }

        state.impact = movement::move_by_window_scroll(
            &state.dimensions,
            &state.critical,
            state.position,
            delta,
        );
        state.position = state.position + delta;
        self.commit(None);
    }

    fn apply_drop(&mut self) {
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("drop");
            return;
        };
        if state.phase != Phase::Dragging {
            self.reject("drop");
            return;
        }

        let moved = state.impact.destination.as_ref() != Some(&state.origin);
        let result = DragResult {
            draggable_id: state.critical.clone(),
            source: state.origin.clone(),
            // Unchanged placement reports no destination.
            destination: if moved {
                state.impact.destination.clone()
            } else {
                None
            },
        };
        state.result = Some(result.clone());

        if state.is_at_rest() {
            debug!(critical = %state.critical, "drop with no settle needed");
            state.phase = Phase::DropComplete;
            self.commit(Some(HookEvent::Ended(result)));
        } else {
            debug!(critical = %state.critical, ?result.destination, "drop: settle animation");
            state.phase = Phase::DropAnimating;
            self.commit(None);
        }
    }

    fn apply_drop_animation_finished(&mut self) {
        let Some(Session::Active(state)) = &mut self.session else {
            self.reject("drop_animation_finished");
            return;
        };
        if state.phase != Phase::DropAnimating {
            self.reject("drop_animation_finished");
            return;
        }

        state.phase = Phase::DropComplete;
        let result = match state.result.clone() {
            Some(result) => result,
            // Drop always stores a result before animating; fall back to the
            // current impact rather than faulting.
            None => DragResult {
                draggable_id: state.critical.clone(),
                source: state.origin.clone(),
                destination: state.impact.destination.clone(),
            },
        };
        self.commit(Some(HookEvent::Ended(result)));
    }

    /// Cancel exits through the transient `Canceled` phase back to `Idle`:
    /// subscribers observe the `Canceled` snapshot, then the settled `Idle`
    /// one; the session is discarded and the item returns to its origin.
    fn apply_cancel(&mut self) {
        let result = match &self.session {
            Some(Session::Collecting {
                critical, origin, ..
            }) => {
                self.marshal.stop_collection();
                DragResult {
                    draggable_id: critical.clone(),
                    source: origin.clone(),
                    destination: None,
                }
            }
            Some(Session::Active(state)) if state.phase == Phase::Dragging => DragResult {
                draggable_id: state.critical.clone(),
                source: state.origin.clone(),
                destination: None,
            },
            _ => {
                self.reject("cancel");
                return;
            }
        };

        debug!(critical = %result.draggable_id, "drag canceled");
        self.session = None;
        self.dispatcher.state_committed(StateSnapshot {
            phase: Phase::Canceled,
            state: None,
        });
        self.commit(Some(HookEvent::Ended(result)));
    }

    fn apply_clean(&mut self) {
        match &self.session {
            Some(Session::Active(state)) if state.phase == Phase::DropComplete => {
                self.session = None;
                self.commit(None);
            }
            _ => self.reject("clean"),
        }
    }
}
