//! Hook and subscription dispatch.
//!
//! External observers see the engine two ways:
//!
//! - **Hooks**: drag-start / drag-end callbacks, fired exactly once per
//!   qualifying phase transition. They live in a shared registry that is
//!   re-read at fire time, so callers can swap callbacks between sessions
//!   without re-wiring the engine.
//! - **Subscribers**: receive a state snapshot on every committed
//!   transition, in transition order, with no gaps.
//!
//! Both fire only after the transition has been fully committed, and a
//! panicking callback is isolated: the fault is logged and the committed
//! state is unaffected.

use crate::engine::state::StateSnapshot;
use crate::types::{DragResult, DragStart};
use parking_lot::RwLock;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use tracing::{trace, warn};

/// Drag lifecycle callbacks. Replace entries between sessions as needed;
/// the dispatcher reads the registry fresh on every fire.
#[derive(Default)]
pub struct Hooks {
    pub on_drag_start: Option<Box<dyn FnMut(&DragStart) + Send>>,
    pub on_drag_end: Option<Box<dyn FnMut(&DragResult) + Send>>,
}

/// Shared, swappable hook storage.
pub type HookRegistry = Arc<RwLock<Hooks>>;

/// Handle for removing a subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type SubscriberFn = Box<dyn FnMut(StateSnapshot<'_>) + Send>;

/// Observes committed transitions and relays them outward.
pub struct Dispatcher {
    hooks: HookRegistry,
    subscribers: Vec<(SubscriptionId, SubscriberFn)>,
    next_subscription: u64,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatcher {
    pub fn new() -> Self {
        Self {
            hooks: Arc::new(RwLock::new(Hooks::default())),
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// The shared hook registry. Clone it, keep it, swap callbacks in it.
    pub fn hooks(&self) -> HookRegistry {
        Arc::clone(&self.hooks)
    }

    pub fn subscribe(&mut self, subscriber: SubscriberFn) -> SubscriptionId {
        self.next_subscription += 1;
        let id = SubscriptionId(self.next_subscription);
        self.subscribers.push((id, subscriber));
        id
    }

    /// Returns true if the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver a committed transition to every subscriber, in subscription
    /// order.
    pub(crate) fn state_committed(&mut self, snapshot: StateSnapshot<'_>) {
        trace!(phase = ?snapshot.phase, "transition committed");
        for (id, subscriber) in &mut self.subscribers {
            let outcome = catch_unwind(AssertUnwindSafe(|| subscriber(snapshot)));
            if outcome.is_err() {
                warn!(subscription = ?id, "subscriber panicked; committed state is unaffected");
            }
        }
    }

    /// Fire the drag-start hook, re-reading the registry.
    pub(crate) fn drag_started(&self, start: &DragStart) {
        let mut hooks = self.hooks.write();
        if let Some(callback) = hooks.on_drag_start.as_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| callback(start)));
            if outcome.is_err() {
                warn!(critical = %start.draggable_id, "drag-start hook panicked");
            }
        }
    }

    /// Fire the drag-end hook, re-reading the registry.
    pub(crate) fn drag_ended(&self, result: &DragResult) {
        let mut hooks = self.hooks.write();
        if let Some(callback) = hooks.on_drag_end.as_mut() {
            let outcome = catch_unwind(AssertUnwindSafe(|| callback(result)));
            if outcome.is_err() {
                warn!(critical = %result.draggable_id, "drag-end hook panicked");
            }
        }
    }
}
