//! Engine module - the phase state machine and its observers.
//!
//! This module is organized into several submodules:
//! - `state` - Phase enum, the `DragState` session snapshot, query helpers
//! - `machine` - `DragEngine`: command surface, queue, and transitions
//! - `hooks` - hook registry, subscriptions, and notification dispatch
//!
//! The engine uses an explicit phase enum compared by value; there is no
//! way to observe a half-applied transition. All other components receive
//! read-only snapshots.

mod hooks;
mod machine;
mod state;

pub use hooks::{Dispatcher, HookRegistry, Hooks, SubscriptionId};
pub use machine::DragEngine;
pub use state::{DragState, Phase, StateSnapshot};
