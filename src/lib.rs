//! dragkit - a headless drag-and-drop interaction engine.
//!
//! A user picks up an item from an ordered or grouped collection, moves it
//! by pointer or keyboard across one or more drop zones, and releases it at
//! a new position; every other affected item is reported as displaced so
//! the host can animate it out of the way. This crate owns the interaction
//! logic only: rendering, event capture, layout measurement primitives and
//! accessibility announcements are the host's job, wired in through the
//! dimension marshal and the hook/subscription surfaces.
//!
//! ## Architecture
//!
//! - `geometry` - positions, rectangles, axis-relative accessors
//! - `types` - identities, dimensions, impacts, notification payloads
//! - `spatial` - R-tree hit testing over droppable rectangles
//! - `dimension_map` - all published dimensions plus ordering, per session
//! - `marshal` - on-demand geometry collection with idempotent passes
//! - `movement` - pure impact computation for pointer/keyboard/scroll input
//! - `engine` - the phase state machine, command queue, hooks, subscribers
//! - `perf` - scoped timing for the hot pointer-move path
//!
//! ## A drag, end to end
//!
//! ```ignore
//! let mut engine = DragEngine::new();
//! engine.lift("card-3", DragLocation::new("column-a", 2));
//! // ... layout settles ...
//! engine.collect_dimensions();          // marshal publishes; phase -> Dragging
//! engine.move_to(Position::new(140.0, 260.0));
//! engine.cross_axis_move_forward();
//! engine.drop();
//! engine.drop_animation_finished();
//! engine.clean();                       // phase -> Idle
//! ```

pub mod dimension_map;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod marshal;
pub mod movement;
pub mod perf;
pub mod spatial;
pub mod types;

pub use dimension_map::DimensionMap;
pub use engine::{DragEngine, DragState, HookRegistry, Hooks, Phase, StateSnapshot, SubscriptionId};
pub use error::{MarshalError, MarshalResult};
pub use geometry::{Axis, Position, Rect};
pub use marshal::{
    CollectionBundle, DimensionMarshal, DraggableProvider, DroppableProvider, ScrollCoalescer,
};
pub use types::{
    DragLocation, DragResult, DragStart, DraggableDimension, DraggableId, Displacement,
    DroppableDimension, DroppableId, Impact,
};
