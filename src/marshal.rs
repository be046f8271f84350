//! Dimension marshal - on-demand collection of spatial measurements.
//!
//! A drag cannot begin synchronously with the input event that started it:
//! measurement needs a settled layout pass. The marshal decouples "a drag has
//! started" from "all measurements are available":
//!
//! 1. `start_collection` opens a collection pass (idempotent; a newer pass
//!    abandons the old one and discards its results - only the latest lift
//!    wins).
//! 2. The host calls `collect` once layout has settled. Every registered
//!    provider is asked to measure; providers that fail (element unmounted
//!    mid-collection) are simply omitted.
//! 3. The resulting bundle is published into the phase state machine, which
//!    advances on its own once both bulk publications have arrived.
//!
//! The marshal owns no drag logic and never touches the drag state directly.

use crate::error::{MarshalError, MarshalResult};
use crate::geometry::Position;
use crate::types::{DraggableDimension, DraggableId, DroppableDimension, DroppableId};
use tracing::{debug, trace};

/// Reports the geometry of one draggable on demand.
pub trait DraggableProvider {
    fn draggable_id(&self) -> DraggableId;

    /// Measure now. None means the element is gone; the entry is omitted
    /// from the published list.
    fn measure(&self) -> Option<DraggableDimension>;
}

/// Reports the geometry of one droppable on demand.
pub trait DroppableProvider {
    fn droppable_id(&self) -> DroppableId;

    fn measure(&self) -> Option<DroppableDimension>;
}

/// Everything one collection pass produced, tagged with its pass number so
/// stale bundles from an abandoned pass can be recognized and dropped.
#[derive(Debug)]
pub struct CollectionBundle {
    pub pass: u64,
    pub critical: DraggableId,
    pub droppables: Vec<DroppableDimension>,
    pub draggables: Vec<DraggableDimension>,
}

#[derive(Debug, Clone)]
struct InFlight {
    pass: u64,
    critical: DraggableId,
}

/// Collects and republishes draggable/droppable geometry on demand.
#[derive(Default)]
pub struct DimensionMarshal {
    draggables: Vec<Box<dyn DraggableProvider>>,
    droppables: Vec<Box<dyn DroppableProvider>>,
    next_pass: u64,
    in_flight: Option<InFlight>,
}

impl DimensionMarshal {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    pub fn register_draggable(
        &mut self,
        provider: Box<dyn DraggableProvider>,
    ) -> MarshalResult<()> {
        let id = provider.draggable_id();
        if self.draggables.iter().any(|p| p.draggable_id() == id) {
            return Err(MarshalError::DuplicateDraggable(id));
        }
        self.draggables.push(provider);
        Ok(())
    }

    pub fn register_droppable(
        &mut self,
        provider: Box<dyn DroppableProvider>,
    ) -> MarshalResult<()> {
        let id = provider.droppable_id();
        if self.droppables.iter().any(|p| p.droppable_id() == id) {
            return Err(MarshalError::DuplicateDroppable(id));
        }
        self.droppables.push(provider);
        Ok(())
    }

    /// Returns true if a provider was removed.
    pub fn unregister_draggable(&mut self, id: &DraggableId) -> bool {
        let before = self.draggables.len();
        self.draggables.retain(|p| p.draggable_id() != *id);
        self.draggables.len() != before
    }

    pub fn unregister_droppable(&mut self, id: &DroppableId) -> bool {
        let before = self.droppables.len();
        self.droppables.retain(|p| p.droppable_id() != *id);
        self.droppables.len() != before
    }

    // ------------------------------------------------------------------
    // Collection passes
    // ------------------------------------------------------------------

    /// Begin a collection pass for a lift. Any pass already in flight is
    /// abandoned; its partial results will be ignored. Returns the pass
    /// number.
    pub fn start_collection(&mut self, critical: DraggableId) -> u64 {
        if let Some(stale) = self.in_flight.take() {
            debug!(
                pass = stale.pass,
                critical = %stale.critical,
                "abandoning in-flight collection pass"
            );
        }
        self.next_pass += 1;
        let pass = self.next_pass;
        self.in_flight = Some(InFlight {
            pass,
            critical: critical.clone(),
        });
        debug!(pass, critical = %critical, "collection pass started");
        pass
    }

    /// Abort any in-flight pass. Used on cancel.
    pub fn stop_collection(&mut self) {
        if let Some(stale) = self.in_flight.take() {
            debug!(pass = stale.pass, "collection pass stopped");
        }
    }

    pub fn is_collecting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Measure every registered provider for the current pass. A no-op
    /// (None) when no pass is in flight. Providers that fail to report are
    /// omitted; a droppable with zero draggables is valid.
    pub fn collect(&mut self) -> Option<CollectionBundle> {
        let in_flight = self.in_flight.take()?;

        let droppables: Vec<DroppableDimension> =
            self.droppables.iter().filter_map(|p| p.measure()).collect();
        let draggables: Vec<DraggableDimension> =
            self.draggables.iter().filter_map(|p| p.measure()).collect();

        trace!(
            pass = in_flight.pass,
            droppables = droppables.len(),
            draggables = draggables.len(),
            "collection pass measured"
        );

        Some(CollectionBundle {
            pass: in_flight.pass,
            critical: in_flight.critical,
            droppables,
            draggables,
        })
    }
}

// ============================================================================
// Scroll coalescing
// ============================================================================

/// Folds a burst of window-scroll events into a single pending delta so the
/// engine recomputes the impact once per flush instead of once per event.
/// Correctness does not depend on coalescing; this is purely load shedding.
#[derive(Debug, Default)]
pub struct ScrollCoalescer {
    pending: Option<Position>,
}

impl ScrollCoalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold another scroll delta into the pending value.
    pub fn record(&mut self, delta: Position) {
        self.pending = Some(match self.pending {
            Some(pending) => pending + delta,
            None => delta,
        });
    }

    /// Take the accumulated delta, leaving the coalescer empty.
    pub fn take(&mut self) -> Option<Position> {
        self.pending.take()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_none()
    }
}
