//! Performance monitoring utilities.
//!
//! Pointer moves arrive at display frequency during a drag, so the hot
//! paths carry scoped timers. With the `profiling` feature disabled the
//! macros compile to nothing.
//!
//! ## Usage
//!
//! ```ignore
//! use dragkit::profile_scope;
//!
//! fn hot_path() {
//!     profile_scope!("hot_path");
//!     // ... work ...
//! }
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{trace, warn};

/// Frame budget for a pointer-move recomputation at 60 FPS.
pub const TARGET_FRAME_MS: f64 = 16.67;

/// Global flag to enable/disable profiling at runtime.
static PROFILING_ENABLED: AtomicBool = AtomicBool::new(cfg!(feature = "profiling"));

pub fn set_profiling_enabled(enabled: bool) {
    PROFILING_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_profiling_enabled() -> bool {
    PROFILING_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer for a named scope. Records on drop; warns when a scope blows
/// through the frame budget.
pub struct ScopeTimer {
    name: &'static str,
    start: Instant,
}

impl ScopeTimer {
    pub fn new(name: &'static str) -> Option<Self> {
        if !is_profiling_enabled() {
            return None;
        }
        Some(Self {
            name,
            start: Instant::now(),
        })
    }
}

impl Drop for ScopeTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_secs_f64() * 1000.0;
        if elapsed_ms > TARGET_FRAME_MS {
            warn!(scope = self.name, elapsed_ms, "scope exceeded frame budget");
        } else {
            trace!(scope = self.name, elapsed_ms, "scope timing");
        }
    }
}

/// Time the enclosing scope when profiling is enabled; zero-cost otherwise.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _scope_timer = $crate::perf::ScopeTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}
