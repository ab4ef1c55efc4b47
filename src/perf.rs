//! Performance instrumentation for the pointer hot path.
//!
//! Every pointer move recomputes a preview, which is O(items) in the hovered
//! grid. This module offers:
//!
//! - **`profile_scope!`**: RAII timing of a block, zero-cost unless the
//!   `profiling` feature is enabled
//! - **`ScopedTimer`**: warns when a block exceeds a threshold
//! - **`MoveStats`**: rolling latency statistics for pointer-move handling
//!
//! ```ignore
//! fn on_pointer_move(&mut self) {
//!     profile_scope!("on_pointer_move");
//!     // ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::Instant;
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

/// Samples kept for rolling statistics
const STATS_SAMPLE_COUNT: usize = 100;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::for_profiling($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
    ($name:expr, $threshold_ms:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name, $threshold_ms);
        #[cfg(not(feature = "profiling"))]
        let _ = ($name, $threshold_ms);
    };
}

pub use profile_scope;

// ============================================================================
// Scoped Timer
// ============================================================================

/// Logs a warning on drop if the scope took longer than its threshold.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
    threshold_ms: f64,
}

impl ScopedTimer {
    pub fn new(name: &'static str, threshold_ms: f64) -> Self {
        Self {
            name,
            start: Instant::now(),
            threshold_ms,
        }
    }

    /// Timer with a 1ms threshold, used by `profile_scope!`.
    pub fn for_profiling(name: &'static str) -> Self {
        Self::new(name, 1.0)
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms <= self.threshold_ms {
            return;
        }

        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, elapsed_ms);

        #[cfg(not(feature = "profiling"))]
        warn!(
            operation = self.name,
            elapsed_ms = format!("{:.2}", elapsed_ms),
            threshold_ms = format!("{:.2}", self.threshold_ms),
            "Slow operation"
        );
    }
}

// ============================================================================
// Timing Utilities
// ============================================================================

/// Run `f` and return its result with the elapsed milliseconds.
#[inline]
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let start = Instant::now();
    let result = f();
    (result, start.elapsed().as_secs_f64() * 1000.0)
}

// ============================================================================
// Pointer Move Statistics
// ============================================================================

/// Rolling latency statistics for pointer-move recomputation.
#[derive(Debug, Clone)]
pub struct MoveStats {
    samples: VecDeque<f64>,
    count: u64,
    over_budget: u64,
    max_ms: f64,
    sum_ms: f64,
    budget_ms: f64,
}

impl MoveStats {
    pub fn new(budget_ms: f64) -> Self {
        Self {
            samples: VecDeque::with_capacity(STATS_SAMPLE_COUNT),
            count: 0,
            over_budget: 0,
            max_ms: 0.0,
            sum_ms: 0.0,
            budget_ms,
        }
    }

    /// Record one recomputation.
    pub fn record(&mut self, ms: f64, items_checked: usize) {
        if self.samples.len() >= STATS_SAMPLE_COUNT {
            if let Some(old) = self.samples.pop_front() {
                self.sum_ms -= old;
            }
        }
        self.samples.push_back(ms);
        self.sum_ms += ms;
        self.count += 1;
        self.max_ms = self.max_ms.max(ms);

        if ms > self.budget_ms {
            self.over_budget += 1;
            warn!(
                elapsed_ms = format!("{:.2}", ms),
                budget_ms = format!("{:.2}", self.budget_ms),
                items_checked,
                "Pointer move over budget; consider throttling at the UI boundary"
            );
        }
    }

    /// Total recorded moves
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Moves that exceeded the budget
    pub fn over_budget(&self) -> u64 {
        self.over_budget
    }

    pub fn max(&self) -> f64 {
        self.max_ms
    }

    /// Average over the retained samples
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            0.0
        } else {
            self.sum_ms / self.samples.len() as f64
        }
    }

    /// 95th percentile over the retained samples
    pub fn p95(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }
        let mut sorted: Vec<f64> = self.samples.iter().copied().collect();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let idx = ((sorted.len() as f64) * 0.95).floor() as usize;
        sorted.get(idx.min(sorted.len() - 1)).copied().unwrap_or(0.0)
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.budget_ms);
    }
}
