//! Engine run metrics.
//!
//! Small structs used to observe a run: per-dimension sweep timings and
//! counts plus the resolve stage. `Parser::run_with_metrics` always fills
//! them; they are cheap (a few `Instant`s per title).

use super::resolve::Assignment;
use crate::{Dimension, Node};
use std::time::Duration;

// --- Metrics -----------------------------------------------------------------

#[derive(Debug, Default, Clone)]
pub struct RunMetrics {
    /// Total elapsed time for [`Parser::run_with_metrics`].
    ///
    /// [`Parser::run_with_metrics`]: super::Parser::run_with_metrics
    pub total: Duration,
    /// Time spent sweeping rules over the title (all dimensions).
    pub sweep: Duration,
    /// One entry per dimension, in sweep order.
    pub passes: Vec<PassMetrics>,
    /// Time spent resolving nodes into assignments.
    pub resolve: Duration,
}

/// Timing and counts for one dimension's pass.
#[derive(Debug, Clone)]
pub struct PassMetrics {
    pub dim: Dimension,
    pub duration: Duration,
    /// Active rules run in this pass.
    pub rules_considered: usize,
    /// Regex/lexicon hits, including ones skipped for overlapping a consumed span.
    pub matches: usize,
    /// Nodes produced (hits that survived overlap and production).
    pub produced: usize,
}

/// Parser output bundled with timing information.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Every node produced, ordered by position in the title.
    pub nodes: Vec<Node>,
    /// Resolved assignments, ordered by position in the title.
    pub assignments: Vec<Assignment>,
    pub metrics: RunMetrics,
}
