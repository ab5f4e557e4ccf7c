//! Search observation for debugging and regression tooling.
//!
//! The search loop accepts an observer; production runs pass
//! [`NullObserver`] and pay nothing, while
//! [`MorphAnalyzer::analyze_with_trace`](crate::analysis::MorphAnalyzer::analyze_with_trace)
//! collects an [`AnalysisTrace`]: every candidate seed and every explored
//! path with its fate. Pure data, no behavioral difference.

use crate::analysis::search_path::SearchPath;
use crate::morphotactics::SuffixTransition;

/// Why a transition was skipped for a path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectionReason {
    /// The realized surface is not a prefix of the remaining input.
    SurfaceMismatch,
    /// The input is exhausted but the transition carries a surface.
    EmptySurfaceExpected,
    /// The named guard condition rejected the path.
    Condition(&'static str),
}

/// Hook into the search loop. All methods default to no-ops.
pub trait SearchObserver {
    /// Called once with the seeded paths.
    fn on_seeds(&mut self, _paths: &[SearchPath]) {}

    /// Called when a transition is skipped for a path.
    fn on_rejected(
        &mut self,
        _path: &SearchPath,
        _transition: &SuffixTransition,
        _reason: RejectionReason,
    ) {
    }

    /// Called for every newly created path.
    fn on_advanced(&mut self, _path: &SearchPath) {}

    /// Called when a path is accepted as a complete analysis.
    fn on_accepted(&mut self, _path: &SearchPath) {}

    /// Called when the anti-cycle guard drops a path.
    fn on_pruned(&mut self, _path: &SearchPath) {}
}

/// Observer that records nothing.
#[derive(Debug, Default)]
pub struct NullObserver;

impl SearchObserver for NullObserver {}

/// One recorded search event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// A transition was skipped.
    Rejected {
        /// Path display form.
        path: String,
        /// Transition display form.
        transition: String,
        /// Why the transition was skipped.
        reason: RejectionReason,
    },
    /// A new live path was created.
    Advanced {
        /// Path display form.
        path: String,
    },
    /// A path was accepted as an analysis.
    Accepted {
        /// Path display form.
        path: String,
    },
    /// A path was dropped by the anti-cycle guard.
    Pruned {
        /// Path display form.
        path: String,
    },
}

/// A full record of one analysis call.
#[derive(Debug, Default)]
pub struct AnalysisTrace {
    /// Display forms of the candidate seed paths.
    pub seeds: Vec<String>,
    /// Search events in occurrence order.
    pub events: Vec<TraceEvent>,
}

impl AnalysisTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        AnalysisTrace::default()
    }

    /// Count the recorded rejections.
    pub fn rejection_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Rejected { .. }))
            .count()
    }

    /// Count the recorded acceptances.
    pub fn accepted_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, TraceEvent::Accepted { .. }))
            .count()
    }
}

impl SearchObserver for AnalysisTrace {
    fn on_seeds(&mut self, paths: &[SearchPath]) {
        self.seeds = paths.iter().map(|p| p.to_string()).collect();
    }

    fn on_rejected(
        &mut self,
        path: &SearchPath,
        transition: &SuffixTransition,
        reason: RejectionReason,
    ) {
        self.events.push(TraceEvent::Rejected {
            path: path.to_string(),
            transition: transition.name().to_string(),
            reason,
        });
    }

    fn on_advanced(&mut self, path: &SearchPath) {
        self.events.push(TraceEvent::Advanced {
            path: path.to_string(),
        });
    }

    fn on_accepted(&mut self, path: &SearchPath) {
        self.events.push(TraceEvent::Accepted {
            path: path.to_string(),
        });
    }

    fn on_pruned(&mut self, path: &SearchPath) {
        self.events.push(TraceEvent::Pruned {
            path: path.to_string(),
        });
    }
}
