//! The path search engine and its results.
//!
//! Analysis is an exhaustive frontier search: paths seeded from stem-index
//! prefix matches advance through the morphotactics graph, realizing suffix
//! surfaces against their running phonetic context, until the input is
//! fully consumed at a terminal state. Surviving paths are converted to
//! [`SingleAnalysis`] values.

pub mod analyzer;
pub mod search_path;
pub mod single_analysis;
pub mod trace;

pub use analyzer::{AnalyzerConfig, MorphAnalyzer};
pub use search_path::{SearchPath, SurfaceRecord};
pub use single_analysis::{AnalysisBuilder, AnalysisSummary, MorphemeData, SingleAnalysis};
pub use trace::{AnalysisTrace, NullObserver, RejectionReason, SearchObserver, TraceEvent};
