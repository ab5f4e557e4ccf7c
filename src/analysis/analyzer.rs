//! The morphological analyzer and its search loop.

use std::sync::Arc;

use crate::alphabet::ALPHABET;
use crate::analysis::search_path::SearchPath;
use crate::analysis::single_analysis::{AnalysisBuilder, SingleAnalysis};
use crate::analysis::trace::{AnalysisTrace, NullObserver, RejectionReason, SearchObserver};
use crate::error::Result;
use crate::lexicon::{DictionaryItem, Lexicon};
use crate::morphotactics::Morphotactics;
use crate::phonetics::{morphemic_attributes, PhoneticAttribute};
use crate::stems::{StemTransition, StemTransitionIndex};

/// Search tuning knobs.
///
/// The pruning constants are empirical; they bound worst-case expansion
/// without affecting ordinary words. They are parameters rather than
/// invariants — other lexicon sizes may want other values.
#[derive(Clone, Copy, Debug)]
pub struct AnalyzerConfig {
    /// Live-path count above which the anti-cycle guard runs.
    pub max_live_paths: usize,
    /// Highest tolerated repeat count of a single state in one path.
    pub max_state_repeat: usize,
    /// Match stems and suffix surfaces through ASCII diacritic folding.
    pub ascii_tolerant: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        AnalyzerConfig {
            max_live_paths: 30,
            max_state_repeat: 3,
            ascii_tolerant: false,
        }
    }
}

impl AnalyzerConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        AnalyzerConfig::default()
    }

    /// Set the live-path threshold of the anti-cycle guard.
    pub fn with_max_live_paths(mut self, max_live_paths: usize) -> Self {
        self.max_live_paths = max_live_paths;
        self
    }

    /// Set the tolerated per-state repeat count.
    pub fn with_max_state_repeat(mut self, max_state_repeat: usize) -> Self {
        self.max_state_repeat = max_state_repeat;
        self
    }

    /// Enable or disable ASCII-tolerant matching.
    pub fn with_ascii_tolerance(mut self, ascii_tolerant: bool) -> Self {
        self.ascii_tolerant = ascii_tolerant;
        self
    }
}

/// Rule-based morphological analyzer.
///
/// The analyzer is read-only and allocation-local per call: concurrent
/// [`analyze`](MorphAnalyzer::analyze) calls over a shared instance are
/// safe. [`add_item`](MorphAnalyzer::add_item) and
/// [`remove_item`](MorphAnalyzer::remove_item) mutate the stem index and
/// must be serialized by the caller against everything else.
///
/// # Examples
///
/// ```
/// use morfo::turkish;
///
/// let analyzer = turkish::analyzer().unwrap();
/// for analysis in analyzer.analyze("evlerine") {
///     println!("{analysis}");
/// }
/// ```
pub struct MorphAnalyzer {
    morphotactics: Arc<Morphotactics>,
    index: StemTransitionIndex,
    builder: AnalysisBuilder,
    config: AnalyzerConfig,
}

impl MorphAnalyzer {
    /// Create an analyzer over a wired graph and a lexicon, with default
    /// configuration.
    pub fn new(morphotactics: Arc<Morphotactics>, lexicon: &Lexicon) -> Result<Self> {
        MorphAnalyzer::with_config(morphotactics, lexicon, AnalyzerConfig::default())
    }

    /// Create an analyzer with an explicit configuration.
    pub fn with_config(
        morphotactics: Arc<Morphotactics>,
        lexicon: &Lexicon,
        config: AnalyzerConfig,
    ) -> Result<Self> {
        let index = StemTransitionIndex::bootstrap(Arc::clone(&morphotactics), lexicon)?;
        Ok(MorphAnalyzer {
            morphotactics,
            index,
            builder: AnalysisBuilder::new(),
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// The underlying graph.
    pub fn morphotactics(&self) -> &Arc<Morphotactics> {
        &self.morphotactics
    }

    /// Register an ephemeral item (unknown-word workflows). Must be
    /// serialized against all other calls.
    pub fn add_item(&self, item: &Arc<DictionaryItem>) -> Result<()> {
        self.index.add_item(item)
    }

    /// Remove a previously added item. Must be serialized against all
    /// other calls.
    pub fn remove_item(&self, item: &Arc<DictionaryItem>) -> Result<()> {
        self.index.remove_item(item)
    }

    /// Snapshot of all registered stem transitions.
    pub fn stem_transitions(&self) -> Vec<Arc<StemTransition>> {
        self.index.transitions()
    }

    /// Analyze a word into every valid segmentation. A word with no
    /// parse yields an empty list, never an error.
    pub fn analyze(&self, input: &str) -> Vec<SingleAnalysis> {
        let mut observer = NullObserver;
        self.run(input, &mut observer)
    }

    /// Analyze a word while recording every explored path.
    pub fn analyze_with_trace(&self, input: &str) -> (Vec<SingleAnalysis>, AnalysisTrace) {
        let mut trace = AnalysisTrace::new();
        let analyses = self.run(input, &mut trace);
        (analyses, trace)
    }

    fn run(&self, input: &str, observer: &mut dyn SearchObserver) -> Vec<SingleAnalysis> {
        self.search(input, observer)
            .iter()
            .map(|path| self.builder.build(path))
            .collect()
    }

    fn search(&self, input: &str, observer: &mut dyn SearchObserver) -> Vec<SearchPath> {
        let seeds = self.index.prefix_matches(input, self.config.ascii_tolerant);
        let mut paths: Vec<SearchPath> = seeds
            .iter()
            .filter_map(|stem| self.seed_path(input, stem))
            .collect();
        observer.on_seeds(&paths);

        let mut results = Vec::new();
        while !paths.is_empty() {
            if paths.len() > self.config.max_live_paths {
                paths.retain(|path| {
                    let keep = path.max_state_repeat() <= self.config.max_state_repeat;
                    if !keep {
                        observer.on_pruned(path);
                    }
                    keep
                });
            }
            let mut next = Vec::new();
            for path in &paths {
                if path.accepts() {
                    observer.on_accepted(path);
                    results.push(path.clone());
                }
                self.advance(path, &mut next, observer);
            }
            paths = next;
        }
        results
    }

    fn seed_path(&self, input: &str, stem: &Arc<StemTransition>) -> Option<SearchPath> {
        let consumed =
            ALPHABET.prefix_byte_len(input, &stem.surface, self.config.ascii_tolerant)?;
        let state = Arc::clone(self.morphotactics.state(stem.state));
        Some(SearchPath::initial(
            Arc::clone(stem),
            input[consumed..].to_string(),
            state,
        ))
    }

    fn advance(
        &self,
        path: &SearchPath,
        next: &mut Vec<SearchPath>,
        observer: &mut dyn SearchObserver,
    ) {
        use PhoneticAttribute::*;

        for transition in self.morphotactics.outgoing(path.current_state().id) {
            // A surface-bearing transition cannot fire on exhausted input.
            if path.tail().is_empty() && !transition.is_epsilon() {
                observer.on_rejected(path, transition, RejectionReason::EmptySurfaceExpected);
                continue;
            }

            let surface = transition.surface(path.attributes());
            let consumed = if surface.is_empty() {
                0
            } else {
                match ALPHABET.prefix_byte_len(path.tail(), &surface, self.config.ascii_tolerant)
                {
                    Some(consumed) => consumed,
                    None => {
                        observer.on_rejected(path, transition, RejectionReason::SurfaceMismatch);
                        continue;
                    }
                }
            };

            if let Some(condition) = transition.condition() {
                if !condition.accepts(path) {
                    observer.on_rejected(
                        path,
                        transition,
                        RejectionReason::Condition(condition.name()),
                    );
                    continue;
                }
            }

            let target = Arc::clone(self.morphotactics.state(transition.to));
            let new_path = if surface.is_empty() {
                // Epsilon move: attributes carry over, including any
                // termination ban.
                path.advanced(String::new(), 0, target, path.attributes())
            } else {
                let mut attributes = morphemic_attributes(&surface, path.attributes());
                attributes.remove(CannotTerminate);
                let template = transition.template();
                if template.expects_consonant() {
                    attributes.add(ExpectsConsonant);
                }
                if template.expects_vowel() {
                    attributes.add(ExpectsVowel);
                    attributes.add(CannotTerminate);
                }
                // Record the consumed input slice, not the realized
                // surface; under tolerant matching they can differ and
                // concatenated records must rebuild the input.
                let consumed_text = path.tail()[..consumed].to_string();
                path.advanced(consumed_text, consumed, target, attributes)
            };
            observer.on_advanced(&new_path);
            next.push(new_path);
        }
    }
}
