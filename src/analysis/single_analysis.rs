//! Final analysis results and their builder.

use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use serde::Serialize;

use crate::analysis::search_path::SearchPath;
use crate::lexicon::{DictionaryItem, RootAttribute};
use crate::morphotactics::Morpheme;

/// Morpheme id of the nominative case, semantically empty in output.
const NOMINATIVE_ID: &str = "Nom";
/// Morpheme id of the bare no-possessor marker, semantically empty in output.
const NO_POSSESSOR_ID: &str = "Pnon";

/// One (morpheme, surface) pair of an analysis.
#[derive(Debug, PartialEq, Eq)]
pub struct MorphemeData {
    /// The abstract morpheme.
    pub morpheme: Arc<Morpheme>,
    /// Its realized surface; empty for surfaceless morphemes.
    pub surface: String,
}

impl fmt::Display for MorphemeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.surface.is_empty() {
            write!(f, "{}", self.morpheme.id)
        } else {
            write!(f, "{}:{}", self.surface, self.morpheme.id)
        }
    }
}

/// A complete morphological analysis of one word.
///
/// Immutable once built. Morphemes appear in surface order; group
/// boundaries mark where derivational morphemes started new groups.
#[derive(Debug)]
pub struct SingleAnalysis {
    item: Arc<DictionaryItem>,
    morphemes: Vec<Arc<MorphemeData>>,
    group_boundaries: Vec<usize>,
}

impl SingleAnalysis {
    /// The resolved dictionary item (Dummy items report their reference).
    pub fn item(&self) -> &Arc<DictionaryItem> {
        &self.item
    }

    /// The ordered (morpheme, surface) pairs, stem first.
    pub fn morphemes(&self) -> &[Arc<MorphemeData>] {
        &self.morphemes
    }

    /// The overt surfaces, in order.
    pub fn surfaces(&self) -> Vec<&str> {
        self.morphemes
            .iter()
            .filter(|m| !m.surface.is_empty())
            .map(|m| m.surface.as_str())
            .collect()
    }

    /// Concatenation of all surfaces; equals the analyzed word.
    pub fn surface_string(&self) -> String {
        self.morphemes.iter().map(|m| m.surface.as_str()).collect()
    }

    /// Offsets where derivation groups begin.
    pub fn group_boundaries(&self) -> &[usize] {
        &self.group_boundaries
    }

    /// Number of derivation groups.
    pub fn group_count(&self) -> usize {
        self.group_boundaries.len()
    }

    /// Check whether the analysis contains a morpheme by id.
    pub fn contains_morpheme(&self, id: &str) -> bool {
        self.morphemes.iter().any(|m| m.morpheme.id == id)
    }

    /// Long format, `[kitap:Noun] kitap:Noun+lar:A3pl+a:Dat`.
    pub fn format_long(&self) -> String {
        let mut out = format!("[{}:{}] ", self.item.lemma, self.item.pos.short_form());
        for (index, morpheme) in self.morphemes.iter().enumerate() {
            if index > 0 {
                out.push(if self.group_boundaries.contains(&index) { '|' } else { '+' });
            }
            out.push_str(&morpheme.to_string());
        }
        out
    }

    /// A flat, serializable view of this analysis.
    pub fn summary(&self) -> AnalysisSummary {
        AnalysisSummary {
            lemma: self.item.lemma.clone(),
            pos: self.item.pos.short_form().to_string(),
            morphemes: self
                .morphemes
                .iter()
                .map(|m| (m.morpheme.id.clone(), m.surface.clone()))
                .collect(),
        }
    }
}

impl fmt::Display for SingleAnalysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_long())
    }
}

/// Serializable summary of an analysis, used by the CLI JSON output.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSummary {
    /// Dictionary lemma.
    pub lemma: String,
    /// Part of speech short form.
    pub pos: String,
    /// (morpheme id, surface) pairs.
    pub morphemes: Vec<(String, String)>,
}

/// Converts accepted search paths into [`SingleAnalysis`] values.
///
/// Surfaceless morpheme pairs repeat endlessly across analyses, so they are
/// interned in a read-through cache scoped to this builder. A racing miss
/// overwrites with an equal value; the cost is a redundant allocation, not
/// corruption.
#[derive(Default)]
pub struct AnalysisBuilder {
    empty_morphemes: RwLock<AHashMap<String, Arc<MorphemeData>>>,
}

impl AnalysisBuilder {
    /// Create a builder with an empty intern cache.
    pub fn new() -> Self {
        AnalysisBuilder::default()
    }

    /// Build the analysis for an accepted path.
    pub fn build(&self, path: &SearchPath) -> SingleAnalysis {
        let mut morphemes = Vec::with_capacity(path.records().len());
        let mut group_boundaries = vec![0];

        for record in path.records() {
            let morpheme = &record.state.morpheme;
            if record.surface.is_empty()
                && (morpheme.id == NOMINATIVE_ID || morpheme.id == NO_POSSESSOR_ID)
            {
                continue;
            }
            if record.state.derivative {
                let index = morphemes.len();
                if group_boundaries.last() != Some(&index) {
                    group_boundaries.push(index);
                }
            }
            let data = if record.surface.is_empty() {
                self.intern_empty(morpheme)
            } else {
                Arc::new(MorphemeData {
                    morpheme: Arc::clone(morpheme),
                    surface: record.surface.clone(),
                })
            };
            morphemes.push(data);
        }

        let item = path.item();
        let item = if item.has_attribute(RootAttribute::Dummy) {
            item.reference.as_ref().unwrap_or(item)
        } else {
            item
        };

        SingleAnalysis {
            item: Arc::clone(item),
            morphemes,
            group_boundaries,
        }
    }

    fn intern_empty(&self, morpheme: &Arc<Morpheme>) -> Arc<MorphemeData> {
        if let Some(data) = self.empty_morphemes.read().get(&morpheme.id) {
            return Arc::clone(data);
        }
        let data = Arc::new(MorphemeData {
            morpheme: Arc::clone(morpheme),
            surface: String::new(),
        });
        self.empty_morphemes
            .write()
            .insert(morpheme.id.clone(), Arc::clone(&data));
        data
    }
}
