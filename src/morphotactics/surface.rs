//! Surface realization of suffix templates.
//!
//! The realizer turns a template into concrete letters for a specific
//! attachment site. Before every token it recomputes the phonetic
//! attributes of the output built so far (combined with the carried
//! attributes of the attachment site), so that later tokens observe
//! harmony decisions made by earlier ones: `Iyor` after `gel` first emits
//! `i`, and the following letters see a front, unrounded context.
//!
//! Realized surfaces are memoized on the owning transition per carried
//! attribute set.

use crate::alphabet::ALPHABET;
use crate::morphotactics::graph::SuffixTransition;
use crate::morphotactics::template::{SurfaceTemplate, TemplateToken};
use crate::phonetics::{morphemic_attributes, AttributeSet, PhoneticAttribute};

impl SuffixTransition {
    /// Realize this transition's surface for the given carried attributes,
    /// consulting the per-transition memo first.
    pub fn surface(&self, attrs: AttributeSet) -> String {
        if self.template().is_epsilon() {
            return String::new();
        }
        if let Some(surface) = self.cache().read().get(&attrs) {
            return surface.clone();
        }
        let surface = realize(self.template(), attrs);
        self.cache().write().insert(attrs, surface.clone());
        surface
    }
}

/// Realize a template against carried attributes, uncached.
pub fn realize(template: &SurfaceTemplate, attrs: AttributeSet) -> String {
    use PhoneticAttribute::*;

    let mut out = String::new();
    for token in template.tokens() {
        let current = morphemic_attributes(&out, attrs);
        match *token {
            TemplateToken::Letter(c) => out.push(c),
            TemplateToken::AVowel => {
                // Leading harmony vowel elides after a vowel-final site.
                if out.is_empty() && attrs.contains(LastLetterVowel) {
                    continue;
                }
                out.push(if current.contains(LastVowelFrontal) { 'e' } else { 'a' });
            }
            TemplateToken::IVowel => {
                if out.is_empty() && attrs.contains(LastLetterVowel) {
                    continue;
                }
                let frontal = current.contains(LastVowelFrontal);
                let rounded = current.contains(LastVowelRounded);
                out.push(match (frontal, rounded) {
                    (true, true) => 'ü',
                    (true, false) => 'i',
                    (false, true) => 'u',
                    (false, false) => 'ı',
                });
            }
            TemplateToken::Buffer(c) => {
                if current.contains(LastLetterVowel) {
                    out.push(c);
                }
            }
            TemplateToken::Devoice(c) => {
                if attrs.contains(LastLetterVoiceless) {
                    out.push(ALPHABET.devoice(c));
                } else {
                    out.push(c);
                }
            }
            TemplateToken::PreConsonant(c) | TemplateToken::PreVowel(c) => out.push(c),
        }
    }
    out
}
