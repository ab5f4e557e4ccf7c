//! Suffix surface templates.
//!
//! Suffixes are wired into the graph as templates, not literal strings: the
//! plural is `lAr`, the dative `+yA`, the locative `>dA`. Template tokens
//! defer the letter-level decisions (harmony, insertion, devoicing) to the
//! surface realizer, which resolves them against the phonetic attributes of
//! whatever the suffix attaches to.
//!
//! Token syntax:
//!
//! - a plain letter stands for itself
//! - `A` — low harmony vowel, realized as `a` or `e`
//! - `I` — high harmony vowel, realized as `ı`, `i`, `u` or `ü`
//! - `+c` — insertion letter, emitted only after a vowel (`+yA` dative)
//! - `>c` — letter devoiced after a voiceless final (`>dA` locative)
//! - `~c` — letter of a form that must be followed by a consonant
//! - `!c` — letter of a form that must be followed by a vowel and cannot
//!   end the word
//!
//! A malformed template is a configuration error and is rejected when the
//! graph is built, never during analysis.

use std::fmt;

use crate::error::{MorfoError, Result};

/// One token of a suffix surface template.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateToken {
    /// A literal letter.
    Letter(char),
    /// Low harmony vowel (`a`/`e`).
    AVowel,
    /// High harmony vowel (`ı`/`i`/`u`/`ü`).
    IVowel,
    /// Insertion letter, emitted only after a vowel.
    Buffer(char),
    /// Letter devoiced when attached to a voiceless final.
    Devoice(char),
    /// Letter of the allomorph used before consonants; flags the realized
    /// surface with a consonant expectation.
    PreConsonant(char),
    /// Letter of the allomorph used before vowels; flags the realized
    /// surface as requiring a vowel and unable to terminate.
    PreVowel(char),
}

/// A parsed suffix template.
#[derive(Clone, Debug)]
pub struct SurfaceTemplate {
    raw: String,
    tokens: Vec<TemplateToken>,
}

impl SurfaceTemplate {
    /// Parse a template string. Empty templates are legal and denote an
    /// epsilon (surfaceless) transition.
    pub fn parse(raw: &str) -> Result<Self> {
        let mut tokens = Vec::new();
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            let token = match c {
                'A' => TemplateToken::AVowel,
                'I' => TemplateToken::IVowel,
                '+' | '>' | '~' | '!' => {
                    let letter = chars.next().ok_or_else(|| {
                        MorfoError::template(format!("dangling '{c}' in template '{raw}'"))
                    })?;
                    if !letter.is_alphabetic() || letter.is_uppercase() {
                        return Err(MorfoError::template(format!(
                            "'{c}' must be followed by a letter in template '{raw}'"
                        )));
                    }
                    match c {
                        '+' => TemplateToken::Buffer(letter),
                        '>' => TemplateToken::Devoice(letter),
                        '~' => TemplateToken::PreConsonant(letter),
                        _ => TemplateToken::PreVowel(letter),
                    }
                }
                c if c.is_alphabetic() && c.is_lowercase() => TemplateToken::Letter(c),
                c => {
                    return Err(MorfoError::template(format!(
                        "unexpected token '{c}' in template '{raw}'"
                    )));
                }
            };
            tokens.push(token);
        }
        Ok(SurfaceTemplate {
            raw: raw.to_string(),
            tokens,
        })
    }

    /// The template source text.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The parsed tokens.
    pub fn tokens(&self) -> &[TemplateToken] {
        &self.tokens
    }

    /// Check if this template never produces a surface.
    pub fn is_epsilon(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Whether realized surfaces of this template must be followed by a
    /// consonant-initial suffix.
    pub fn expects_consonant(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, TemplateToken::PreConsonant(_)))
    }

    /// Whether realized surfaces of this template must be followed by a
    /// vowel-initial suffix (and therefore cannot end the word).
    pub fn expects_vowel(&self) -> bool {
        self.tokens
            .iter()
            .any(|t| matches!(t, TemplateToken::PreVowel(_)))
    }
}

impl fmt::Display for SurfaceTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let t = SurfaceTemplate::parse("lAr").unwrap();
        assert_eq!(
            t.tokens(),
            &[
                TemplateToken::Letter('l'),
                TemplateToken::AVowel,
                TemplateToken::Letter('r')
            ]
        );
        assert!(!t.is_epsilon());
    }

    #[test]
    fn test_parse_markers() {
        let t = SurfaceTemplate::parse("+yA").unwrap();
        assert_eq!(
            t.tokens(),
            &[TemplateToken::Buffer('y'), TemplateToken::AVowel]
        );

        let t = SurfaceTemplate::parse(">dAn").unwrap();
        assert_eq!(
            t.tokens(),
            &[
                TemplateToken::Devoice('d'),
                TemplateToken::AVowel,
                TemplateToken::Letter('n')
            ]
        );

        let t = SurfaceTemplate::parse(">cI~k").unwrap();
        assert!(t.expects_consonant());
        assert!(!t.expects_vowel());

        let t = SurfaceTemplate::parse(">cI!ğ").unwrap();
        assert!(t.expects_vowel());
        assert!(!t.expects_consonant());
    }

    #[test]
    fn test_parse_epsilon() {
        let t = SurfaceTemplate::parse("").unwrap();
        assert!(t.is_epsilon());
    }

    #[test]
    fn test_parse_errors() {
        assert!(SurfaceTemplate::parse("lQr").is_err());
        assert!(SurfaceTemplate::parse("lAr+").is_err());
        assert!(SurfaceTemplate::parse("+A").is_err());
        assert!(SurfaceTemplate::parse("l2r").is_err());
    }

    #[test]
    fn test_turkish_letters_are_plain_tokens() {
        let t = SurfaceTemplate::parse("çIğ").unwrap();
        assert_eq!(
            t.tokens(),
            &[
                TemplateToken::Letter('ç'),
                TemplateToken::IVowel,
                TemplateToken::Letter('ğ')
            ]
        );
    }
}
