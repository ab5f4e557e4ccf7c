//! # Morfo
//!
//! A rule-based morphological analyzer for Turkish.
//!
//! ## Features
//!
//! - Pure Rust implementation
//! - Finite-state morphotactics with templated suffix surfaces
//! - Turkish phonology: vowel harmony, voicing, elision and insertion
//! - Prefix-indexed stem lookup over a runtime-extensible lexicon
//! - Exhaustive path search producing every valid segmentation
//! - Optional search tracing for regression tooling
//!
//! ## Example
//!
//! ```
//! use morfo::turkish;
//!
//! let analyzer = turkish::analyzer().unwrap();
//! let analyses = analyzer.analyze("kitaplara");
//!
//! assert!(!analyses.is_empty());
//! assert_eq!(analyses[0].surfaces(), vec!["kitap", "lar", "a"]);
//! ```

pub mod alphabet;
pub mod analysis;
pub mod error;
pub mod lexicon;
pub mod morphotactics;
pub mod phonetics;
pub mod stems;
pub mod turkish;

pub mod prelude {}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
