//! Loader for SentiWordNet-style dictionaries.
//!
//! Each synset line carries one positive/negative score pair shared by all of
//! its `lemma#rank` terms. Scores are collected per `lemma#pos` and sense rank,
//! then collapsed into one pair per term.

pub mod error;
pub mod lexicon;

#[cfg(test)]
mod tests;

pub use error::{LexiconError, LexiconResult};
pub use lexicon::{lexicon_key, Lexicon, LexiconEntry, PolarityScore, SenseWeighting, FIELD_COUNT};
