// Statistical language scorers
//
// A scorer maps a reduced text to a single number: higher means more like
// natural language. Breakers only depend on the `Scorer` capability, so an
// n-gram model and the model-free index of coincidence are interchangeable.

mod ioc;
mod ngram;

pub use ioc::IocScorer;
pub use ngram::{LanguageModel, NgramScorer, DEFAULT_ALPHA};

use crate::error::Result;

/// Anything that can rate how language-like a text is
pub trait Scorer {
    /// Score a reduced text (higher = more language-like)
    fn score(&self, text: &str) -> Result<f64>;
}

impl<S: Scorer + ?Sized> Scorer for &S {
    fn score(&self, text: &str) -> Result<f64> {
        (**self).score(text)
    }
}

impl<S: Scorer + ?Sized> Scorer for Box<S> {
    fn score(&self, text: &str) -> Result<f64> {
        (**self).score(text)
    }
}
