use std::collections::HashMap;

use super::Scorer;
use crate::alphabet::ALPHABET_SIZE;
use crate::error::{CrackError, Result};

/// Index-of-coincidence scorer
///
/// `sum f_i (f_i - 1) / (N (N - 1))` over the character histogram. English
/// prose lands near 0.067, uniformly random letters near 0.038. Needs no
/// frequency table.
#[derive(Debug, Clone, Copy)]
pub struct IocScorer {
    alphabet_size: usize,
}

impl IocScorer {
    /// `alphabet_size` is recorded for reference only; scoring counts
    /// whatever characters occur.
    pub fn new(alphabet_size: usize) -> Self {
        Self { alphabet_size }
    }

    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }
}

impl Default for IocScorer {
    fn default() -> Self {
        Self::new(ALPHABET_SIZE)
    }
}

impl Scorer for IocScorer {
    /// Fails with `TextTooShort` for texts of fewer than two characters,
    /// where the statistic has a zero denominator.
    fn score(&self, text: &str) -> Result<f64> {
        let mut histogram: HashMap<char, u64> = HashMap::new();
        let mut len: u64 = 0;
        for c in text.chars() {
            *histogram.entry(c).or_insert(0) += 1;
            len += 1;
        }

        if len <= 1 {
            return Err(CrackError::TextTooShort {
                length: len as usize,
                minimum: 2,
            });
        }

        let statistic: u64 = histogram.values().map(|&f| f * (f - 1)).sum();
        Ok(statistic as f64 / (len * (len - 1)) as f64)
    }
}
