use std::collections::HashMap;

use super::Scorer;
use crate::corpus::FrequencyTable;
use crate::error::{CrackError, Result};

/// Smoothing constant for n-grams absent from the table
pub const DEFAULT_ALPHA: f64 = 0.01;

/// Log10 probabilities derived from a frequency table
///
/// Unseen n-grams score the floor `log10(alpha / total)`.
#[derive(Debug, Clone)]
pub struct LanguageModel {
    log_probs: HashMap<String, f64>,
    n: usize,
    floor: f64,
}

impl LanguageModel {
    /// Build a new model; the table itself is left untouched
    pub fn from_table(table: &FrequencyTable, alpha: f64) -> Result<Self> {
        if !(alpha.is_finite() && alpha > 0.0) {
            return Err(CrackError::InvalidConfig(format!(
                "smoothing alpha must be positive and finite, got {}",
                alpha
            )));
        }

        let total = table.total() as f64;
        let log_probs = table
            .iter()
            .map(|(ngram, count)| (ngram.to_string(), (count as f64 / total).log10()))
            .collect();

        Ok(Self {
            log_probs,
            n: table.n(),
            floor: (alpha / total).log10(),
        })
    }

    /// N-gram length of the model
    pub fn n(&self) -> usize {
        self.n
    }

    /// Log probability assigned to unseen n-grams
    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Log probability of one n-gram, falling back to the floor
    #[inline]
    pub fn log_prob(&self, ngram: &str) -> f64 {
        self.log_probs.get(ngram).copied().unwrap_or(self.floor)
    }
}

/// Summed n-gram log-likelihood scorer
#[derive(Debug, Clone)]
pub struct NgramScorer {
    model: LanguageModel,
}

impl NgramScorer {
    /// Scorer with the default smoothing constant
    pub fn new(table: &FrequencyTable) -> Result<Self> {
        Self::with_alpha(table, DEFAULT_ALPHA)
    }

    pub fn with_alpha(table: &FrequencyTable, alpha: f64) -> Result<Self> {
        Ok(Self {
            model: LanguageModel::from_table(table, alpha)?,
        })
    }

    pub fn from_model(model: LanguageModel) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &LanguageModel {
        &self.model
    }

    /// Score with optional character stripping and segmentation
    ///
    /// Every character in `ignore` is removed first. With `split_by`, each
    /// segment is scored on its own and the scores are summed, so no n-gram
    /// spans a segment boundary.
    pub fn score_with(&self, text: &str, split_by: Option<&str>, ignore: &str) -> f64 {
        let stripped;
        let text = if ignore.is_empty() {
            text
        } else {
            stripped = text
                .chars()
                .filter(|c| !ignore.contains(*c))
                .collect::<String>();
            stripped.as_str()
        };

        match split_by {
            Some(delimiter) if !delimiter.is_empty() => text
                .split(delimiter)
                .map(|segment| self.score_windows(segment))
                .sum(),
            _ => self.score_windows(text),
        }
    }

    /// Sum over every contiguous window of `n` characters
    fn score_windows(&self, text: &str) -> f64 {
        let n = self.model.n;

        if text.is_ascii() {
            if text.len() < n {
                return 0.0;
            }
            return (0..=text.len() - n)
                .map(|i| self.model.log_prob(&text[i..i + n]))
                .sum();
        }

        let mut bounds: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        bounds.push(text.len());
        if bounds.len() <= n {
            return 0.0;
        }
        bounds
            .windows(n + 1)
            .map(|w| self.model.log_prob(&text[w[0]..w[n]]))
            .sum()
    }
}

impl Scorer for NgramScorer {
    fn score(&self, text: &str) -> Result<f64> {
        Ok(self.score_windows(text))
    }
}
