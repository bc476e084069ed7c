use std::cmp::Ordering;
use std::fmt;

use serde::Serialize;

use super::vigenere::chunk;
use crate::error::{CrackError, Result};
use crate::score::Scorer;

/// Typical mean IoC of English sub-streams
pub const DEFAULT_EXPECTED_PLAINTEXT: f64 = 0.06;

/// Typical mean IoC of random sub-streams
pub const DEFAULT_EXPECTED_RANDOM: f64 = 0.035;

/// Mean sub-stream score for one candidate key length
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KeyLengthScore {
    pub length: usize,
    pub score: f64,
}

/// Quality warnings raised by the heuristic assessment
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KeylengthWarning {
    /// Even the best length scores below threshold
    NoLikelyKeyLength { max_score: f64, threshold: f64 },
    /// Even the worst length scores above threshold
    PossiblyPlaintext { min_score: f64, threshold: f64 },
}

impl fmt::Display for KeylengthWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoLikelyKeyLength {
                max_score,
                threshold,
            } => write!(
                f,
                "Highest score {:.4} below threshold {:.4}: probably no key length in range will work",
                max_score, threshold
            ),
            Self::PossiblyPlaintext {
                min_score,
                threshold,
            } => write!(
                f,
                "Lowest score {:.4} above threshold {:.4}: is the text already plaintext?",
                min_score, threshold
            ),
        }
    }
}

/// Outcome of key-length detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeylengthReport {
    /// Every tested length, best first (unfiltered)
    pub scores: Vec<KeyLengthScore>,
    /// High-scoring lengths left after removing doubled lengths, best first
    pub candidates: Vec<KeyLengthScore>,
    pub warnings: Vec<KeylengthWarning>,
}

impl KeylengthReport {
    /// Highest-ranked surviving candidate, falling back to the top score
    pub fn best(&self) -> Option<usize> {
        self.candidates
            .first()
            .or_else(|| self.scores.first())
            .map(|s| s.length)
    }
}

/// Key-length inference for periodic polyalphabetic ciphers
///
/// For each length `n` in range the text is split into `n` interleaved
/// streams and the scorer (typically [`IocScorer`](crate::score::IocScorer))
/// is averaged over them. At the true length every stream is a single
/// Caesar alphabet and the mean stays close to plaintext statistics.
#[derive(Debug, Clone)]
pub struct KeylengthDetector<S> {
    scorer: S,
    min_length: usize,
    max_length: usize,
    expected_plaintext: f64,
    expected_random: f64,
}

impl<S: Scorer> KeylengthDetector<S> {
    pub fn new(scorer: S, min_length: usize, max_length: usize) -> Result<Self> {
        if min_length == 0 || min_length > max_length {
            return Err(CrackError::InvalidKeyLengthRange {
                min: min_length,
                max: max_length,
            });
        }
        Ok(Self {
            scorer,
            min_length,
            max_length,
            expected_plaintext: DEFAULT_EXPECTED_PLAINTEXT,
            expected_random: DEFAULT_EXPECTED_RANDOM,
        })
    }

    /// Replace the expected plaintext/random scores
    ///
    /// The plaintext expectation must be strictly larger.
    pub fn with_expectations(mut self, plaintext: f64, random: f64) -> Result<Self> {
        if plaintext.partial_cmp(&random) != Some(Ordering::Greater) {
            return Err(CrackError::InvalidThreshold { plaintext, random });
        }
        self.expected_plaintext = plaintext;
        self.expected_random = random;
        Ok(self)
    }

    /// Midpoint between the expected plaintext and random scores
    pub fn threshold(&self) -> f64 {
        (self.expected_plaintext + self.expected_random) / 2.0
    }

    pub fn range(&self) -> (usize, usize) {
        (self.min_length, self.max_length)
    }

    /// Mean score over the `n` interleaved streams of `text`
    pub fn score_length(&self, text: &str, n: usize) -> Result<f64> {
        let streams = chunk(text, n);
        let total = streams
            .iter()
            .map(|s| self.scorer.score(s))
            .sum::<Result<f64>>()?;
        Ok(total / n as f64)
    }

    /// Score every length in range and assess the result
    ///
    /// A length whose streams are too short to score fails with
    /// [`CrackError::KeyLengthTooLong`], which carries the largest length
    /// the text supports.
    pub fn detect(&self, text: &str) -> Result<KeylengthReport> {
        let mut scores = (self.min_length..=self.max_length)
            .map(|length| {
                let score = self.score_length(text, length).map_err(|e| match e {
                    CrackError::TextTooShort { .. } => {
                        let letters = text.chars().count();
                        CrackError::KeyLengthTooLong {
                            key_length: length,
                            letters,
                            usable: letters / 2,
                        }
                    }
                    other => other,
                })?;
                Ok(KeyLengthScore { length, score })
            })
            .collect::<Result<Vec<_>>>()?;
        scores.sort_by(|a, b| b.score.total_cmp(&a.score));

        let (candidates, warnings) = self.assess(&scores);
        Ok(KeylengthReport {
            scores,
            candidates,
            warnings,
        })
    }

    /// Heuristic validation of a descending score list
    ///
    /// Splits the scores into a high and a low group by distance to the max
    /// and min, then drops every even length whose half is also in the high
    /// group: multiples of the true length score just as well.
    pub fn assess(
        &self,
        scores: &[KeyLengthScore],
    ) -> (Vec<KeyLengthScore>, Vec<KeylengthWarning>) {
        let mut warnings = Vec::new();
        let (Some(max_score), Some(min_score)) = (
            scores.iter().map(|s| s.score).reduce(f64::max),
            scores.iter().map(|s| s.score).reduce(f64::min),
        ) else {
            return (Vec::new(), warnings);
        };

        let threshold = self.threshold();
        if max_score < threshold {
            let warning = KeylengthWarning::NoLikelyKeyLength {
                max_score,
                threshold,
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
        if min_score > threshold {
            let warning = KeylengthWarning::PossiblyPlaintext {
                min_score,
                threshold,
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }

        let high: Vec<KeyLengthScore> = scores
            .iter()
            .copied()
            .filter(|s| (s.score - max_score).abs() < (s.score - min_score).abs())
            .collect();

        let candidates: Vec<KeyLengthScore> = high
            .iter()
            .copied()
            .filter(|s| s.length % 2 != 0 || !high.iter().any(|h| h.length * 2 == s.length))
            .collect();

        tracing::info!(
            "Key length groups: {} high, {} low, candidates {:?}",
            high.len(),
            scores.len() - high.len(),
            candidates.iter().map(|c| c.length).collect::<Vec<_>>()
        );

        (candidates, warnings)
    }
}
