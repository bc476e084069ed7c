//! Rendering of breaker results as text tables or JSON

use std::fmt;

use clap::ValueEnum;
use serde::Serialize;

use crate::breaking::{Candidate, KeylengthReport};
use crate::cipher::SubstitutionKey;
use crate::error::Result;

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables (default)
    #[default]
    Text,
    /// JSON for machine parsing
    Json,
}

/// Scores of a text under both scorers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreReport {
    /// Letters in the reduced text
    pub length: usize,
    pub ngram_order: usize,
    pub ngram_score: f64,
    /// Absent for texts too short to have an index of coincidence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ioc: Option<f64>,
}

/// Result of one command, tagged by cipher
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "cipher", rename_all = "snake_case")]
pub enum Report {
    Caesar {
        candidates: Vec<Candidate<char>>,
    },
    Vigenere {
        key_length: usize,
        candidate: Candidate<String>,
    },
    Substitution {
        restarts: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
        candidates: Vec<Candidate<SubstitutionKey>>,
    },
    Keylength(KeylengthReport),
    Score(ScoreReport),
}

impl Report {
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Text => Ok(self.to_text()),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Caesar { candidates } => candidate_table(f, "Caesar", candidates),
            Self::Vigenere {
                key_length,
                candidate,
            } => candidate_table(
                f,
                &format!("Vigenère (key length {})", key_length),
                std::slice::from_ref(candidate),
            ),
            Self::Substitution {
                restarts,
                candidates,
                ..
            } => candidate_table(
                f,
                &format!("Substitution ({} restarts)", restarts),
                candidates,
            ),
            Self::Keylength(report) => keylength_table(f, report),
            Self::Score(report) => score_lines(f, report),
        }
    }
}

/// `rank | score | key | plaintext` table
fn candidate_table<K: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    candidates: &[Candidate<K>],
) -> fmt::Result {
    writeln!(f, "=== {} candidates ===", title)?;
    writeln!(f, "{:>4} | {:>12} | {:<26} | plaintext", "rank", "score", "key")?;
    for (rank, candidate) in candidates.iter().enumerate() {
        writeln!(
            f,
            "{:>4} | {:>12.4} | {:<26} | {}",
            rank + 1,
            candidate.score,
            candidate.key.to_string(),
            candidate.plaintext
        )?;
    }
    Ok(())
}

fn keylength_table(f: &mut fmt::Formatter<'_>, report: &KeylengthReport) -> fmt::Result {
    writeln!(f, "=== Key length scores ===")?;
    writeln!(f, "{:>6} | {:>8}", "length", "score")?;
    for score in &report.scores {
        writeln!(f, "{:>6} | {:>8.4}", score.length, score.score)?;
    }

    let lengths: Vec<String> = report
        .candidates
        .iter()
        .map(|c| c.length.to_string())
        .collect();
    writeln!(f)?;
    writeln!(f, "Candidates: {}", lengths.join(", "))?;
    if let Some(best) = report.best() {
        writeln!(f, "Most likely key length: {}", best)?;
    }
    for warning in &report.warnings {
        writeln!(f, "Warning: {}", warning)?;
    }
    Ok(())
}

fn score_lines(f: &mut fmt::Formatter<'_>, report: &ScoreReport) -> fmt::Result {
    writeln!(f, "Letters: {}", report.length)?;
    writeln!(
        f,
        "{}-gram log-likelihood: {:.4}",
        report.ngram_order, report.ngram_score
    )?;
    match report.ioc {
        Some(ioc) => writeln!(f, "Index of coincidence: {:.6}", ioc),
        None => writeln!(f, "Index of coincidence: n/a (text too short)"),
    }
}
