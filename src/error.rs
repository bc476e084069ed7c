//! Error types for the cryptanalysis library
//!
//! Every variant is a caller-side precondition violation. Statistical
//! non-convergence (a wrong local optimum, a misranked key length) is never
//! reported here; it shows up in scores and warnings instead.

use thiserror::Error;

/// Errors produced by scorers, breakers and their collaborators
#[derive(Error, Debug)]
pub enum CrackError {
    #[error("Inconsistent n-gram length: expected {expected}, got {found} for {ngram:?}")]
    InconsistentNgramLength {
        expected: usize,
        found: usize,
        ngram: String,
    },

    #[error("Frequency table is empty")]
    EmptyFrequencyTable,

    #[error("Malformed frequency table at line {line}: {content:?}")]
    MalformedTable { line: usize, content: String },

    #[error("Insufficient candidates: requested {requested}, only {available} available")]
    InsufficientCandidates { requested: usize, available: usize },

    #[error(
        "Invalid threshold: expected plaintext score {plaintext} must exceed expected random score {random}"
    )]
    InvalidThreshold { plaintext: f64, random: f64 },

    #[error("Invalid key length: {0} (must be >= 1)")]
    InvalidKeyLength(usize),

    #[error("Invalid key length range: [{min}, {max}]")]
    InvalidKeyLengthRange { min: usize, max: usize },

    #[error("Text too short: {length} characters, need at least {minimum}")]
    TextTooShort { length: usize, minimum: usize },

    #[error(
        "Key length {key_length} too long for {letters} letters: every stream needs two, so use at most {usable}"
    )]
    KeyLengthTooLong {
        key_length: usize,
        letters: usize,
        usable: usize,
    },

    #[error("Length mismatch: expected {expected} characters, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Invalid key: {0}")]
    InvalidKey(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid alphabet pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Worker thread panicked during optimisation")]
    WorkerPanicked,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for cryptanalysis operations
pub type Result<T> = std::result::Result<T, CrackError>;
