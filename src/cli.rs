//! CLI argument parsing for cryptanalysis

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::report::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "cryptanalysis")]
#[command(version)]
#[command(about = "Break classical ciphers with n-gram and index-of-coincidence scoring", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file (flags override its values)
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Enable debug tracing output to stderr
    #[arg(long = "debug", global = true)]
    pub debug: bool,

    /// Log summaries and warnings at info level
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Try all 26 shifts and rank them
    Caesar {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Number of candidates to print
        #[arg(short = 'n', long = "candidates", value_name = "N")]
        candidates: Option<usize>,
    },

    /// Solve a Vigenère cipher of known key length
    Vigenere {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Key length (see the `keylength` command)
        #[arg(short = 'k', long = "key-length", value_name = "L")]
        key_length: usize,
    },

    /// Hill-climb a monoalphabetic substitution key
    Substitution {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        model: ModelArgs,

        /// Independent random restarts
        #[arg(short = 'r', long = "restarts", value_name = "R")]
        restarts: Option<usize>,

        /// Seed for reproducible runs
        #[arg(short = 's', long = "seed", value_name = "SEED")]
        seed: Option<u64>,

        /// Worker threads for the restarts
        #[arg(short = 't', long = "threads", value_name = "T")]
        threads: Option<usize>,

        /// Number of candidates to print
        #[arg(short = 'n', long = "candidates", value_name = "N")]
        candidates: Option<usize>,
    },

    /// Estimate the key length of a periodic cipher
    Keylength {
        #[command(flatten)]
        input: InputArgs,

        /// Smallest key length tested
        #[arg(long = "min", value_name = "A")]
        min: Option<usize>,

        /// Largest key length tested
        #[arg(long = "max", value_name = "B")]
        max: Option<usize>,
    },

    /// Print the n-gram and IoC scores of the input
    Score {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        model: ModelArgs,
    },
}

/// Where the ciphertext comes from
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Ciphertext (reads --input, or stdin, when omitted)
    #[arg(value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Read the ciphertext from a file
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    pub input: Option<PathBuf>,
}

/// Which language model backs the n-gram scorer
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// N-gram table file ("NGRAM COUNT" per line)
    #[arg(long = "ngrams", value_name = "FILE", conflicts_with = "corpus")]
    pub ngrams: Option<PathBuf>,

    /// Plain text corpus to count n-grams from
    #[arg(long = "corpus", value_name = "FILE")]
    pub corpus: Option<PathBuf>,

    /// N-gram order: counted from --corpus, or picks the bundled English
    /// table (1 to 4); defaults per command
    #[arg(long = "order", value_name = "N", conflicts_with = "ngrams")]
    pub order: Option<usize>,
}

impl Command {
    pub fn input(&self) -> &InputArgs {
        match self {
            Self::Caesar { input, .. }
            | Self::Vigenere { input, .. }
            | Self::Substitution { input, .. }
            | Self::Keylength { input, .. }
            | Self::Score { input, .. } => input,
        }
    }

    /// N-gram order used when `--order` is not given
    ///
    /// Substitution needs quadgrams to converge; Vigenère scores single
    /// sub-streams, so only letter frequencies make sense there.
    pub fn default_order(&self) -> usize {
        match self {
            Self::Caesar { .. } => 3,
            Self::Substitution { .. } => 4,
            Self::Vigenere { .. } | Self::Keylength { .. } | Self::Score { .. } => 1,
        }
    }

    /// Model arguments; `keylength` scores with IoC only
    pub fn model(&self) -> Option<&ModelArgs> {
        match self {
            Self::Caesar { model, .. }
            | Self::Vigenere { model, .. }
            | Self::Substitution { model, .. }
            | Self::Score { model, .. } => Some(model),
            Self::Keylength { .. } => None,
        }
    }
}
