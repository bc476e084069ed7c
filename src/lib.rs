//! Cryptanalysis - statistical breaking of classical ciphers
//!
//! This library scores texts with n-gram language models and the index of
//! coincidence, and uses those scores to recover Caesar, Vigenère and
//! monoalphabetic substitution keys from ciphertext alone.
//!
//! Breakers work on reduced text (uppercase letters only); a
//! [`masker::Masker`] strips a raw ciphertext down and restores punctuation
//! and case afterwards.

pub mod alphabet;
pub mod breaking;
pub mod cipher;
pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod masker;
pub mod report;
pub mod score;

pub use error::{CrackError, Result};
