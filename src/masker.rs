//! Reduce text to its alphabet characters and restore it afterwards
//!
//! Breakers only ever see reduced text: uppercase letters, nothing else.
//! A [`Masker`] remembers where the stripped characters were and which
//! letters were lowercase, so a recovered plaintext can be shown in the
//! shape of the original ciphertext.

use regex::Regex;

use crate::error::{CrackError, Result};

/// Default alphabet: ASCII letters of either case
pub const DEFAULT_ALPHABET: &str = "[a-zA-Z]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Letter { lowercase: bool },
    Other(char),
}

/// Records the layout of a text around its alphabet characters
#[derive(Debug, Clone)]
pub struct Masker {
    slots: Vec<Slot>,
    reduced: String,
}

impl Masker {
    /// Masker over the default ASCII alphabet
    pub fn new(text: &str) -> Result<Self> {
        Self::with_alphabet(text, DEFAULT_ALPHABET)
    }

    /// Masker whose alphabet is every character matching `pattern`
    pub fn with_alphabet(text: &str, pattern: &str) -> Result<Self> {
        let alphabet = Regex::new(&format!("^(?:{})$", pattern))?;

        let mut slots = Vec::with_capacity(text.len());
        let mut reduced = String::with_capacity(text.len());
        let mut buf = [0u8; 4];

        for c in text.chars() {
            if alphabet.is_match(c.encode_utf8(&mut buf)) {
                slots.push(Slot::Letter {
                    lowercase: c.is_lowercase(),
                });
                reduced.push(c.to_uppercase().next().unwrap_or(c));
            } else {
                slots.push(Slot::Other(c));
            }
        }

        Ok(Self { slots, reduced })
    }

    /// Reduce `text` and keep the masker for extending results
    pub fn from_text(text: &str) -> Result<(String, Self)> {
        let masker = Self::new(text)?;
        Ok((masker.reduce().to_string(), masker))
    }

    /// The alphabet-only, uppercase form of the original text
    pub fn reduce(&self) -> &str {
        &self.reduced
    }

    /// Number of alphabet positions in the original text
    pub fn alphabet_len(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| matches!(s, Slot::Letter { .. }))
            .count()
    }

    /// Re-insert stripped characters and original letter case into `reduced`
    pub fn extend(&self, reduced: &str) -> Result<String> {
        let expected = self.alphabet_len();
        let actual = reduced.chars().count();
        if actual != expected {
            return Err(CrackError::LengthMismatch { expected, actual });
        }

        let mut letters = reduced.chars();
        let mut result = String::with_capacity(self.slots.len());
        for slot in &self.slots {
            match *slot {
                Slot::Letter { lowercase } => {
                    // Lengths were checked above
                    let Some(c) = letters.next() else { break };
                    if lowercase {
                        result.push(c.to_lowercase().next().unwrap_or(c));
                    } else {
                        result.push(c);
                    }
                }
                Slot::Other(c) => result.push(c),
            }
        }
        Ok(result)
    }
}
