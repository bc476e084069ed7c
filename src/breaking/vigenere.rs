use super::caesar::CaesarBreak;
use super::candidate::Candidate;
use crate::alphabet::letter_at;
use crate::cipher::caesar;
use crate::error::{CrackError, Result};
use crate::score::Scorer;

/// Split `text` into `n` interleaved sub-streams
///
/// Character `i` goes to stream `i % n`; order within a stream is kept.
/// `n` must be at least 1.
pub fn chunk(text: &str, n: usize) -> Vec<String> {
    let mut chunks = vec![String::new(); n];
    if n == 0 {
        return chunks;
    }
    for (i, c) in text.chars().enumerate() {
        chunks[i % n].push(c);
    }
    chunks
}

/// Inverse of [`chunk`]: take one character from each stream in turn
pub fn interleave<T: AsRef<str>>(chunks: &[T]) -> String {
    let mut streams: Vec<_> = chunks.iter().map(|c| c.as_ref().chars()).collect();
    let capacity = chunks.iter().map(|c| c.as_ref().len()).sum();
    let mut result = String::with_capacity(capacity);

    loop {
        let mut pushed = false;
        for stream in &mut streams {
            if let Some(c) = stream.next() {
                result.push(c);
                pushed = true;
            }
        }
        if !pushed {
            break;
        }
    }
    result
}

/// Vigenère breaker for a known key length
///
/// Each residue class of the ciphertext is a plain Caesar cipher, solved on
/// its own. The scorer sees one sub-stream at a time, so a monogram model is
/// the natural choice; higher-order models would score n-grams across the
/// key-length gaps. The key length is trusted, not verified: a wrong length
/// gives a low-scoring, wrong plaintext.
#[derive(Debug, Clone)]
pub struct VigenereBreak<S> {
    key_length: usize,
    caesar: CaesarBreak<S>,
}

impl<S: Scorer> VigenereBreak<S> {
    pub fn new(key_length: usize, scorer: S) -> Result<Self> {
        if key_length == 0 {
            return Err(CrackError::InvalidKeyLength(key_length));
        }
        Ok(Self {
            key_length,
            caesar: CaesarBreak::new(scorer),
        })
    }

    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Sub-streams for this breaker's key length
    pub fn chunk(&self, text: &str) -> Vec<String> {
        chunk(text, self.key_length)
    }

    /// Best decryption, its score and the recovered key word
    pub fn guess(&self, text: &str) -> Result<Candidate<String>> {
        let mut plain_chunks = Vec::with_capacity(self.key_length);
        let mut key = String::with_capacity(self.key_length);

        for (offset, stream) in self.chunk(text).iter().enumerate() {
            let (shift, score) = self.caesar.best(stream)?;
            tracing::debug!(
                "Sub-stream {} ({} chars): shift {} ({}) score {:.4}",
                offset,
                stream.len(),
                shift,
                letter_at(shift),
                score
            );
            plain_chunks.push(caesar::decipher(stream, shift));
            key.push(letter_at(shift));
        }

        let plaintext = interleave(&plain_chunks);
        let score = self.caesar.scorer().score(&plaintext)?;
        Ok(Candidate {
            plaintext,
            score,
            key,
        })
    }
}
