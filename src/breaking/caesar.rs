use super::candidate::Candidate;
use crate::alphabet::{letter_at, ALPHABET_SIZE};
use crate::cipher::caesar;
use crate::error::Result;
use crate::score::Scorer;

/// Exhaustive Caesar breaker: tries all 26 shifts
#[derive(Debug, Clone)]
pub struct CaesarBreak<S> {
    scorer: S,
}

impl<S: Scorer> CaesarBreak<S> {
    pub fn new(scorer: S) -> Self {
        Self { scorer }
    }

    pub fn scorer(&self) -> &S {
        &self.scorer
    }

    /// Every `(shift, score)` pair, best first
    ///
    /// Equal scores stay in ascending shift order.
    pub fn scores(&self, text: &str) -> Result<Vec<(usize, f64)>> {
        let mut scores = (0..ALPHABET_SIZE)
            .map(|shift| Ok((shift, self.scorer.score(&caesar::decipher(text, shift))?)))
            .collect::<Result<Vec<_>>>()?;
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(scores)
    }

    /// Top `(shift, score)` pair
    pub fn best(&self, text: &str) -> Result<(usize, f64)> {
        let scores = self.scores(text)?;
        // Always 26 entries
        Ok(scores[0])
    }

    /// Top `n` decryptions with the key rendered as its letter
    pub fn guess(&self, text: &str, n: usize) -> Result<Vec<Candidate<char>>> {
        Ok(self
            .scores(text)?
            .into_iter()
            .take(n)
            .map(|(shift, score)| Candidate {
                plaintext: caesar::decipher(text, shift),
                score,
                key: letter_at(shift),
            })
            .collect())
    }

    /// Most likely decryption
    pub fn best_guess(&self, text: &str) -> Result<String> {
        let (shift, _) = self.best(text)?;
        Ok(caesar::decipher(text, shift))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::FrequencyTable;
    use crate::score::{IocScorer, NgramScorer};
    use std::io::Cursor;

    fn monogram_scorer() -> NgramScorer {
        let table =
            FrequencyTable::parse(Cursor::new(include_str!("../../data/en/monograms.txt")))
                .unwrap();
        NgramScorer::new(&table).unwrap()
    }

    #[test]
    fn test_recovers_shift_14() {
        let plaintext = "HELLOWORLDHOWAREYOUDOINGRIGHTNOW";
        let ciphertext = caesar::encipher(plaintext, 14);

        let breaker = CaesarBreak::new(monogram_scorer());
        assert_eq!(breaker.best(&ciphertext).unwrap().0, 14);
        assert_eq!(breaker.best_guess(&ciphertext).unwrap(), plaintext);
    }

    #[test]
    fn test_guess_renders_key_letter() {
        let ciphertext = caesar::encipher("HELLOWORLDHOWAREYOUDOINGRIGHTNOW", 14);
        let guesses = CaesarBreak::new(monogram_scorer())
            .guess(&ciphertext, 3)
            .unwrap();

        assert_eq!(guesses.len(), 3);
        assert_eq!(guesses[0].key, 'O');
        assert!(guesses[0].score >= guesses[1].score);
        assert!(guesses[1].score >= guesses[2].score);
    }

    #[test]
    fn test_scores_cover_every_shift() {
        let scores = CaesarBreak::new(monogram_scorer())
            .scores("ATTACKATDAWN")
            .unwrap();
        let mut shifts: Vec<usize> = scores.iter().map(|(k, _)| *k).collect();
        shifts.sort_unstable();
        assert_eq!(shifts, (0..26).collect::<Vec<_>>());
    }

    #[test]
    fn test_ties_break_by_ascending_shift() {
        // IoC is shift invariant: every shift scores the same
        let scores = CaesarBreak::new(IocScorer::default())
            .scores("ATTACKATDAWN")
            .unwrap();
        let shifts: Vec<usize> = scores.iter().map(|(k, _)| *k).collect();
        assert_eq!(shifts, (0..26).collect::<Vec<_>>());
    }

    #[test]
    fn test_guess_clamps_to_alphabet() {
        let guesses = CaesarBreak::new(monogram_scorer())
            .guess("ABC", 100)
            .unwrap();
        assert_eq!(guesses.len(), 26);
    }

    #[test]
    fn test_scorer_error_propagates() {
        let breaker = CaesarBreak::new(IocScorer::default());
        assert!(breaker.scores("A").is_err());
    }
}
