//! Classical cipher transforms over the uppercase alphabet
//!
//! All transforms are length preserving. Characters outside `A-Z` are copied
//! through unchanged, so reduced text and already-masked text behave the same.

use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alphabet::{index_of, ALPHABET, ALPHABET_SIZE};
use crate::error::{CrackError, Result};

/// Caesar shift cipher
pub mod caesar {
    use crate::alphabet::{shift_letter, unshift_letter};

    /// Shift every letter forward by `shift`
    pub fn encipher(text: &str, shift: usize) -> String {
        text.chars().map(|c| shift_letter(c, shift)).collect()
    }

    /// Shift every letter backward by `shift`
    pub fn decipher(text: &str, shift: usize) -> String {
        text.chars().map(|c| unshift_letter(c, shift)).collect()
    }
}

/// Vigenère polyalphabetic shift cipher
///
/// Key letters are shifts (`A` = 0). The key position advances on every
/// character of the text, letter or not, matching the reduced-text model
/// where only letters are present.
pub mod vigenere {
    use crate::alphabet::{index_of, shift_letter, unshift_letter};
    use crate::error::{CrackError, Result};

    fn key_shifts(key: &str) -> Result<Vec<usize>> {
        if key.is_empty() {
            return Err(CrackError::InvalidKey("Vigenere key is empty".to_string()));
        }
        key.chars()
            .map(|c| {
                index_of(c.to_ascii_uppercase()).ok_or_else(|| {
                    CrackError::InvalidKey(format!("Vigenere key contains non-letter {:?}", c))
                })
            })
            .collect()
    }

    pub fn encipher(text: &str, key: &str) -> Result<String> {
        let shifts = key_shifts(key)?;
        Ok(text
            .chars()
            .zip(shifts.iter().cycle())
            .map(|(c, &s)| shift_letter(c, s))
            .collect())
    }

    pub fn decipher(text: &str, key: &str) -> Result<String> {
        let shifts = key_shifts(key)?;
        Ok(text
            .chars()
            .zip(shifts.iter().cycle())
            .map(|(c, &s)| unshift_letter(c, s))
            .collect())
    }
}

/// Monoalphabetic substitution key
///
/// Position `i` holds the ciphertext letter that plaintext letter `i`
/// encrypts to. Always a permutation of the alphabet.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubstitutionKey {
    mapping: [u8; ALPHABET_SIZE],
}

impl SubstitutionKey {
    /// Key that maps every letter to itself
    pub fn identity() -> Self {
        Self { mapping: ALPHABET }
    }

    /// Uniformly random permutation of the alphabet
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut mapping = ALPHABET;
        mapping.shuffle(rng);
        Self { mapping }
    }

    /// Exchange the cipher letters assigned to positions `a` and `b`
    pub fn swap(&mut self, a: usize, b: usize) {
        self.mapping.swap(a, b);
    }

    /// Copy of this key with positions `a` and `b` exchanged
    pub fn swapped(&self, a: usize, b: usize) -> Self {
        let mut key = *self;
        key.swap(a, b);
        key
    }

    /// Ciphertext letter for a plaintext letter index
    pub fn cipher_letter(&self, plain_index: usize) -> char {
        self.mapping[plain_index] as char
    }

    pub fn encipher(&self, text: &str) -> String {
        text.chars()
            .map(|c| match index_of(c) {
                Some(i) => self.mapping[i] as char,
                None => c,
            })
            .collect()
    }

    pub fn decipher(&self, text: &str) -> String {
        let inverse = self.inverse();
        text.chars()
            .map(|c| match index_of(c) {
                Some(i) => inverse[i] as char,
                None => c,
            })
            .collect()
    }

    fn inverse(&self) -> [u8; ALPHABET_SIZE] {
        let mut inverse = [0u8; ALPHABET_SIZE];
        for (plain, &cipher) in self.mapping.iter().enumerate() {
            inverse[(cipher - b'A') as usize] = ALPHABET[plain];
        }
        inverse
    }
}

impl Default for SubstitutionKey {
    fn default() -> Self {
        Self::identity()
    }
}

impl FromStr for SubstitutionKey {
    type Err = CrackError;

    /// Parse 26 distinct letters (case-insensitive)
    fn from_str(s: &str) -> Result<Self> {
        let letters: Vec<char> = s.chars().map(|c| c.to_ascii_uppercase()).collect();
        if letters.len() != ALPHABET_SIZE {
            return Err(CrackError::InvalidKey(format!(
                "substitution key must have {} letters, got {}",
                ALPHABET_SIZE,
                letters.len()
            )));
        }

        let mut mapping = [0u8; ALPHABET_SIZE];
        let mut seen = [false; ALPHABET_SIZE];
        for (slot, c) in mapping.iter_mut().zip(letters) {
            let idx = index_of(c).ok_or_else(|| {
                CrackError::InvalidKey(format!("substitution key contains non-letter {:?}", c))
            })?;
            if seen[idx] {
                return Err(CrackError::InvalidKey(format!(
                    "substitution key repeats letter {}",
                    c
                )));
            }
            seen[idx] = true;
            *slot = c as u8;
        }

        Ok(Self { mapping })
    }
}

impl fmt::Display for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in &self.mapping {
            write!(f, "{}", b as char)?;
        }
        Ok(())
    }
}

impl fmt::Debug for SubstitutionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubstitutionKey({})", self)
    }
}

impl Serialize for SubstitutionKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SubstitutionKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_caesar_known_shift() {
        // "Hello World" with key 14, letters only
        assert_eq!(caesar::encipher("HELLOWORLD", 14), "VSZZCKCFZR");
        assert_eq!(caesar::decipher("VSZZCKCFZR", 14), "HELLOWORLD");
    }

    #[test]
    fn test_caesar_keeps_non_letters() {
        assert_eq!(caesar::encipher("AB, C!", 1), "BC, D!");
    }

    #[test]
    fn test_vigenere_known_key() {
        let ciphertext = vigenere::encipher("ATTACKATDAWN", "LEMON").unwrap();
        assert_eq!(ciphertext, "LXFOPVEFRNHR");
        assert_eq!(
            vigenere::decipher(&ciphertext, "lemon").unwrap(),
            "ATTACKATDAWN"
        );
    }

    #[test]
    fn test_vigenere_rejects_bad_keys() {
        assert!(matches!(
            vigenere::encipher("ABC", ""),
            Err(CrackError::InvalidKey(_))
        ));
        assert!(matches!(
            vigenere::decipher("ABC", "K3Y"),
            Err(CrackError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_substitution_parse_and_display() {
        let key: SubstitutionKey = "lcndthewzsarxvojbpfuiqmkgy".parse().unwrap();
        assert_eq!(key.to_string(), "LCNDTHEWZSARXVOJBPFUIQMKGY");
        assert_eq!(key.cipher_letter(0), 'L');
    }

    #[test]
    fn test_substitution_rejects_non_permutations() {
        assert!("ABC".parse::<SubstitutionKey>().is_err());
        assert!("AACDEFGHIJKLMNOPQRSTUVWXYZ"
            .parse::<SubstitutionKey>()
            .is_err());
        assert!("ABCDEFGHIJKLMNOPQRSTUVWXY1"
            .parse::<SubstitutionKey>()
            .is_err());
    }

    #[test]
    fn test_substitution_decipher_inverts_encipher() {
        let key: SubstitutionKey = "LCNDTHEWZSARXVOJBPFUIQMKGY".parse().unwrap();
        let plaintext = "THEQUICKBROWNFOXJUMPSOVERTHELAZYDOG";
        let ciphertext = key.encipher(plaintext);
        assert_ne!(ciphertext, plaintext);
        assert_eq!(key.decipher(&ciphertext), plaintext);
    }

    #[test]
    fn test_identity_is_noop() {
        let key = SubstitutionKey::identity();
        assert_eq!(key.encipher("SECRET"), "SECRET");
        assert_eq!(key.decipher("SECRET"), "SECRET");
    }

    #[test]
    fn test_random_key_is_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let key = SubstitutionKey::random(&mut rng);
        let parsed: SubstitutionKey = key.to_string().parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_self_swap_is_noop() {
        let key = SubstitutionKey::identity();
        assert_eq!(key.swapped(4, 4), key);
        assert_ne!(key.swapped(0, 1), key);
    }

    #[test]
    fn test_serde_as_string() {
        let key: SubstitutionKey = "LCNDTHEWZSARXVOJBPFUIQMKGY".parse().unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, "\"LCNDTHEWZSARXVOJBPFUIQMKGY\"");
        let back: SubstitutionKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }
}
