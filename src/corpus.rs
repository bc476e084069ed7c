//! N-gram frequency tables
//!
//! A table maps every n-gram of one fixed length to the number of times it
//! was observed. Tables come from `<ngram> <count>` files or are counted
//! directly from a training corpus.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{CrackError, Result};

/// English n-gram counts shipped with the crate, indexed by order - 1
const ENGLISH: [&str; 4] = [
    include_str!("../data/en/monograms.txt"),
    include_str!("../data/en/bigrams.txt"),
    include_str!("../data/en/trigrams.txt"),
    include_str!("../data/en/quadgrams.txt"),
];

/// Largest n-gram order with a bundled English table
pub const MAX_ENGLISH_ORDER: usize = ENGLISH.len();

/// Immutable mapping from n-gram to occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    n: usize,
    total: u64,
}

impl FrequencyTable {
    /// Validate and wrap a count mapping
    ///
    /// Fails if the mapping is empty or its keys differ in length.
    pub fn new(counts: HashMap<String, u64>) -> Result<Self> {
        let mut keys = counts.keys();
        let n = match keys.next() {
            Some(first) => first.chars().count(),
            None => return Err(CrackError::EmptyFrequencyTable),
        };

        if let Some(bad) = keys.find(|k| k.chars().count() != n) {
            return Err(CrackError::InconsistentNgramLength {
                expected: n,
                found: bad.chars().count(),
                ngram: bad.clone(),
            });
        }

        let total = counts.values().sum();
        Ok(Self { counts, n, total })
    }

    /// Parse whitespace-separated `<ngram> <count>` records, one per line
    ///
    /// Blank lines are skipped. Repeated n-grams accumulate.
    pub fn parse<R: BufRead>(reader: R) -> Result<Self> {
        let mut counts: HashMap<String, u64> = HashMap::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let mut fields = line.split_whitespace();
            let (ngram, count) = match (fields.next(), fields.next(), fields.next()) {
                (None, _, _) => continue,
                (Some(ngram), Some(count), None) => (ngram, count),
                _ => {
                    return Err(CrackError::MalformedTable {
                        line: idx + 1,
                        content: line.clone(),
                    })
                }
            };

            let count: u64 = count.parse().map_err(|_| CrackError::MalformedTable {
                line: idx + 1,
                content: line.clone(),
            })?;
            *counts.entry(ngram.to_string()).or_insert(0) += count;
        }

        Self::new(counts)
    }

    /// Load a table file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::parse(BufReader::new(file))
    }

    /// Bundled English table of order `n` (1 to [`MAX_ENGLISH_ORDER`])
    pub fn english(n: usize) -> Result<Self> {
        match n.checked_sub(1).and_then(|i| ENGLISH.get(i)) {
            Some(source) => Self::parse(source.as_bytes()),
            None => Err(CrackError::InvalidConfig(format!(
                "no bundled English table of order {}, expected 1 to {}",
                n, MAX_ENGLISH_ORDER
            ))),
        }
    }

    /// Count every `n`-letter window of a training corpus
    ///
    /// Only ASCII letters are kept, uppercased, so windows run across word
    /// boundaries exactly as they do in reduced ciphertext.
    pub fn from_corpus(text: &str, n: usize) -> Result<Self> {
        if n == 0 {
            return Err(CrackError::InvalidConfig(
                "n-gram order must be >= 1".to_string(),
            ));
        }

        let letters: Vec<char> = text
            .chars()
            .filter(char::is_ascii_alphabetic)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        let mut counts: HashMap<String, u64> = HashMap::new();
        for window in letters.windows(n) {
            *counts.entry(window.iter().collect()).or_insert(0) += 1;
        }

        Self::new(counts)
    }

    /// Length shared by every n-gram in the table
    pub fn n(&self) -> usize {
        self.n
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct n-grams
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false: construction rejects empty tables
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn get(&self, ngram: &str) -> Option<u64> {
        self.counts.get(ngram).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_basic() {
        let table = FrequencyTable::parse(Cursor::new("TH 10\nHE 6\n\nIN 4\n")).unwrap();
        assert_eq!(table.n(), 2);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total(), 20);
        assert_eq!(table.get("HE"), Some(6));
        assert_eq!(table.get("QZ"), None);
    }

    #[test]
    fn test_parse_inconsistent_lengths() {
        let err = FrequencyTable::parse(Cursor::new("TH 10\nTHE 6\n")).unwrap_err();
        assert!(matches!(err, CrackError::InconsistentNgramLength { .. }));
    }

    #[test]
    fn test_parse_malformed_line_reports_line_number() {
        let err = FrequencyTable::parse(Cursor::new("TH 10\nHE six\n")).unwrap_err();
        match err {
            CrackError::MalformedTable { line, content } => {
                assert_eq!(line, 2);
                assert_eq!(content, "HE six");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = FrequencyTable::parse(Cursor::new("TH 10 3\n")).unwrap_err();
        assert!(matches!(err, CrackError::MalformedTable { line: 1, .. }));
    }

    #[test]
    fn test_english_tables() {
        for n in 1..=MAX_ENGLISH_ORDER {
            let table = FrequencyTable::english(n).unwrap();
            assert_eq!(table.n(), n);
            assert!(table.iter().all(|(ngram, _)| ngram.bytes().all(|b| b.is_ascii_uppercase())));
        }

        let quadgrams = FrequencyTable::english(4).unwrap();
        assert!(quadgrams.get("TION").unwrap() > quadgrams.get("QZXJ").unwrap_or(0));
        assert!(quadgrams.len() > 10_000);
    }

    #[test]
    fn test_english_order_out_of_range() {
        assert!(matches!(
            FrequencyTable::english(0),
            Err(CrackError::InvalidConfig(_))
        ));
        assert!(FrequencyTable::english(MAX_ENGLISH_ORDER + 1).is_err());
    }

    #[test]
    fn test_parse_empty() {
        let err = FrequencyTable::parse(Cursor::new("\n\n")).unwrap_err();
        assert!(matches!(err, CrackError::EmptyFrequencyTable));
    }

    #[test]
    fn test_duplicate_records_accumulate() {
        let table = FrequencyTable::parse(Cursor::new("A 1\nA 2\n")).unwrap();
        assert_eq!(table.get("A"), Some(3));
    }

    #[test]
    fn test_from_corpus_counts_windows() {
        let table = FrequencyTable::from_corpus("The the, THE!", 3).unwrap();
        // THETHETHE -> THE x3, HET x2, ETH x2
        assert_eq!(table.get("THE"), Some(3));
        assert_eq!(table.get("HET"), Some(2));
        assert_eq!(table.get("ETH"), Some(2));
        assert_eq!(table.total(), 7);
    }

    #[test]
    fn test_from_corpus_rejects_zero_order() {
        assert!(matches!(
            FrequencyTable::from_corpus("abc", 0),
            Err(CrackError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_corpus_too_short() {
        assert!(matches!(
            FrequencyTable::from_corpus("ab", 3),
            Err(CrackError::EmptyFrequencyTable)
        ));
    }
}
