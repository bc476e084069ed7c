use serde::{Deserialize, Serialize};

/// One ranked decryption attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate<K> {
    pub plaintext: String,
    pub score: f64,
    pub key: K,
}

/// Keys and scores sorted descending by score
///
/// Insertion re-sorts with a stable sort, so equal scores keep the order
/// they were inserted in. The pool only grows.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePool<K> {
    entries: Vec<(K, f64)>,
}

impl<K> CandidatePool<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Append then restore descending score order
    pub fn insert(&mut self, key: K, score: f64) {
        self.entries.push((key, score));
        self.entries.sort_by(|a, b| b.1.total_cmp(&a.1));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest-scoring entry
    pub fn best(&self) -> Option<&(K, f64)> {
        self.entries.first()
    }

    /// Up to `n` highest-scoring entries
    pub fn top(&self, n: usize) -> &[(K, f64)] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, f64)> {
        self.entries.iter()
    }
}

impl<K> Default for CandidatePool<K> {
    fn default() -> Self {
        Self::new()
    }
}
