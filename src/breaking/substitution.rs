use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::candidate::{Candidate, CandidatePool};
use crate::alphabet::ALPHABET_SIZE;
use crate::cipher::SubstitutionKey;
use crate::error::{CrackError, Result};
use crate::score::Scorer;

/// Consecutive non-improving neighbours before a hill-climb stops
pub const DEFAULT_PATIENCE: usize = 1000;

/// Hill-climbing breaker for monoalphabetic substitution
///
/// Each restart starts from a random permutation and keeps swapping two
/// random letters, accepting only strict improvements. The random source is
/// owned by the breaker: a run draws its own seed from it, so a fixed breaker
/// seed reproduces the whole pool, sequential or parallel.
#[derive(Debug)]
pub struct SubstitutionBreak<S> {
    scorer: S,
    rng: StdRng,
    patience: usize,
    candidates: CandidatePool<SubstitutionKey>,
}

impl<S: Scorer> SubstitutionBreak<S> {
    /// Breaker seeded from `seed`, or from OS entropy when `None`
    pub fn new(scorer: S, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            scorer,
            rng,
            patience: DEFAULT_PATIENCE,
            candidates: CandidatePool::new(),
        }
    }

    /// Override the stall budget (at least 1)
    pub fn with_patience(mut self, patience: usize) -> Self {
        self.patience = patience.max(1);
        self
    }

    pub fn patience(&self) -> usize {
        self.patience
    }

    /// Every run so far, best first
    pub fn candidates(&self) -> &CandidatePool<SubstitutionKey> {
        &self.candidates
    }

    /// Run `restarts` independent hill-climbs and pool their results
    pub fn optimise(&mut self, text: &str, restarts: usize) -> Result<()> {
        for run in 0..restarts {
            let seed: u64 = self.rng.gen();
            let (key, score) = hill_climb(&self.scorer, text, seed, self.patience)?;
            self.record(run, text, key, score);
        }
        Ok(())
    }

    /// Decrypt `text` under each of the `n` best pooled keys
    pub fn guess(&self, text: &str, n: usize) -> Result<Vec<Candidate<SubstitutionKey>>> {
        if self.candidates.len() < n {
            return Err(CrackError::InsufficientCandidates {
                requested: n,
                available: self.candidates.len(),
            });
        }

        Ok(self
            .candidates
            .top(n)
            .iter()
            .map(|&(key, score)| Candidate {
                plaintext: key.decipher(text),
                score,
                key,
            })
            .collect())
    }

    fn record(&mut self, run: usize, text: &str, key: SubstitutionKey, score: f64) {
        tracing::debug!(
            "Iteration {}: key = {} | score = {:.4} | plaintext = {}",
            run,
            key,
            score,
            key.decipher(text).chars().take(30).collect::<String>()
        );
        self.candidates.insert(key, score);
    }
}

impl<S: Scorer + Sync> SubstitutionBreak<S> {
    /// Same as [`optimise`](Self::optimise), spread over `threads` workers
    ///
    /// Run seeds are drawn up front in run order and results are pooled in
    /// run order, so the pool matches the sequential one exactly. On error
    /// the runs before the failing one are still pooled and the breaker rng
    /// is left where `optimise` would leave it.
    pub fn optimise_parallel(&mut self, text: &str, restarts: usize, threads: usize) -> Result<()> {
        let threads = threads.max(1);
        let mut seed_rng = self.rng.clone();
        let seeds: Vec<u64> = (0..restarts).map(|_| seed_rng.gen()).collect();
        let chunk_size = restarts.div_ceil(threads).max(1);

        let scorer = &self.scorer;
        let patience = self.patience;

        let outcomes = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = seeds
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move |_| {
                        let mut outcomes = Vec::with_capacity(chunk.len());
                        for &seed in chunk {
                            let outcome = hill_climb(scorer, text, seed, patience);
                            let failed = outcome.is_err();
                            outcomes.push(outcome);
                            if failed {
                                break;
                            }
                        }
                        outcomes
                    })
                })
                .collect();

            handles
                .into_iter()
                .flat_map(|h| {
                    h.join()
                        .unwrap_or_else(|_| vec![Err(CrackError::WorkerPanicked)])
                })
                .collect::<Vec<_>>()
        })
        .map_err(|_| CrackError::WorkerPanicked)?;

        for (run, outcome) in outcomes.into_iter().enumerate() {
            // One draw per run, as in `optimise`
            let _: u64 = self.rng.gen();
            let (key, score) = outcome?;
            self.record(run, text, key, score);
        }
        Ok(())
    }
}

/// One hill-climb from a random key until `patience` consecutive failures
///
/// The neighbour move swaps two uniformly drawn positions; drawing the same
/// position twice is a no-op and counts as a failure.
fn hill_climb<S: Scorer + ?Sized>(
    scorer: &S,
    text: &str,
    seed: u64,
    patience: usize,
) -> Result<(SubstitutionKey, f64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut key = SubstitutionKey::random(&mut rng);
    let mut score = scorer.score(&key.decipher(text))?;

    let mut stall = 0;
    while stall < patience {
        let a = rng.gen_range(0..ALPHABET_SIZE);
        let b = rng.gen_range(0..ALPHABET_SIZE);
        let neighbour = key.swapped(a, b);
        let neighbour_score = scorer.score(&neighbour.decipher(text))?;

        if neighbour_score > score {
            key = neighbour;
            score = neighbour_score;
            stall = 0;
        } else {
            stall += 1;
        }
    }

    Ok((key, score))
}
