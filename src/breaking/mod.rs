// Key recovery for classical ciphers
//
// - Caesar: exhaustive search over all 26 shifts
// - Substitution: hill-climbing over permutations with random restarts
// - Vigenère: per-residue Caesar breaking for a known key length
// - Key length: mean index of coincidence over interleaved streams, with a
//   heuristic that discards doubled lengths
//
// Breakers take reduced text and return ranked candidates; none of them
// print. Search progress is logged through `tracing`.

mod caesar;
mod candidate;
mod keylength;
mod substitution;
mod vigenere;

pub use caesar::CaesarBreak;
pub use candidate::{Candidate, CandidatePool};
pub use keylength::{
    KeyLengthScore, KeylengthDetector, KeylengthReport, KeylengthWarning,
    DEFAULT_EXPECTED_PLAINTEXT, DEFAULT_EXPECTED_RANDOM,
};
pub use substitution::{SubstitutionBreak, DEFAULT_PATIENCE};
pub use vigenere::{chunk, interleave, VigenereBreak};
