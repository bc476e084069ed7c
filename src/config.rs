// Tunable parameters for the breakers
//
// Every section has serde defaults, so a TOML file only needs the keys it
// changes. Command-line flags are applied on top by the binary.

use std::cmp::Ordering;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::breaking::{DEFAULT_EXPECTED_PLAINTEXT, DEFAULT_EXPECTED_RANDOM, DEFAULT_PATIENCE};
use crate::error::{CrackError, Result};
use crate::score::DEFAULT_ALPHA;

/// Complete configuration, one section per breaker
///
/// # Example
/// ```
/// use cryptanalysis::config::CrackConfig;
///
/// let config = CrackConfig::from_toml_str("[substitution]\nrestarts = 20\n").unwrap();
/// assert_eq!(config.substitution.restarts, 20);
/// assert_eq!(config.keylength.max_length, 20);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrackConfig {
    pub ngram: NgramConfig,
    pub substitution: SubstitutionConfig,
    pub caesar: CaesarConfig,
    pub keylength: KeylengthConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NgramConfig {
    /// Pseudo-count for n-grams missing from the table
    ///
    /// Default: 0.01
    pub alpha: f64,
}

impl Default for NgramConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SubstitutionConfig {
    /// Independent hill-climbs per invocation
    pub restarts: usize,
    /// Breaker seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
    /// Consecutive failed swaps before a climb stops
    pub patience: usize,
    /// Worker threads (1 runs on the calling thread)
    pub threads: usize,
    /// Candidates to report, at most one per restart
    pub candidates: usize,
}

impl Default for SubstitutionConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            seed: None,
            patience: DEFAULT_PATIENCE,
            threads: 1,
            candidates: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaesarConfig {
    pub candidates: usize,
}

impl Default for CaesarConfig {
    fn default() -> Self {
        Self { candidates: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KeylengthConfig {
    pub min_length: usize,
    pub max_length: usize,
    /// Mean IoC expected at the true key length
    pub expected_plaintext: f64,
    /// Mean IoC expected at a wrong key length
    pub expected_random: f64,
}

impl Default for KeylengthConfig {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 20,
            expected_plaintext: DEFAULT_EXPECTED_PLAINTEXT,
            expected_random: DEFAULT_EXPECTED_RANDOM,
        }
    }
}

impl CrackConfig {
    /// More restarts and a longer stall budget, for hard substitution texts
    pub fn thorough() -> Self {
        Self {
            substitution: SubstitutionConfig {
                restarts: 50,
                patience: 5000,
                candidates: 5,
                ..SubstitutionConfig::default()
            },
            keylength: KeylengthConfig {
                max_length: 40,
                ..KeylengthConfig::default()
            },
            ..Self::default()
        }
    }

    /// Few short climbs, for quick looks at a ciphertext
    pub fn quick() -> Self {
        Self {
            substitution: SubstitutionConfig {
                restarts: 3,
                patience: 300,
                candidates: 1,
                ..SubstitutionConfig::default()
            },
            caesar: CaesarConfig { candidates: 1 },
            keylength: KeylengthConfig {
                max_length: 12,
                ..KeylengthConfig::default()
            },
            ..Self::default()
        }
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.ngram.alpha.is_finite() && self.ngram.alpha > 0.0) {
            return Err(CrackError::InvalidConfig(format!(
                "ngram.alpha must be positive and finite, got {}",
                self.ngram.alpha
            )));
        }

        if self.substitution.patience == 0 {
            return Err(CrackError::InvalidConfig(
                "substitution.patience must be >= 1".to_string(),
            ));
        }

        if self.substitution.threads == 0 {
            return Err(CrackError::InvalidConfig(
                "substitution.threads must be >= 1".to_string(),
            ));
        }

        let keylength = &self.keylength;
        if keylength.min_length == 0 || keylength.min_length > keylength.max_length {
            return Err(CrackError::InvalidKeyLengthRange {
                min: keylength.min_length,
                max: keylength.max_length,
            });
        }

        if keylength
            .expected_plaintext
            .partial_cmp(&keylength.expected_random)
            != Some(Ordering::Greater)
        {
            return Err(CrackError::InvalidThreshold {
                plaintext: keylength.expected_plaintext,
                random: keylength.expected_random,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CrackConfig::default();
        assert_eq!(config.ngram.alpha, 0.01);
        assert_eq!(config.substitution.restarts, 10);
        assert_eq!(config.substitution.patience, 1000);
        assert_eq!(config.substitution.seed, None);
        assert_eq!(config.caesar.candidates, 3);
        assert_eq!(config.keylength.min_length, 1);
        assert_eq!(config.keylength.max_length, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets_validate() {
        let thorough = CrackConfig::thorough();
        assert!(thorough.substitution.restarts > CrackConfig::default().substitution.restarts);
        assert!(thorough.validate().is_ok());

        let quick = CrackConfig::quick();
        assert!(quick.substitution.patience < DEFAULT_PATIENCE);
        assert!(quick.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CrackConfig::from_toml_str(
            r#"
            [substitution]
            seed = 7
            threads = 4

            [keylength]
            max_length = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.substitution.seed, Some(7));
        assert_eq!(config.substitution.threads, 4);
        assert_eq!(config.substitution.restarts, 10);
        assert_eq!(config.keylength.max_length, 30);
        assert_eq!(config.keylength.min_length, 1);
        assert_eq!(config.ngram, NgramConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(CrackConfig::from_toml_str("").unwrap(), CrackConfig::default());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(matches!(
            CrackConfig::from_toml_str("[substitution]\nrestart = 3\n"),
            Err(CrackError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_invalid_alpha() {
        let mut config = CrackConfig::default();
        config.ngram.alpha = 0.0;
        assert!(matches!(config.validate(), Err(CrackError::InvalidConfig(_))));
        config.ngram.alpha = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_substitution() {
        let mut config = CrackConfig::default();
        config.substitution.threads = 0;
        assert!(config.validate().is_err());

        let mut config = CrackConfig::default();
        config.substitution.patience = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_keylength() {
        let mut config = CrackConfig::default();
        config.keylength.min_length = 25;
        assert!(matches!(
            config.validate(),
            Err(CrackError::InvalidKeyLengthRange { min: 25, max: 20 })
        ));

        let mut config = CrackConfig::default();
        config.keylength.expected_random = 0.07;
        assert!(matches!(
            config.validate(),
            Err(CrackError::InvalidThreshold { .. })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[caesar]\ncandidates = 5").unwrap();

        let config = CrackConfig::from_file(file.path()).unwrap();
        assert_eq!(config.caesar.candidates, 5);
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let mut config = CrackConfig::thorough();
        config.substitution.seed = Some(99);
        let text = toml::to_string(&config).unwrap();
        assert_eq!(CrackConfig::from_toml_str(&text).unwrap(), config);
    }
}
