use std::io::Read;

use anyhow::{Context, Result};
use clap::Parser;
use cryptanalysis::breaking::{
    CaesarBreak, Candidate, KeylengthDetector, SubstitutionBreak, VigenereBreak,
};
use cryptanalysis::cli::{Cli, Command, InputArgs, ModelArgs};
use cryptanalysis::config::CrackConfig;
use cryptanalysis::corpus::FrequencyTable;
use cryptanalysis::masker::Masker;
use cryptanalysis::CrackError;
use cryptanalysis::report::{Report, ScoreReport};
use cryptanalysis::score::{IocScorer, NgramScorer, Scorer};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber on stderr
///
/// Warnings are always shown; `--verbose` adds info, `--debug` everything.
fn init_tracing(debug: bool, verbose: bool) {
    let level = if debug {
        tracing::Level::TRACE
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn load_config(cli: &Cli) -> Result<CrackConfig> {
    match &cli.config {
        Some(path) => CrackConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(CrackConfig::default()),
    }
}

fn read_input(input: &InputArgs) -> Result<String> {
    if let Some(text) = &input.text {
        return Ok(text.clone());
    }
    if let Some(path) = &input.input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()));
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read ciphertext from stdin")?;
    Ok(text)
}

/// Table from `--ngrams`, counted from `--corpus`, or the bundled English
/// one; `--order` falls back to the command's own default
fn load_table(model: &ModelArgs, default_order: usize) -> Result<FrequencyTable> {
    if let Some(path) = &model.ngrams {
        return FrequencyTable::from_file(path)
            .with_context(|| format!("Failed to load n-gram table {}", path.display()));
    }
    let order = model.order.unwrap_or(default_order);
    if let Some(path) = &model.corpus {
        let corpus = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read corpus {}", path.display()))?;
        return FrequencyTable::from_corpus(&corpus, order)
            .with_context(|| format!("Failed to count {}-grams in {}", order, path.display()));
    }
    Ok(FrequencyTable::english(order)?)
}

/// Put the stripped characters and letter case back into each plaintext
fn extend_all<K>(masker: &Masker, candidates: Vec<Candidate<K>>) -> Result<Vec<Candidate<K>>> {
    candidates
        .into_iter()
        .map(|c| {
            Ok(Candidate {
                plaintext: masker.extend(&c.plaintext)?,
                ..c
            })
        })
        .collect()
}

fn run(cli: &Cli, config: &CrackConfig, reduced: &str, masker: &Masker) -> Result<Report> {
    let scorer = match cli.command.model() {
        Some(model) => {
            let table = load_table(model, cli.command.default_order())?;
            tracing::info!(
                "Loaded {}-gram model: {} distinct n-grams, {} total",
                table.n(),
                table.len(),
                table.total()
            );
            Some(NgramScorer::with_alpha(&table, config.ngram.alpha)?)
        }
        None => None,
    };

    let report = match (&cli.command, scorer) {
        (Command::Caesar { candidates, .. }, Some(scorer)) => {
            let n = candidates.unwrap_or(config.caesar.candidates);
            let guesses = CaesarBreak::new(scorer).guess(reduced, n)?;
            Report::Caesar {
                candidates: extend_all(masker, guesses)?,
            }
        }
        (Command::Vigenere { key_length, .. }, Some(scorer)) => {
            let guess = VigenereBreak::new(*key_length, scorer)?.guess(reduced)?;
            let mut extended = extend_all(masker, vec![guess])?;
            Report::Vigenere {
                key_length: *key_length,
                candidate: extended.remove(0),
            }
        }
        (
            Command::Substitution {
                restarts,
                seed,
                threads,
                candidates,
                ..
            },
            Some(scorer),
        ) => {
            let settings = &config.substitution;
            let restarts = restarts.unwrap_or(settings.restarts);
            let seed = seed.or(settings.seed);
            let threads = threads.unwrap_or(settings.threads).max(1);
            let n = candidates.unwrap_or(settings.candidates.min(restarts));

            let mut breaker =
                SubstitutionBreak::new(scorer, seed).with_patience(settings.patience);
            if threads > 1 {
                breaker.optimise_parallel(reduced, restarts, threads)?;
            } else {
                breaker.optimise(reduced, restarts)?;
            }
            Report::Substitution {
                restarts,
                seed,
                candidates: extend_all(masker, breaker.guess(reduced, n)?)?,
            }
        }
        (Command::Keylength { min, max, .. }, _) => {
            let settings = &config.keylength;
            let detector = KeylengthDetector::new(
                IocScorer::default(),
                min.unwrap_or(settings.min_length),
                max.unwrap_or(settings.max_length),
            )?
            .with_expectations(settings.expected_plaintext, settings.expected_random)?;
            match detector.detect(reduced) {
                Ok(report) => Report::Keylength(report),
                Err(e @ CrackError::KeyLengthTooLong { usable, .. }) if usable >= 1 => {
                    return Err(anyhow::Error::new(e).context(format!("try --max {}", usable)))
                }
                Err(e) => return Err(e.into()),
            }
        }
        (Command::Score { .. }, Some(scorer)) => Report::Score(ScoreReport {
            length: reduced.len(),
            ngram_order: scorer.model().n(),
            ngram_score: scorer.score(reduced)?,
            ioc: IocScorer::default().score(reduced).ok(),
        }),
        (command, None) => anyhow::bail!("No language model for {:?}", command),
    };
    Ok(report)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.debug, cli.verbose);

    let config = load_config(&cli)?;
    let text = read_input(cli.command.input())?;
    let (reduced, masker) = Masker::from_text(&text)?;
    if reduced.is_empty() {
        anyhow::bail!("Input contains no letters to analyse");
    }
    tracing::debug!("Reduced input to {} letters", reduced.len());

    let report = run(&cli, &config, &reduced, &masker)?;
    println!("{}", report.render(cli.format)?.trim_end());

    Ok(())
}
