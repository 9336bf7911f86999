//! CLI support for generating an LDIF file.
//!
//! The binary delegates to these helpers so option handling and the run
//! itself can be exercised in tests without spawning a process.

use std::env::{self, VarError};
use std::num::NonZeroUsize;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use thiserror::Error;
use tracing::info;

use crate::config::{GenerationConfig, parse_seed};
use crate::error::{ConfigError, GenerationError, OutputError};
use crate::ldif::write_ldif_file;
use crate::tree::{build_seeded, random_seed};

/// Environment variable that fixes the RNG seed for reproducible output.
pub const SEED_ENV: &str = "LDIF_FORGE_SEED";

/// `ldif-forge` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "ldif-forge",
    about = "Generate an LDIF file of synthetic people and groups",
    version
)]
pub struct Options {
    /// Base DN the generated tree is rooted at.
    #[arg(
        short = 'b',
        long = "base-dn",
        visible_alias = "base-ou",
        alias = "base_ou",
        value_name = "dn"
    )]
    base_dn: String,
    /// Output LDIF file; replaced if it already exists.
    #[arg(short = 'o', long = "output", value_name = "path")]
    output: Utf8PathBuf,
    /// Number of person entries to generate.
    #[arg(
        short = 'u',
        long = "number-of-users",
        alias = "number_of_users",
        value_name = "n"
    )]
    number_of_users: NonZeroUsize,
    /// Number of group entries to generate.
    #[arg(
        short = 'g',
        long = "number-of-groups",
        alias = "number_of_groups",
        value_name = "n"
    )]
    number_of_groups: usize,
}

impl Options {
    /// Returns the output path supplied for the run.
    ///
    /// # Example
    ///
    /// ```
    /// use clap::Parser;
    /// use ldif_forge::cli::Options;
    ///
    /// let options = Options::try_parse_from([
    ///     "ldif-forge", "-b", "dc=example,dc=test", "-o", "out.ldif", "-u", "3", "-g", "1",
    /// ])
    /// .expect("parse");
    ///
    /// assert_eq!(options.output(), "out.ldif");
    /// ```
    #[must_use]
    pub fn output(&self) -> &Utf8Path {
        &self.output
    }

    /// Validates the options into a generation config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the base DN is unusable.
    pub fn generation_config(&self, seed: Option<u64>) -> Result<GenerationConfig, ConfigError> {
        Ok(GenerationConfig::new(
            self.base_dn.as_str(),
            self.number_of_users.get(),
            self.number_of_groups,
        )?
        .with_seed(seed))
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Number of person entries written.
    pub people: usize,
    /// Number of group entries written.
    pub groups: usize,
    /// RNG seed the run used.
    pub seed: u64,
}

/// Generates the tree and writes it to the output path.
///
/// Options are validated before the output file is touched. When `seed` is
/// `None` a fresh seed is drawn and reported in the [`Summary`].
///
/// # Errors
///
/// Returns [`CliError`] when validation, generation or writing fails.
pub fn run(options: &Options, seed: Option<u64>) -> Result<Summary, CliError> {
    let resolved_seed = seed.unwrap_or_else(random_seed);
    let config = options.generation_config(Some(resolved_seed))?;
    let tree = build_seeded(&config)?;
    write_ldif_file(&tree, options.output())?;
    info!(path = %options.output(), "LDIF written");

    Ok(Summary {
        people: tree.people().len(),
        groups: tree.groups().len(),
        seed: resolved_seed,
    })
}

/// Reads the seed override from [`SEED_ENV`].
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSeed`] if the variable is set to anything
/// other than a `u64`.
pub fn seed_from_env() -> Result<Option<u64>, ConfigError> {
    seed_from_var(env::var(SEED_ENV))
}

fn seed_from_var(value: Result<String, VarError>) -> Result<Option<u64>, ConfigError> {
    match value {
        Ok(raw) => parse_seed(&raw).map(Some),
        Err(VarError::NotPresent) => Ok(None),
        Err(err @ VarError::NotUnicode(_)) => Err(ConfigError::InvalidSeed {
            value: SEED_ENV.to_owned(),
            message: err.to_string(),
        }),
    }
}

/// Formats the success message emitted by the CLI.
///
/// # Example
///
/// ```
/// use camino::Utf8Path;
/// use ldif_forge::cli::{Summary, success_message};
///
/// let summary = Summary { people: 3, groups: 1, seed: 42 };
/// let message = success_message(&summary, Utf8Path::new("out.ldif"));
///
/// assert_eq!(message, "Wrote 3 people and 1 groups to out.ldif (seed=42)");
/// ```
#[must_use]
pub fn success_message(summary: &Summary, output: &Utf8Path) -> String {
    format!(
        "Wrote {} people and {} groups to {} (seed={})",
        summary.people, summary.groups, output, summary.seed
    )
}

/// Errors surfaced by the CLI run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CliError {
    /// The request was rejected before generation started.
    #[error("invalid options: {source}")]
    Config {
        /// Underlying configuration error.
        #[from]
        #[source]
        source: ConfigError,
    },
    /// The tree could not be generated.
    #[error("generation failed: {source}")]
    Generation {
        /// Underlying generation error.
        #[from]
        #[source]
        source: GenerationError,
    },
    /// The output file could not be written.
    #[error("output failed: {source}")]
    Output {
        /// Underlying output error.
        #[from]
        #[source]
        source: OutputError,
    },
}
