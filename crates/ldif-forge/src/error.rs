//! Error types for the ldif-forge crate.
//!
//! Failures are split by the stage that raises them: configuration is
//! validated before any work starts, generation can exhaust its retry
//! budgets, and output writing can fail at the filesystem.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors raised while validating a generation request.
///
/// These are always reported before the output file is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base DN was empty or whitespace-only.
    #[error("base DN must not be empty")]
    EmptyBaseDn,

    /// The base DN contained a line break, which would corrupt the output.
    #[error("base DN must not contain line breaks")]
    MultilineBaseDn,

    /// Groups were requested but there are no people to place in them.
    #[error("cannot generate {groups} group(s) without at least one person")]
    GroupsWithoutPeople {
        /// Number of groups requested.
        groups: usize,
    },

    /// The RNG seed override could not be parsed.
    #[error("invalid RNG seed '{value}': {message}")]
    InvalidSeed {
        /// Raw seed value supplied.
        value: String,
        /// Parser error message.
        message: String,
    },
}

/// Errors that can occur while synthesizing the directory tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The name generator kept producing names that do not split into a
    /// given name and a surname.
    #[error("generated name '{name}' is not a two-part name after {attempts} attempts")]
    MalformedName {
        /// The last rejected name.
        name: String,
        /// Number of names drawn before giving up.
        attempts: usize,
    },

    /// No unused key could be drawn for an organizational unit.
    #[error("failed to generate a unique {ou} entry after {attempts} attempts")]
    UniqueKeyExhausted {
        /// Name of the organizational unit being filled.
        ou: &'static str,
        /// Number of candidates drawn before giving up.
        attempts: usize,
    },

    /// A group was requested while the people unit is empty.
    #[error("cannot pick group members from an empty people unit")]
    NoPeople,
}

/// Errors that can occur while writing the LDIF output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OutputError {
    /// The output path does not name a file.
    #[error("output path '{path}' must name a file")]
    InvalidPath {
        /// Path supplied for the output.
        path: Utf8PathBuf,
    },

    /// The directory that should hold the output could not be opened.
    #[error("failed to open output directory '{path}': {message}")]
    OpenDirectory {
        /// Directory path.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// Writing, syncing or renaming the output failed.
    #[error("failed to write output file '{path}': {message}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },
}
