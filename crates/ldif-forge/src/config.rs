//! Validated input for a generation run.

use std::fmt;

use crate::error::ConfigError;

/// Everything the tree builder needs to know about a run.
///
/// Construct with [`GenerationConfig::new`], which rejects requests that
/// could never produce a valid tree.
///
/// # Example
///
/// ```
/// use ldif_forge::GenerationConfig;
///
/// let config = GenerationConfig::new("dc=example,dc=test", 3, 1)
///     .expect("valid config")
///     .with_seed(Some(42));
///
/// assert_eq!(config.people(), 3);
/// assert_eq!(config.seed(), Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationConfig {
    base_dn: String,
    people: usize,
    groups: usize,
    seed: Option<u64>,
}

impl GenerationConfig {
    /// Validates and builds a configuration without a fixed seed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if:
    /// - `base_dn` is empty or whitespace-only
    /// - `base_dn` contains a line break
    /// - groups are requested with no people
    pub fn new(
        base_dn: impl Into<String>,
        people: usize,
        groups: usize,
    ) -> Result<Self, ConfigError> {
        let dn: String = base_dn.into();
        if dn.trim().is_empty() {
            return Err(ConfigError::EmptyBaseDn);
        }
        if dn.contains(['\n', '\r']) {
            return Err(ConfigError::MultilineBaseDn);
        }
        if people == 0 && groups > 0 {
            return Err(ConfigError::GroupsWithoutPeople { groups });
        }

        Ok(Self {
            base_dn: dn,
            people,
            groups,
            seed: None,
        })
    }

    /// Fixes the RNG seed for the run; `None` draws a fresh one.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the base DN.
    #[must_use]
    pub fn base_dn(&self) -> &str {
        &self.base_dn
    }

    /// Returns the number of people to generate.
    #[must_use]
    pub const fn people(&self) -> usize {
        self.people
    }

    /// Returns the number of groups to generate.
    #[must_use]
    pub const fn groups(&self) -> usize {
        self.groups
    }

    /// Returns the fixed RNG seed, if any.
    #[must_use]
    pub const fn seed(&self) -> Option<u64> {
        self.seed
    }
}

/// Parses an RNG seed override.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSeed`] if `value` is not a `u64`.
pub fn parse_seed(value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|err| invalid_seed(value, err))
}

fn invalid_seed(value: &str, err: impl fmt::Display) -> ConfigError {
    ConfigError::InvalidSeed {
        value: value.to_owned(),
        message: err.to_string(),
    }
}
