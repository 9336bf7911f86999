//! Assembly of the complete directory tree.
//!
//! The tree always has the same shape: a `domain` root, a people unit and a
//! groups unit. People are generated first so that every group can draw its
//! members from the finished people unit.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::GenerationConfig;
use crate::entry::{DomainRoot, Group, OrganizationalUnit, Person};
use crate::error::GenerationError;
use crate::generator::{FakeNameGenerator, NameGenerator, synthesize_group, synthesize_person};
use crate::uniqueness::{MAX_UNIQUE_ATTEMPTS, insert_unique};

/// A fully generated directory tree, ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryTree {
    root: DomainRoot,
}

impl DirectoryTree {
    /// Creates a tree with empty people and groups units.
    pub(crate) fn new(base_dn: &str) -> Self {
        Self {
            root: DomainRoot::new(base_dn),
        }
    }

    /// Returns the `domain` root entry.
    #[must_use]
    pub const fn root(&self) -> &DomainRoot {
        &self.root
    }

    /// Returns the people unit.
    #[must_use]
    pub const fn people(&self) -> &OrganizationalUnit<Person> {
        self.root.people()
    }

    /// Returns the groups unit.
    #[must_use]
    pub const fn groups(&self) -> &OrganizationalUnit<Group> {
        self.root.groups()
    }

    #[cfg(test)]
    pub(crate) fn units_mut(
        &mut self,
    ) -> (&mut OrganizationalUnit<Person>, &mut OrganizationalUnit<Group>) {
        (&mut self.root.people, &mut self.root.groups)
    }
}

/// Builds a tree for `config` using the given name source and RNG.
///
/// # Errors
///
/// Returns [`GenerationError`] if a person name cannot be drawn, a unit runs
/// out of unique keys, or a group is requested without people.
///
/// # Example
///
/// ```
/// use ldif_forge::{FakeNameGenerator, GenerationConfig, build};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let config = GenerationConfig::new("dc=example,dc=test", 3, 1).expect("valid config");
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let tree = build(&config, &FakeNameGenerator, &mut rng).expect("tree built");
///
/// assert_eq!(tree.people().len(), 3);
/// assert_eq!(tree.groups().len(), 1);
/// ```
pub fn build<N, R>(
    config: &GenerationConfig,
    names: &N,
    rng: &mut R,
) -> Result<DirectoryTree, GenerationError>
where
    N: NameGenerator,
    R: Rng,
{
    let base_dn = config.base_dn();
    let mut tree = DirectoryTree::new(base_dn);
    let DomainRoot { people, groups, .. } = &mut tree.root;

    for _ in 0..config.people() {
        insert_unique(people, MAX_UNIQUE_ATTEMPTS, || {
            synthesize_person(base_dn, config.people(), names, rng)
        })?;
    }
    debug!(ou = people.name(), count = people.len(), "people unit filled");

    for _ in 0..config.groups() {
        insert_unique(groups, MAX_UNIQUE_ATTEMPTS, || {
            synthesize_group(base_dn, config.groups(), people, rng)
        })?;
    }
    debug!(ou = groups.name(), count = groups.len(), "groups unit filled");

    info!(
        base_dn,
        people = people.len(),
        groups = groups.len(),
        "directory tree built"
    );
    Ok(tree)
}

/// Builds a tree with `fake` names and a `ChaCha8` RNG.
///
/// The RNG is seeded from [`GenerationConfig::seed`], or from a freshly
/// drawn seed when none is set. The seed in use is logged so a run can be
/// reproduced.
///
/// # Errors
///
/// See [`build`].
pub fn build_seeded(config: &GenerationConfig) -> Result<DirectoryTree, GenerationError> {
    let seed = config.seed().unwrap_or_else(random_seed);
    info!(seed, "seeding generator");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    build(config, &FakeNameGenerator, &mut rng)
}

/// Draws a fresh RNG seed from the thread-local generator.
#[must_use]
pub fn random_seed() -> u64 {
    rand::rng().random()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rstest::rstest;

    use super::*;
    use crate::entry::{Entry, Keyed};

    const BASE_DN: &str = "dc=example,dc=test";

    fn seeded(people: usize, groups: usize, seed: u64) -> DirectoryTree {
        let config = GenerationConfig::new(BASE_DN, people, groups)
            .expect("valid config")
            .with_seed(Some(seed));
        build_seeded(&config).expect("tree built")
    }

    #[rstest]
    #[case(1, 0)]
    #[case(3, 1)]
    #[case(25, 12)]
    fn counts_match_the_request(#[case] people: usize, #[case] groups: usize) {
        let tree = seeded(people, groups, 42);

        assert_eq!(tree.people().len(), people);
        assert_eq!(tree.groups().len(), groups);
    }

    #[test]
    fn keys_are_unique() {
        let tree = seeded(40, 15, 3);

        let uids: HashSet<&str> = tree.people().iter().map(Keyed::key).collect();
        let cns: HashSet<&str> = tree.groups().iter().map(Keyed::key).collect();

        assert_eq!(uids.len(), 40);
        assert_eq!(cns.len(), 15);
    }

    #[test]
    fn members_reference_existing_people() {
        let tree = seeded(8, 6, 11);
        let people = tree.people();

        for group in tree.groups() {
            assert!(!group.members.is_empty());
            assert!(group.members.len() <= people.len());
            for member in &group.members {
                let uid = member
                    .strip_prefix("uid=")
                    .and_then(|rest| rest.split(',').next())
                    .expect("member uid");
                let person = people.get(uid).expect("member is a known person");
                assert_eq!(&person.dn, member);
            }
        }
    }

    #[test]
    fn same_seed_builds_the_same_tree() {
        assert_eq!(seeded(10, 4, 99), seeded(10, 4, 99));
    }

    #[test]
    fn root_has_two_units_in_order() {
        let tree = seeded(2, 1, 5);
        let children = tree.root().children();
        let dns: Vec<&str> = children.iter().map(|child| child.dn()).collect();

        assert_eq!(tree.root().dn(), BASE_DN);
        assert_eq!(
            dns,
            vec![
                "ou=people,dc=example,dc=test",
                "ou=groups,dc=example,dc=test"
            ]
        );
    }

    #[test]
    fn empty_request_builds_an_empty_tree() {
        let tree = seeded(0, 0, 1);

        assert!(tree.people().is_empty());
        assert!(tree.groups().is_empty());
    }
}
