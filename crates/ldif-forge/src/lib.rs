//! Synthetic LDIF directory trees for provisioning exercises.
//!
//! This crate generates a directory tree of people and groups under a base
//! DN and serializes it as LDIF, ready for bulk import into a directory
//! service.
//!
//! # Overview
//!
//! The tree always has three levels:
//!
//! - a `domain` root at the base DN
//! - `ou=people` and `ou=groups` organizational units
//! - `inetOrgPerson`/`posixAccount` people and `groupOfNames` groups
//!
//! Person `uid`s and group `cn`s are unique within a run, and every group
//! member is the DN of a generated person. Generation is driven by an
//! explicit RNG, so a fixed seed reproduces the same file.
//!
//! # Example
//!
//! ```
//! use ldif_forge::{GenerationConfig, build_seeded, to_ldif_string};
//!
//! let config = GenerationConfig::new("dc=example,dc=test", 3, 1)
//!     .expect("valid config")
//!     .with_seed(Some(42));
//! let tree = build_seeded(&config).expect("tree built");
//! let ldif = to_ldif_string(&tree);
//!
//! assert!(ldif.starts_with("dn: dc=example,dc=test\n"));
//! assert_eq!(ldif.matches("objectClass: posixAccount").count(), 3);
//! ```

mod atomic_io;
pub mod cli;
mod config;
mod entry;
mod error;
mod generator;
mod ldif;
mod names;
mod tree;
mod uniqueness;

pub use config::{GenerationConfig, parse_seed};
pub use entry::{
    Attribute, DomainRoot, Entry, GROUPS_OU, Group, Keyed, OrganizationalUnit, PEOPLE_OU, Person,
};
pub use error::{ConfigError, GenerationError, OutputError};
pub use generator::{
    FakeNameGenerator, ID_NUMBER_BASE, MAX_NAME_ATTEMPTS, NameGenerator, PASSWORD_LENGTH,
    synthesize_group, synthesize_person,
};
pub use ldif::{entries_in_order, render_record, to_ldif_string, write_ldif, write_ldif_file};
pub use names::{NameParts, derive_uid, split_full_name};
pub use tree::{DirectoryTree, build, build_seeded, random_seed};
pub use uniqueness::{MAX_UNIQUE_ATTEMPTS, insert_unique};
