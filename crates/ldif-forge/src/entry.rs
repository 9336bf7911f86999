//! Directory entry types.
//!
//! Each entry kind is its own typed record. They share the [`Entry`] trait,
//! which renders a record as its DN plus an ordered list of attributes, and
//! exposes child entries in traversal order. The serializer only ever talks
//! to that trait.

use std::borrow::Cow;
use std::collections::HashMap;

/// Name of the organizational unit holding person entries.
pub const PEOPLE_OU: &str = "people";

/// Name of the organizational unit holding group entries.
pub const GROUPS_OU: &str = "groups";

const PERSON_OBJECT_CLASSES: [&str; 2] = ["inetOrgPerson", "posixAccount"];

/// A named attribute with its values in emission order.
///
/// Scalar attributes carry exactly one value; multi-valued attributes carry
/// one value per line they will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    name: &'static str,
    values: Vec<Cow<'a, str>>,
}

impl<'a> Attribute<'a> {
    /// Builds a single-valued attribute.
    pub fn single(name: &'static str, value: impl Into<Cow<'a, str>>) -> Self {
        Self {
            name,
            values: vec![value.into()],
        }
    }

    /// Builds a multi-valued attribute, preserving the order of `values`.
    pub fn multi<I, V>(name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Cow<'a, str>>,
    {
        Self {
            name,
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the attribute name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the attribute values in order.
    #[must_use]
    pub fn values(&self) -> &[Cow<'a, str>] {
        &self.values
    }
}

/// A record in the directory tree.
pub trait Entry {
    /// The distinguished name of the entry.
    fn dn(&self) -> &str;

    /// Every attribute except `dn`, in the order it should be written.
    fn attributes(&self) -> Vec<Attribute<'_>>;

    /// Child entries in traversal order.
    fn children(&self) -> Vec<&dyn Entry> {
        Vec::new()
    }
}

/// An entry with an identifying key that must be unique among its siblings.
pub trait Keyed {
    /// The identifying key.
    fn key(&self) -> &str;
}

/// A person leaf under the people unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Distinguished name, `uid=<uid>,ou=people,<base>`.
    pub dn: String,
    /// Login name; the unique key of the entry.
    pub uid: String,
    /// Full name, used for `cn` and `displayName`.
    pub full_name: String,
    /// First token of the full name.
    pub given_name: String,
    /// Second token of the full name.
    pub surname: String,
    /// POSIX user id.
    pub uid_number: u64,
    /// POSIX primary group id.
    pub gid_number: u64,
    /// Home directory path.
    pub home_directory: String,
    /// Plain-text password token.
    pub user_password: String,
}

impl Entry for Person {
    fn dn(&self) -> &str {
        &self.dn
    }

    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::multi("objectClass", PERSON_OBJECT_CLASSES),
            Attribute::single("uid", self.uid.as_str()),
            Attribute::single("cn", self.full_name.as_str()),
            Attribute::single("uidNumber", self.uid_number.to_string()),
            Attribute::single("gidNumber", self.gid_number.to_string()),
            Attribute::single("homeDirectory", self.home_directory.as_str()),
            Attribute::single("userPassword", self.user_password.as_str()),
            Attribute::single("displayName", self.full_name.as_str()),
            Attribute::single("givenName", self.given_name.as_str()),
            Attribute::single("sn", self.surname.as_str()),
        ]
    }
}

impl Keyed for Person {
    fn key(&self) -> &str {
        &self.uid
    }
}

/// A `groupOfNames` leaf under the groups unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Distinguished name, `cn=<cn>,ou=groups,<base>`.
    pub dn: String,
    /// Group name; the unique key of the entry.
    pub cn: String,
    /// Person DNs, without duplicates.
    pub members: Vec<String>,
}

impl Entry for Group {
    fn dn(&self) -> &str {
        &self.dn
    }

    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::single("objectClass", "groupOfNames"),
            Attribute::single("cn", self.cn.as_str()),
            Attribute::multi("member", self.members.iter().map(String::as_str)),
        ]
    }
}

impl Keyed for Group {
    fn key(&self) -> &str {
        &self.cn
    }
}

/// An organizational unit holding leaves of one kind.
///
/// Leaves keep their insertion order and keys are unique within the unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationalUnit<E> {
    dn: String,
    name: &'static str,
    entries: Vec<E>,
    positions: HashMap<String, usize>,
}

impl<E: Keyed> OrganizationalUnit<E> {
    /// Creates an empty unit named `name` directly under `base_dn`.
    #[must_use]
    pub fn new(name: &'static str, base_dn: &str) -> Self {
        Self {
            dn: format!("ou={name},{base_dn}"),
            name,
            entries: Vec::new(),
            positions: HashMap::new(),
        }
    }

    /// Returns the unit name (the `ou` attribute).
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns `true` if a leaf with `key` is already present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }

    /// Looks up a leaf by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&E> {
        self.positions
            .get(key)
            .and_then(|&position| self.entries.get(position))
    }

    /// Appends `entry` unless its key is taken.
    ///
    /// Returns `false`, dropping the entry, when the key already exists.
    pub fn insert(&mut self, entry: E) -> bool {
        if self.positions.contains_key(entry.key()) {
            return false;
        }
        self.positions
            .insert(entry.key().to_owned(), self.entries.len());
        self.entries.push(entry);
        true
    }

    /// Returns the leaves in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[E] {
        &self.entries
    }

    /// Iterates over the leaves in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.entries.iter()
    }

    /// Returns the number of leaves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the unit has no leaves.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, E: Keyed> IntoIterator for &'a OrganizationalUnit<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<E: Entry + Keyed> Entry for OrganizationalUnit<E> {
    fn dn(&self) -> &str {
        &self.dn
    }

    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![
            Attribute::single("objectClass", "organizationalUnit"),
            Attribute::single("ou", self.name),
        ]
    }

    fn children(&self) -> Vec<&dyn Entry> {
        self.entries.iter().map(|entry| entry as &dyn Entry).collect()
    }
}

/// The `domain` entry at the top of the tree.
///
/// The root owns exactly two units in fixed slots: people first, then
/// groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRoot {
    dn: String,
    pub(crate) people: OrganizationalUnit<Person>,
    pub(crate) groups: OrganizationalUnit<Group>,
}

impl DomainRoot {
    /// Creates a root for `base_dn` with empty people and groups units.
    #[must_use]
    pub fn new(base_dn: &str) -> Self {
        Self {
            dn: base_dn.to_owned(),
            people: OrganizationalUnit::new(PEOPLE_OU, base_dn),
            groups: OrganizationalUnit::new(GROUPS_OU, base_dn),
        }
    }

    /// Returns the people unit.
    #[must_use]
    pub const fn people(&self) -> &OrganizationalUnit<Person> {
        &self.people
    }

    /// Returns the groups unit.
    #[must_use]
    pub const fn groups(&self) -> &OrganizationalUnit<Group> {
        &self.groups
    }
}

impl Entry for DomainRoot {
    fn dn(&self) -> &str {
        &self.dn
    }

    fn attributes(&self) -> Vec<Attribute<'_>> {
        vec![Attribute::single("objectClass", "domain")]
    }

    fn children(&self) -> Vec<&dyn Entry> {
        vec![&self.people as &dyn Entry, &self.groups]
    }
}
