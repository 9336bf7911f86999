//! Synthetic attribute generation for person and group entries.
//!
//! All randomness comes from the caller's RNG, so a seeded RNG reproduces
//! the same entries. Names come from a [`NameGenerator`]; the default
//! implementation draws English first and last names with `fake`.

use fake::Fake;
use fake::faker::name::raw::{FirstName, LastName};
use fake::locales::EN;
use rand::Rng;
use rand::seq::index;

use crate::entry::{GROUPS_OU, Group, OrganizationalUnit, PEOPLE_OU, Person};
use crate::error::GenerationError;
use crate::names::{NameParts, derive_uid, split_full_name};

/// Lowest `uidNumber`/`gidNumber` handed out.
pub const ID_NUMBER_BASE: u64 = 911_400_001;

/// Length of generated `userPassword` values.
pub const PASSWORD_LENGTH: usize = 8;

/// Maximum number of names drawn before a person is reported as malformed.
pub const MAX_NAME_ATTEMPTS: usize = 100;

/// Prefix shared by every generated group name.
const GROUP_PREFIX: &str = "group";

const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

const ASCII_LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Source of full names for person entries.
pub trait NameGenerator {
    /// Returns a full name in `First Last` form.
    fn full_name<R: Rng>(&self, rng: &mut R) -> String;
}

/// Draws English first and last names from the `fake` name lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeNameGenerator;

impl NameGenerator for FakeNameGenerator {
    fn full_name<R: Rng>(&self, rng: &mut R) -> String {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        format!("{first} {last}")
    }
}

/// Synthesizes one person under the people unit of `base_dn`.
///
/// `population_size` sizes the `uidNumber`/`gidNumber` range. Names that do
/// not split into a given name and a surname are redrawn up to
/// [`MAX_NAME_ATTEMPTS`] times.
///
/// # Errors
///
/// Returns [`GenerationError::MalformedName`] if every drawn name was
/// rejected.
///
/// # Example
///
/// ```
/// use ldif_forge::{FakeNameGenerator, synthesize_person};
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let person = synthesize_person("dc=example,dc=test", 10, &FakeNameGenerator, &mut rng)
///     .expect("person generated");
///
/// assert!(person.dn.starts_with(&format!("uid={},", person.uid)));
/// assert_eq!(person.user_password.len(), 8);
/// ```
pub fn synthesize_person<N, R>(
    base_dn: &str,
    population_size: usize,
    names: &N,
    rng: &mut R,
) -> Result<Person, GenerationError>
where
    N: NameGenerator,
    R: Rng,
{
    let mut rejected = String::new();
    for _ in 0..MAX_NAME_ATTEMPTS {
        let full_name = names.full_name(rng);
        if let Some(parts) = split_full_name(&full_name) {
            return Ok(person_from_name(
                base_dn,
                population_size,
                &full_name,
                parts,
                rng,
            ));
        }
        rejected = full_name;
    }

    Err(GenerationError::MalformedName {
        name: rejected,
        attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Synthesizes one group under the groups unit of `base_dn`.
///
/// The group name is `group` followed by distinct random lowercase letters,
/// as many as `group_count` has decimal digits. Between one and all people
/// are picked as members, without repeats.
///
/// # Errors
///
/// Returns [`GenerationError::NoPeople`] if `people` is empty.
pub fn synthesize_group<R: Rng>(
    base_dn: &str,
    group_count: usize,
    people: &OrganizationalUnit<Person>,
    rng: &mut R,
) -> Result<Group, GenerationError> {
    if people.is_empty() {
        return Err(GenerationError::NoPeople);
    }

    let suffix = sample_letters(rng, ASCII_LOWERCASE, decimal_digits(group_count));
    let cn = format!("{GROUP_PREFIX}{suffix}");

    let population = people.as_slice();
    let member_count = rng.random_range(1..=population.len());
    let members = index::sample(rng, population.len(), member_count)
        .into_iter()
        .filter_map(|position| population.get(position))
        .map(|person| person.dn.clone())
        .collect();

    Ok(Group {
        dn: format!("cn={cn},ou={GROUPS_OU},{base_dn}"),
        cn,
        members,
    })
}

fn person_from_name<R: Rng>(
    base_dn: &str,
    population_size: usize,
    full_name: &str,
    parts: NameParts<'_>,
    rng: &mut R,
) -> Person {
    let uid = derive_uid(full_name);
    let uid_number = draw_id_number(rng, population_size);
    let gid_number = draw_id_number(rng, population_size);
    let user_password = sample_letters(rng, ASCII_LETTERS, PASSWORD_LENGTH);

    Person {
        dn: format!("uid={uid},ou={PEOPLE_OU},{base_dn}"),
        home_directory: format!("/home/{uid}"),
        uid,
        full_name: full_name.to_owned(),
        given_name: parts.given.to_owned(),
        surname: parts.surname.to_owned(),
        uid_number,
        gid_number,
        user_password,
    }
}

/// Draws from `[ID_NUMBER_BASE, ID_NUMBER_BASE + population_size)`.
fn draw_id_number<R: Rng>(rng: &mut R, population_size: usize) -> u64 {
    let span = u64::try_from(population_size).unwrap_or(u64::MAX).max(1);
    rng.random_range(ID_NUMBER_BASE..ID_NUMBER_BASE.saturating_add(span))
}

/// Samples `amount` distinct characters from `alphabet`, in random order.
fn sample_letters<R: Rng>(rng: &mut R, alphabet: &[u8], amount: usize) -> String {
    index::sample(rng, alphabet.len(), amount.min(alphabet.len()))
        .into_iter()
        .filter_map(|position| alphabet.get(position))
        .map(|&byte| char::from(byte))
        .collect()
}

fn decimal_digits(value: usize) -> usize {
    value.to_string().len()
}
