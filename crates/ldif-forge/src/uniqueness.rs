//! Bounded retry that keeps sibling keys unique.

use tracing::debug;

use crate::entry::{Keyed, OrganizationalUnit};
use crate::error::GenerationError;

/// Candidates drawn per entry before a unit is reported as exhausted.
pub const MAX_UNIQUE_ATTEMPTS: usize = 10_000;

/// Inserts the first candidate whose key is not yet in `unit`.
///
/// `candidate` is called once per attempt. Colliding candidates are dropped
/// and a fresh one is requested, up to `max_attempts` in total.
///
/// # Errors
///
/// Propagates any error from `candidate`, and returns
/// [`GenerationError::UniqueKeyExhausted`] when every attempt collided.
pub fn insert_unique<E, F>(
    unit: &mut OrganizationalUnit<E>,
    max_attempts: usize,
    mut candidate: F,
) -> Result<(), GenerationError>
where
    E: Keyed,
    F: FnMut() -> Result<E, GenerationError>,
{
    for attempt in 1..=max_attempts {
        let entry = candidate()?;
        if !unit.contains_key(entry.key()) {
            unit.insert(entry);
            return Ok(());
        }
        debug!(
            ou = unit.name(),
            key = entry.key(),
            attempt,
            "duplicate key generated; drawing another candidate"
        );
    }

    Err(GenerationError::UniqueKeyExhausted {
        ou: unit.name(),
        attempts: max_attempts,
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::entry::{GROUPS_OU, Group};

    fn group(cn: &str) -> Group {
        Group {
            dn: format!("cn={cn},ou=groups,dc=example,dc=test"),
            cn: cn.to_owned(),
            members: vec!["uid=ada,ou=people,dc=example,dc=test".to_owned()],
        }
    }

    fn unit_with(keys: &[&str]) -> OrganizationalUnit<Group> {
        let mut unit = OrganizationalUnit::new(GROUPS_OU, "dc=example,dc=test");
        for key in keys {
            assert!(unit.insert(group(key)));
        }
        unit
    }

    #[test]
    fn inserts_first_candidate_when_key_is_free() {
        let mut unit = unit_with(&[]);
        let mut calls = 0;

        insert_unique(&mut unit, 5, || {
            calls += 1;
            Ok(group("groupa"))
        })
        .expect("insert");

        assert_eq!(calls, 1);
        assert!(unit.contains_key("groupa"));
    }

    #[test]
    fn retries_until_key_is_free() {
        let mut unit = unit_with(&["groupa", "groupb"]);
        let mut candidates = ["groupa", "groupb", "groupa", "groupc"].into_iter();

        insert_unique(&mut unit, 10, || {
            Ok(group(candidates.next().expect("candidate")))
        })
        .expect("insert");

        let keys: Vec<&str> = unit.iter().map(|entry| entry.cn.as_str()).collect();
        assert_eq!(keys, vec!["groupa", "groupb", "groupc"]);
        assert_eq!(candidates.next(), None);
    }

    #[rstest]
    #[case(1)]
    #[case(25)]
    fn reports_exhaustion_after_max_attempts(#[case] max_attempts: usize) {
        let mut unit = unit_with(&["groupa"]);
        let mut calls = 0;

        let result = insert_unique(&mut unit, max_attempts, || {
            calls += 1;
            Ok(group("groupa"))
        });

        assert_eq!(
            result,
            Err(GenerationError::UniqueKeyExhausted {
                ou: GROUPS_OU,
                attempts: max_attempts,
            })
        );
        assert_eq!(calls, max_attempts);
        assert_eq!(unit.len(), 1);
    }

    #[test]
    fn propagates_candidate_errors() {
        let mut unit = unit_with(&[]);

        let result = insert_unique(&mut unit, 5, || Err(GenerationError::NoPeople));

        assert_eq!(result, Err(GenerationError::NoPeople));
        assert!(unit.is_empty());
    }
}
