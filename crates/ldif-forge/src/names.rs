//! Full-name decomposition for person entries.
//!
//! Person attributes are all derived from one generated full name, so the
//! name has to split cleanly before anything else is computed.
//!
//! # Rules
//!
//! - Exactly two tokens separated by a single space
//! - Each token is ASCII letters, optionally joined by apostrophes or hyphens
//!   (`O'Hara`, `Smith-Jones`)
//! - Tokens never start or end with punctuation

/// The two parts of a generated full name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NameParts<'a> {
    /// First token, used for `givenName`.
    pub given: &'a str,
    /// Second token, used for `sn`.
    pub surname: &'a str,
}

/// Splits a full name into a given name and a surname.
///
/// Returns `None` when the name has more or fewer than two tokens, or when
/// either token contains characters outside the allowed set.
///
/// # Examples
///
/// ```
/// use ldif_forge::split_full_name;
///
/// let parts = split_full_name("Ada Lovelace").expect("two-part name");
/// assert_eq!(parts.given, "Ada");
/// assert_eq!(parts.surname, "Lovelace");
///
/// assert!(split_full_name("Cher").is_none());
/// assert!(split_full_name("Mary Ann Evans").is_none());
/// ```
#[must_use]
pub fn split_full_name(name: &str) -> Option<NameParts<'_>> {
    let mut tokens = name.split(' ');
    let (Some(given), Some(surname), None) = (tokens.next(), tokens.next(), tokens.next()) else {
        return None;
    };
    (is_valid_name_token(given) && is_valid_name_token(surname))
        .then_some(NameParts { given, surname })
}

/// Derives the login name for a full name: spaces removed, lower-cased.
///
/// # Examples
///
/// ```
/// use ldif_forge::derive_uid;
///
/// assert_eq!(derive_uid("Ada Lovelace"), "adalovelace");
/// ```
#[must_use]
pub fn derive_uid(full_name: &str) -> String {
    full_name
        .chars()
        .filter(|c| *c != ' ')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

fn is_valid_name_token(token: &str) -> bool {
    let starts_with_letter = token.chars().next().is_some_and(|c| c.is_ascii_alphabetic());
    let ends_with_letter = token
        .chars()
        .next_back()
        .is_some_and(|c| c.is_ascii_alphabetic());
    starts_with_letter && ends_with_letter && token.chars().all(is_valid_name_char)
}

const fn is_valid_name_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '\'' || c == '-'
}

#[cfg(test)]
mod tests {
    //! Covers full-name splitting and uid derivation.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("Ada Lovelace", "Ada", "Lovelace")]
    #[case("Maureen O'Hara", "Maureen", "O'Hara")]
    #[case("Jean-Luc Picard", "Jean-Luc", "Picard")]
    #[case("Al Li", "Al", "Li")]
    fn splits_two_part_names(#[case] name: &str, #[case] given: &str, #[case] surname: &str) {
        assert_eq!(split_full_name(name), Some(NameParts { given, surname }));
    }

    #[rstest]
    #[case("")] // Empty
    #[case("Cher")] // Single token
    #[case("Mary Ann Evans")] // Three tokens
    #[case("Ada  Lovelace")] // Double space
    #[case(" Ada Lovelace")] // Leading space
    #[case("Ada Lovelace ")] // Trailing space
    #[case("Ada L0velace")] // Digit
    #[case("Ada -Lovelace")] // Leading hyphen
    #[case("Ada Lovelace'")] // Trailing apostrophe
    #[case("Zoë Lovelace")] // Non-ASCII letter
    #[case("Ada Love,lace")] // DN separator
    fn rejects_malformed_names(#[case] name: &str) {
        assert_eq!(split_full_name(name), None);
    }

    #[rstest]
    #[case("Ada Lovelace", "adalovelace")]
    #[case("Maureen O'Hara", "maureeno'hara")]
    #[case("ALAN TURING", "alanturing")]
    fn derives_lowercase_uid_without_spaces(#[case] name: &str, #[case] uid: &str) {
        assert_eq!(derive_uid(name), uid);
    }
}
