//! Validation of human-readable names.

use std::sync::LazyLock;

use regex::Regex;

/// Pattern every well-formed name matches.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]{3,32}$").expect("invalid name pattern"));

/// Minimal length of the valid name.
pub const MIN_NAME_LEN: usize = 3;

/// Maximal length of the valid name.
pub const MAX_NAME_LEN: usize = 32;

/// Returns `true` if the given name is valid,
/// i.e. it consists of [`MIN_NAME_LEN`]..=[`MAX_NAME_LEN`]
/// ASCII letters, digits or underscores.
pub fn is_valid_name(name: &str) -> bool {
    NAME_PATTERN.is_match(name)
}

#[cfg(test)]
mod tests {
    use super::{is_valid_name, MAX_NAME_LEN, MIN_NAME_LEN};

    #[test]
    fn valid() {
        assert!(is_valid_name("asimplename"));
        assert!(is_valid_name("with_underscore_42"));
        assert!(is_valid_name("ABC"));
        assert!(is_valid_name("___"));
    }

    #[test]
    fn too_short() {
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("a"));
        assert!(!is_valid_name("az"));
    }

    #[test]
    fn too_long() {
        assert!(!is_valid_name("averyveryveryveryveryverylongname"));
    }

    #[test]
    fn length_bounds() {
        for len in 0..=MAX_NAME_LEN + 2 {
            let name = "x".repeat(len);
            let expected = (MIN_NAME_LEN..=MAX_NAME_LEN).contains(&len);
            assert_eq!(is_valid_name(&name), expected, "len={}", len);
        }
    }

    #[test]
    fn bad_characters() {
        assert!(!is_valid_name("with space"));
        assert!(!is_valid_name("dash-name"));
        assert!(!is_valid_name("dot.name"));
        assert!(!is_valid_name("slash/name"));
        assert!(!is_valid_name("trailing\n"));
        assert!(!is_valid_name("ünïcode"));
    }
}
