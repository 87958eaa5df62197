//! Parsing of the comma-separated participant list.

use itertools::Itertools;

/// Separator used when writing the list back into the input field.
pub const JOIN_SEPARATOR: &str = ", ";

/// Splits `raw` on commas, trims every piece and drops the empty ones.
/// Relative order of the surviving names is preserved.
pub fn parse_names(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_owned)
        .collect()
}

pub fn join_names(names: &[String]) -> String {
    names.iter().join(JOIN_SEPARATOR)
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_names__drops_blank_pieces_and_trims() {
        let names = parse_names("Alice, , Bob ,  ");
        assert_eq!(names, vec!["Alice".to_string(), "Bob".to_string()]);
    }

    #[test]
    fn parse_names__empty_input_yields_empty_list() {
        assert!(parse_names("").is_empty());
        assert!(parse_names("  ,\t, ").is_empty());
    }

    #[test]
    fn join_names__uses_comma_space() {
        let names = parse_names("a,b , c");
        assert_eq!(join_names(&names), "a, b, c");
    }

    proptest! {
        #[test]
        fn parse_names__never_yields_blank_entries(raw in ".{0,64}") {
            for name in parse_names(&raw) {
                prop_assert!(!name.trim().is_empty());
                prop_assert_eq!(name.trim(), name.as_str());
            }
        }

        #[test]
        fn parse_names__preserves_order_of_survivors(
            pieces in proptest::collection::vec("[a-z ]{0,6}", 0..10)
        ) {
            let raw = pieces.join(",");
            let expected: Vec<String> = pieces
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            prop_assert_eq!(parse_names(&raw), expected);
        }
    }
}
