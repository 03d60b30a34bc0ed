//! Name collation
//!
//! SQLite's built-in collations order by code point (`BINARY`) or fold ASCII
//! case only (`NOCASE`), which puts "Ólafsdóttir" after every ASCII name. The
//! folded collation compares names by their base letters first:
//!
//! 1. canonical decomposition with combining marks removed, lowercased
//! 2. lowercased with accents kept, so "Ole" sorts before "Óle"
//! 3. raw code points, so the order is total and deterministic

use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Name under which [`folded_compare`] is registered on every connection
pub const FOLDED_COLLATION: &str = "NAME_FOLD";

/// Compare two strings case-insensitively, collating accented letters with their base letter
pub fn folded_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| lowercase(a).cmp(lowercase(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn lowercase(s: &str) -> impl Iterator<Item = char> + '_ {
    s.chars().flat_map(char::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(names: &[&'static str]) -> Vec<&'static str> {
        let mut names = names.to_vec();
        names.sort_by(|a, b| folded_compare(a, b));
        names
    }

    #[test]
    fn accented_letter_sorts_with_base_letter() {
        assert_eq!(
            sorted(&["Zammit", "Ólafsdóttir", "Nielsen", "Petersen"]),
            vec!["Nielsen", "Ólafsdóttir", "Petersen", "Zammit"]
        );
    }

    #[test]
    fn case_is_ignored_at_first_level() {
        assert_eq!(folded_compare("alpha", "Bravo"), Ordering::Less);
        assert_eq!(folded_compare("ZULU", "yankee"), Ordering::Greater);
    }

    #[test]
    fn ties_are_broken_deterministically() {
        assert_eq!(folded_compare("Ole", "Óle"), Ordering::Less);
        assert_eq!(folded_compare("Alpha", "alpha"), Ordering::Less);
        assert_eq!(folded_compare("Zulu", "Zulu"), Ordering::Equal);
    }

    #[test]
    fn prefix_sorts_first() {
        assert_eq!(folded_compare("Ann", "Anna"), Ordering::Less);
        assert_eq!(folded_compare("", "a"), Ordering::Less);
    }

    #[test]
    fn binary_order_differs_for_non_ascii() {
        // Code point order puts 'Ó' (U+00D3) after 'Z'
        assert_eq!("Ólafsdóttir".cmp("Zammit"), Ordering::Greater);
        assert_eq!(folded_compare("Ólafsdóttir", "Zammit"), Ordering::Less);
    }
}
