//! Text helpers shared by the catalog pipeline.

use std::cmp::Ordering;

use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

/// Accent- and case-folded form of `value` used for ordering.
pub fn collation_key(value: &str) -> String {
    value
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Human ordering of two strings: folded form first, raw form on ties.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Case-insensitive substring test. An empty needle matches everything.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn case_does_not_dominate_ordering() {
        // Plain byte order would put every uppercase letter first.
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("Zebra", "apple"), Ordering::Greater);
    }

    #[test]
    fn accents_sort_with_their_base_letter() {
        assert_eq!(collation_key("Émile"), "emile");
        assert_eq!(locale_cmp("Émile", "Frank"), Ordering::Less);
    }

    #[test]
    fn folded_ties_fall_back_to_raw_order() {
        assert_eq!(locale_cmp("abc", "abc"), Ordering::Equal);
        assert_ne!(locale_cmp("abc", "ABC"), Ordering::Equal);
    }

    #[test]
    fn substring_match_ignores_case() {
        assert!(contains_ignore_case("George Orwell", "orwell"));
        assert!(contains_ignore_case("1984", ""));
        assert!(!contains_ignore_case("Jane Austen", "orwell"));
    }
}
