// File: src/edit/adjacency.rs
//! Pairwise single-edit predicates.
//!
//! Positions count Unicode scalar values (`char`s). Strings whose lengths
//! differ by more than one, and identical strings, are never adjacent.

/// A single differing position between two equal-length words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Replacement {
    pub position: usize,
    pub from: char,
    pub to: char,
}

impl Replacement {
    /// True when the two letters differ only by case.
    pub fn is_case_change(&self) -> bool {
        self.from.to_lowercase().eq(self.to.to_lowercase())
    }
}

/// Position at which removing one letter from `longer` yields `shorter`.
///
/// The position is the first point where the two strings diverge; for runs
/// of a repeated letter this is the position after the run's shared prefix.
pub fn is_single_deletion(longer: &str, shorter: &str) -> Option<usize> {
    let long: Vec<char> = longer.chars().collect();
    let short: Vec<char> = shorter.chars().collect();
    if long.len() != short.len() + 1 {
        return None;
    }
    let position = long
        .iter()
        .zip(&short)
        .position(|(a, b)| a != b)
        .unwrap_or(short.len());
    (long[position + 1..] == short[position..]).then_some(position)
}

/// The one position where `a` and `b` differ, or `None` when they have
/// different lengths, are identical, or differ in more than one place.
pub fn is_single_replacement(a: &str, b: &str) -> Option<Replacement> {
    let mut a_chars = a.chars();
    let mut b_chars = b.chars();
    let mut found = None;
    let mut position = 0;
    loop {
        match (a_chars.next(), b_chars.next()) {
            (None, None) => return found,
            (Some(from), Some(to)) => {
                if from != to {
                    if found.is_some() {
                        return None;
                    }
                    found = Some(Replacement { position, from, to });
                }
            }
            _ => return None,
        }
        position += 1;
    }
}

/// A single replacement where the swapped letters differ only by case.
pub fn is_single_case_change(a: &str, b: &str) -> bool {
    is_single_replacement(a, b).is_some_and(|r| r.is_case_change())
}

/// True when lowercasing would change `word`. Titlecase letters such as
/// `ǅ` count, though `char::is_uppercase` says no.
pub fn has_uppercase(word: &str) -> bool {
    word.to_lowercase() != word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deletion_anywhere_in_the_word() {
        assert_eq!(is_single_deletion("cat", "at"), Some(0));
        assert_eq!(is_single_deletion("cat", "ct"), Some(1));
        assert_eq!(is_single_deletion("cat", "ca"), Some(2));
        assert_eq!(is_single_deletion("a", ""), Some(0));
    }

    #[test]
    fn deletion_rejects_non_deletions() {
        assert_eq!(is_single_deletion("cat", "cat"), None);
        assert_eq!(is_single_deletion("cat", "dog"), None);
        assert_eq!(is_single_deletion("cat", "t"), None);
        assert_eq!(is_single_deletion("cat", "ax"), None);
        assert_eq!(is_single_deletion("at", "cat"), None);
    }

    #[test]
    fn deletion_in_repeated_letters_reports_first_divergence() {
        assert_eq!(is_single_deletion("aa", "a"), Some(1));
        assert_eq!(is_single_deletion("boot", "bot"), Some(2));
    }

    #[test]
    fn deletion_counts_chars_not_bytes() {
        assert_eq!(is_single_deletion("café", "caf"), Some(3));
        assert_eq!(is_single_deletion("naïve", "nave"), Some(2));
    }

    #[test]
    fn replacement_single_difference() {
        assert_eq!(
            is_single_replacement("cat", "cot"),
            Some(Replacement { position: 1, from: 'a', to: 'o' })
        );
        assert_eq!(
            is_single_replacement("Paris", "paris"),
            Some(Replacement { position: 0, from: 'P', to: 'p' })
        );
    }

    #[test]
    fn replacement_rejects_identical_multi_and_length_changes() {
        assert_eq!(is_single_replacement("cat", "cat"), None);
        assert_eq!(is_single_replacement("cat", "dog"), None);
        assert_eq!(is_single_replacement("PAris", "paris"), None);
        assert_eq!(is_single_replacement("cat", "cats"), None);
        assert_eq!(is_single_replacement("", ""), None);
    }

    #[test]
    fn case_change_is_a_flavour_of_replacement() {
        assert!(is_single_case_change("Paris", "paris"));
        assert!(is_single_case_change("éte", "Éte"));
        assert!(!is_single_case_change("bat", "cat"));
        assert!(!is_single_case_change("PAris", "paris"));
    }

    #[test]
    fn uppercase_detection() {
        assert!(has_uppercase("Paris"));
        assert!(has_uppercase("É"));
        assert!(!has_uppercase("paris"));
        assert!(!has_uppercase(""));
        assert!(has_uppercase("ǅa"));
        assert!(!has_uppercase("ǆa"));
    }
}
