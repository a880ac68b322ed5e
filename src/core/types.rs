// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a word in its [`Vocabulary`](crate::core::vocabulary::Vocabulary).
pub type WordId = usize;

/// Marks a non-deletable position in the serialized `delete` string.
pub const DELETE_PLACEHOLDER: char = '.';
/// Separates per-position fields in serialized `insert`/`replace` strings.
pub const FIELD_SEPARATOR: char = '/';

/// Characters that can never be letters of a vocabulary word.
pub const RESERVED_CHARS: [char; 4] = [DELETE_PLACEHOLDER, FIELD_SEPARATOR, '\n', '\r'];

pub fn is_reserved(c: char) -> bool {
    RESERVED_CHARS.contains(&c)
}

/// The letters legal at one position, deduplicated, in discovery order.
///
/// Equality is set equality: two sets holding the same letters in a
/// different order compare equal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LetterSet(Vec<char>);

impl LetterSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Adds `letter` unless already present. Returns whether it was added.
    pub fn insert(&mut self, letter: char) -> bool {
        if self.0.contains(&letter) {
            return false;
        }
        self.0.push(letter);
        true
    }

    pub fn contains(&self, letter: char) -> bool {
        self.0.contains(&letter)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[char] {
        &self.0
    }

    pub(crate) fn sort(&mut self) {
        self.0.sort_unstable();
    }

    fn has_duplicates(&self) -> bool {
        self.0
            .iter()
            .enumerate()
            .any(|(i, c)| self.0[..i].contains(c))
    }
}

impl PartialEq for LetterSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|c| other.contains(c))
    }
}

impl Eq for LetterSet {}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = LetterSet::new();
        for c in iter {
            set.insert(c);
        }
        set
    }
}

/// One single-letter operation, positioned on the source word.
///
/// Case changes are `Replace` edits whose letter differs from the original
/// only by case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edit {
    Delete { position: usize },
    Insert { position: usize, letter: char },
    Replace { position: usize, letter: char },
}

impl Edit {
    pub fn position(&self) -> usize {
        match *self {
            Edit::Delete { position }
            | Edit::Insert { position, .. }
            | Edit::Replace { position, .. } => position,
        }
    }

    /// Applies the edit to `letters`, or `None` when the position is out of range.
    pub fn apply(&self, letters: &[char]) -> Option<String> {
        match *self {
            Edit::Delete { position } if position < letters.len() => Some(
                letters[..position]
                    .iter()
                    .chain(&letters[position + 1..])
                    .collect(),
            ),
            Edit::Insert { position, letter } if position <= letters.len() => {
                let mut out = String::with_capacity(letters.len() + 1);
                out.extend(&letters[..position]);
                out.push(letter);
                out.extend(&letters[position..]);
                Some(out)
            }
            Edit::Replace { position, letter } if position < letters.len() => Some(
                letters
                    .iter()
                    .enumerate()
                    .map(|(i, &c)| if i == position { letter } else { c })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// The edit that undoes `self` when applied to its result.
    pub fn inverse(&self, source: &[char]) -> Option<Edit> {
        match *self {
            Edit::Delete { position } => source
                .get(position)
                .map(|&letter| Edit::Insert { position, letter }),
            Edit::Insert { position, .. } => Some(Edit::Delete { position }),
            Edit::Replace { position, .. } => source
                .get(position)
                .map(|&letter| Edit::Replace { position, letter }),
        }
    }
}

impl fmt::Display for Edit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Edit::Delete { position } => write!(f, "delete@{position}"),
            Edit::Insert { position, letter } => write!(f, "insert@{position} {letter:?}"),
            Edit::Replace { position, letter } => write!(f, "replace@{position} {letter:?}"),
        }
    }
}

/// Per-word operation data: which single-letter edits lead to another
/// vocabulary word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    text: String,
    /// Derived from `text`; rebuilt after deserializing.
    #[serde(skip)]
    letters: Vec<char>,
    /// One flag per letter.
    deletable: Vec<bool>,
    /// One set per gap, `len + 1` gaps.
    insertable: Vec<LetterSet>,
    /// One set per letter.
    replaceable: Vec<LetterSet>,
}

impl WordRecord {
    /// A record with no legal operations.
    pub fn new(text: &str) -> Self {
        let letters: Vec<char> = text.chars().collect();
        let len = letters.len();
        Self {
            text: text.to_string(),
            letters,
            deletable: vec![false; len],
            insertable: vec![LetterSet::new(); len + 1],
            replaceable: vec![LetterSet::new(); len],
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Length in letters.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    pub fn deletable(&self) -> &[bool] {
        &self.deletable
    }

    pub fn insertable(&self) -> &[LetterSet] {
        &self.insertable
    }

    pub fn replaceable(&self) -> &[LetterSet] {
        &self.replaceable
    }

    pub fn can_delete(&self, position: usize) -> bool {
        self.deletable.get(position).copied().unwrap_or(false)
    }

    pub fn has_deletions(&self) -> bool {
        self.deletable.iter().any(|&d| d)
    }

    pub fn has_insertions(&self) -> bool {
        self.insertable.iter().any(|s| !s.is_empty())
    }

    pub fn has_replacements(&self) -> bool {
        self.replaceable.iter().any(|s| !s.is_empty())
    }

    /// Every stored edit: deletes by position, then inserts by gap, then
    /// replaces by position. Letters within a position keep stored order.
    pub fn edits(&self) -> impl Iterator<Item = Edit> + '_ {
        let deletes = self
            .deletable
            .iter()
            .enumerate()
            .filter(|(_, &d)| d)
            .map(|(position, _)| Edit::Delete { position });
        let inserts = self.insertable.iter().enumerate().flat_map(|(position, set)| {
            set.iter().map(move |letter| Edit::Insert { position, letter })
        });
        let replaces = self.replaceable.iter().enumerate().flat_map(|(position, set)| {
            set.iter().map(move |letter| Edit::Replace { position, letter })
        });
        deletes.chain(inserts).chain(replaces)
    }

    pub(crate) fn mark_deletable(&mut self, position: usize) {
        self.deletable[position] = true;
    }

    pub(crate) fn add_insertion(&mut self, gap: usize, letter: char) {
        self.insertable[gap].insert(letter);
    }

    pub(crate) fn add_replacement(&mut self, position: usize, letter: char) {
        self.replaceable[position].insert(letter);
    }

    pub(crate) fn sort_candidates(&mut self) {
        for set in self.insertable.iter_mut().chain(self.replaceable.iter_mut()) {
            set.sort();
        }
    }

    /// Rebuilds `letters` from `text` and rejects anything `decode` would
    /// reject. Used when a record comes from outside the builder.
    pub(crate) fn restore(&mut self) -> Result<(), String> {
        self.letters = self.text.chars().collect();
        let len = self.letters.len();
        if let Some(&c) = self.letters.iter().find(|&&c| is_reserved(c)) {
            return Err(format!("{:?} contains reserved character {c:?}", self.text));
        }
        if self.deletable.len() != len
            || self.insertable.len() != len + 1
            || self.replaceable.len() != len
        {
            return Err(format!("attribute lengths of {:?} do not match its length {len}", self.text));
        }
        let fields = self
            .insertable
            .iter()
            .map(|set| ("insert", set))
            .enumerate()
            .chain(self.replaceable.iter().map(|set| ("replace", set)).enumerate());
        for (position, (kind, set)) in fields {
            if set.has_duplicates() {
                return Err(format!("{kind} position {position} of {:?} repeats a letter", self.text));
            }
            if let Some(c) = set.iter().find(|&c| is_reserved(c)) {
                return Err(format!(
                    "{kind} position {position} of {:?} holds reserved character {c:?}",
                    self.text
                ));
            }
        }
        for (position, set) in self.replaceable.iter().enumerate() {
            let own = self.letters[position];
            if set.contains(own) {
                return Err(format!(
                    "replace position {position} of {:?} repeats its own letter {own:?}",
                    self.text
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn letter_set_dedups_and_keeps_discovery_order() {
        let mut set = LetterSet::new();
        assert!(set.insert('o'));
        assert!(set.insert('a'));
        assert!(!set.insert('o'));
        assert_eq!(set.as_slice(), &['o', 'a']);
        assert_eq!(set, "ao".chars().collect());
    }

    #[test]
    fn edits_apply_at_char_positions() {
        let cat = chars("cat");
        assert_eq!(Edit::Delete { position: 0 }.apply(&cat).as_deref(), Some("at"));
        assert_eq!(
            Edit::Insert { position: 3, letter: 's' }.apply(&cat).as_deref(),
            Some("cats")
        );
        assert_eq!(
            Edit::Replace { position: 1, letter: 'o' }.apply(&cat).as_deref(),
            Some("cot")
        );
        assert_eq!(Edit::Delete { position: 3 }.apply(&cat), None);
        assert_eq!(Edit::Insert { position: 4, letter: 'x' }.apply(&cat), None);

        let cafe = chars("café");
        assert_eq!(Edit::Delete { position: 3 }.apply(&cafe).as_deref(), Some("caf"));
    }

    #[test]
    fn inverse_restores_the_source() {
        let cat = chars("cat");
        let del = Edit::Delete { position: 0 };
        let at = del.apply(&cat).unwrap();
        let back = del.inverse(&cat).unwrap();
        assert_eq!(back, Edit::Insert { position: 0, letter: 'c' });
        assert_eq!(back.apply(&chars(&at)).as_deref(), Some("cat"));

        let rep = Edit::Replace { position: 0, letter: 'b' };
        assert_eq!(rep.inverse(&cat), Some(Edit::Replace { position: 0, letter: 'c' }));
    }

    #[test]
    fn new_record_has_one_gap_more_than_letters() {
        let record = WordRecord::new("at");
        assert_eq!(record.deletable().len(), 2);
        assert_eq!(record.insertable().len(), 3);
        assert_eq!(record.replaceable().len(), 2);
        assert_eq!(record.edits().count(), 0);

        let empty = WordRecord::new("");
        assert!(empty.is_empty());
        assert_eq!(empty.insertable().len(), 1);
        let mut empty = empty;
        assert!(empty.restore().is_ok());
    }

    #[test]
    fn edits_are_listed_deletes_then_inserts_then_replaces() {
        let mut record = WordRecord::new("at");
        record.add_replacement(1, 'x');
        record.add_insertion(0, 'c');
        record.mark_deletable(0);
        let edits: Vec<Edit> = record.edits().collect();
        assert_eq!(
            edits,
            vec![
                Edit::Delete { position: 0 },
                Edit::Insert { position: 0, letter: 'c' },
                Edit::Replace { position: 1, letter: 'x' },
            ]
        );
    }

    fn restored(record: &WordRecord) -> Result<WordRecord, String> {
        let bytes = bincode::serialize(record).unwrap();
        let mut back: WordRecord = bincode::deserialize(&bytes).unwrap();
        back.restore().map(|()| back)
    }

    #[test]
    fn letters_come_from_text_not_from_stored_data() {
        let mut record = WordRecord::new("cat");
        record.add_replacement(0, 'b');
        record.letters[0] = 'z';
        let back = restored(&record).unwrap();
        assert_eq!(back.letters(), &['c', 'a', 't']);
        let edit = Edit::Replace { position: 0, letter: 'b' };
        assert_eq!(edit.apply(back.letters()).as_deref(), Some("bat"));
    }

    #[test]
    fn restore_rejects_what_decoding_rejects() {
        let mut own_letter = WordRecord::new("cat");
        own_letter.add_replacement(1, 'a');
        assert!(restored(&own_letter).unwrap_err().contains("own letter"));

        let mut repeated = WordRecord::new("at");
        repeated.insertable[0] = LetterSet(vec!['c', 'c']);
        assert!(restored(&repeated).unwrap_err().contains("repeats a letter"));

        let mut reserved = WordRecord::new("at");
        reserved.add_insertion(2, '/');
        assert!(restored(&reserved).unwrap_err().contains("reserved"));

        let mut short = WordRecord::new("at");
        short.deletable.pop();
        assert!(restored(&short).unwrap_err().contains("attribute lengths"));
    }
}
