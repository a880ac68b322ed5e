// File: src/codec.rs
//! Compact textual form of a word graph.
//!
//! Each word maps to a record with up to three keys:
//!
//! * `delete`: one character per letter, the letter itself where deleting it
//!   is legal and `.` where it is not.
//! * `insert`: `len + 1` fields separated by `/`, each the letters that may
//!   be inserted at that gap.
//! * `replace`: `len` fields separated by `/`, each the letters that may
//!   replace the letter at that position.
//!
//! A key is omitted when the word has no edit of that kind.
//!
//! ```json
//! { "at": { "insert": "cb//" }, "cat": { "delete": "c..", "replace": "b//" } }
//! ```

use crate::core::graph::WordGraph;
use crate::core::types::{
    is_reserved, LetterSet, WordRecord, DELETE_PLACEHOLDER, FIELD_SEPARATOR,
};
use crate::core::vocabulary::Vocabulary;
use crate::error::{GraphError, Result};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Serialized operations of one word. `None` means no edits of that kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delete: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replace: Option<String>,
}

impl SerializedRecord {
    pub fn is_empty(&self) -> bool {
        self.delete.is_none() && self.insert.is_none() && self.replace.is_none()
    }
}

/// A whole serialized graph: word keys with their records, in document
/// order. Serializes as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerializedGraph {
    entries: Vec<(String, SerializedRecord)>,
}

impl SerializedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, word: impl Into<String>, record: SerializedRecord) {
        self.entries.push((word.into(), record));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, word: &str) -> Option<&SerializedRecord> {
        self.entries
            .iter()
            .find(|(w, _)| w == word)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SerializedRecord)> + '_ {
        self.entries.iter().map(|(w, r)| (w.as_str(), r))
    }
}

impl Serialize for SerializedGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (word, record) in &self.entries {
            map.serialize_entry(word, record)?;
        }
        map.end()
    }
}

struct SerializedGraphVisitor;

impl<'de> Visitor<'de> for SerializedGraphVisitor {
    type Value = SerializedGraph;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping words to operation records")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((word, record)) = access.next_entry::<String, SerializedRecord>()? {
            entries.push((word, record));
        }
        Ok(SerializedGraph { entries })
    }
}

impl<'de> Deserialize<'de> for SerializedGraph {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SerializedGraphVisitor)
    }
}

/// What was wrong with a serialized record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeErrorKind {
    #[error("delete flags have {found} characters, expected {expected}")]
    DeleteLength { expected: usize, found: usize },

    #[error("delete flag {found:?} at position {position} is neither the letter nor '.'")]
    DeleteFlag { position: usize, found: char },

    #[error("insert has {found} fields, expected {expected}")]
    InsertFieldCount { expected: usize, found: usize },

    #[error("replace has {found} fields, expected {expected}")]
    ReplaceFieldCount { expected: usize, found: usize },

    #[error("{field} field {position} contains reserved character {letter:?}")]
    ReservedLetter {
        field: &'static str,
        position: usize,
        letter: char,
    },

    #[error("replace field {position} repeats the word's own letter {letter:?}")]
    ReplacementMatchesLetter { position: usize, letter: char },
}

/// A serialized record that failed validation, with the word it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed record for word {word:?}: {kind}")]
pub struct DecodeError {
    pub word: String,
    pub kind: DecodeErrorKind,
}

pub fn encode_record(record: &WordRecord) -> SerializedRecord {
    let delete = record.has_deletions().then(|| {
        record
            .letters()
            .iter()
            .zip(record.deletable())
            .map(|(&c, &ok)| if ok { c } else { DELETE_PLACEHOLDER })
            .collect()
    });
    let insert = record
        .has_insertions()
        .then(|| join_fields(record.insertable()));
    let replace = record
        .has_replacements()
        .then(|| join_fields(record.replaceable()));
    SerializedRecord {
        delete,
        insert,
        replace,
    }
}

fn join_fields(sets: &[LetterSet]) -> String {
    let mut out = String::new();
    for (i, set) in sets.iter().enumerate() {
        if i > 0 {
            out.push(FIELD_SEPARATOR);
        }
        out.extend(set.iter());
    }
    out
}

/// Serialized form of every record, in vocabulary order.
pub fn encode(graph: &WordGraph) -> SerializedGraph {
    let mut out = SerializedGraph::new();
    for record in graph.records() {
        out.push(record.text(), encode_record(record));
    }
    tracing::debug!(words = out.len(), "encoded word graph");
    out
}

/// Validates one serialized record against its key word.
pub fn decode_record(word: &str, serialized: &SerializedRecord) -> std::result::Result<WordRecord, DecodeError> {
    decode_record_inner(word, serialized).map_err(|kind| DecodeError {
        word: word.to_string(),
        kind,
    })
}

fn decode_record_inner(word: &str, serialized: &SerializedRecord) -> std::result::Result<WordRecord, DecodeErrorKind> {
    let mut record = WordRecord::new(word);
    let len = record.len();

    if let Some(flags) = &serialized.delete {
        let found = flags.chars().count();
        if found != len {
            return Err(DecodeErrorKind::DeleteLength { expected: len, found });
        }
        for (position, flag) in flags.chars().enumerate() {
            if flag == record.letters()[position] {
                record.mark_deletable(position);
            } else if flag != DELETE_PLACEHOLDER {
                return Err(DecodeErrorKind::DeleteFlag { position, found: flag });
            }
        }
    }

    if let Some(insert) = &serialized.insert {
        let fields = split_fields(insert, "insert")?;
        if fields.len() != len + 1 {
            return Err(DecodeErrorKind::InsertFieldCount {
                expected: len + 1,
                found: fields.len(),
            });
        }
        for (gap, letters) in fields.iter().enumerate() {
            for letter in letters.iter() {
                record.add_insertion(gap, letter);
            }
        }
    }

    if let Some(replace) = &serialized.replace {
        let fields = split_fields(replace, "replace")?;
        if fields.len() != len {
            return Err(DecodeErrorKind::ReplaceFieldCount {
                expected: len,
                found: fields.len(),
            });
        }
        for (position, letters) in fields.iter().enumerate() {
            for letter in letters.iter() {
                if letter == record.letters()[position] {
                    return Err(DecodeErrorKind::ReplacementMatchesLetter { position, letter });
                }
                record.add_replacement(position, letter);
            }
        }
    }

    Ok(record)
}

fn split_fields(value: &str, field: &'static str) -> std::result::Result<Vec<LetterSet>, DecodeErrorKind> {
    value
        .split(FIELD_SEPARATOR)
        .enumerate()
        .map(|(position, letters)| match letters.chars().find(|&c| is_reserved(c)) {
            Some(letter) => Err(DecodeErrorKind::ReservedLetter {
                field,
                position,
                letter,
            }),
            None => Ok(letters.chars().collect()),
        })
        .collect()
}

/// Rebuilds a graph from its serialized form. Fails on the first malformed
/// record; nothing partial is returned.
pub fn decode(serialized: &SerializedGraph) -> Result<WordGraph> {
    let mut seen = HashSet::with_capacity(serialized.len());
    for (word, _) in serialized.iter() {
        if !seen.insert(word) {
            return Err(GraphError::DuplicateWord(word.to_string()));
        }
    }
    let vocabulary = Vocabulary::new(serialized.iter().map(|(word, _)| word))?;

    let records = serialized
        .iter()
        .map(|(word, record)| decode_record(word, record))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    tracing::debug!(words = records.len(), "decoded word graph");
    Ok(WordGraph::from_parts(vocabulary, records))
}

pub fn to_json(graph: &WordGraph) -> Result<String> {
    Ok(serde_json::to_string(&encode(graph))?)
}

pub fn from_json(json: &str) -> Result<WordGraph> {
    let serialized: SerializedGraph = serde_json::from_str(json)?;
    decode(&serialized)
}
