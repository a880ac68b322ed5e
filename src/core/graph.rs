// src/core/graph.rs
use crate::core::types::{Edit, WordId, WordRecord};
use crate::core::vocabulary::Vocabulary;
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Immutable query structure: the vocabulary plus one [`WordRecord`] per word.
///
/// Neighbors are derived from the per-position data on every query and
/// filtered against the vocabulary, so a record decoded from a foreign graph
/// can never surface a word the graph does not hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordGraph {
    vocabulary: Vocabulary,
    records: Vec<WordRecord>,
    #[serde(skip)]
    max_word_length: usize,
}

impl WordGraph {
    /// Pairs a vocabulary with records indexed by [`WordId`].
    pub(crate) fn from_parts(vocabulary: Vocabulary, records: Vec<WordRecord>) -> Self {
        debug_assert_eq!(vocabulary.len(), records.len());
        let max_word_length = records.iter().map(WordRecord::len).max().unwrap_or(0);
        Self {
            vocabulary,
            records,
            max_word_length,
        }
    }

    /// Re-derives cached fields and checks the record table against the
    /// vocabulary after deserializing a snapshot.
    pub(crate) fn validated(mut self) -> Result<Self> {
        if self.records.len() != self.vocabulary.len() {
            return Err(GraphError::CorruptSnapshot(format!(
                "{} records for {} words",
                self.records.len(),
                self.vocabulary.len()
            )));
        }
        for (id, record) in self.records.iter_mut().enumerate() {
            if record.text() != self.vocabulary.word(id) {
                return Err(GraphError::CorruptSnapshot(format!(
                    "record {id} is {:?} but the vocabulary has {:?}",
                    record.text(),
                    self.vocabulary.word(id)
                )));
            }
            record.restore().map_err(GraphError::CorruptSnapshot)?;
        }
        Ok(Self::from_parts(self.vocabulary, self.records))
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    pub fn lookup(&self, word: &str) -> Option<&WordRecord> {
        self.vocabulary.id_of(word).map(|id| &self.records[id])
    }

    /// Like [`lookup`](Self::lookup) but a miss is an error naming the word.
    pub fn require(&self, word: &str) -> Result<&WordRecord> {
        self.lookup(word)
            .ok_or_else(|| GraphError::MissingWord(word.to_string()))
    }

    /// Records in [`WordId`] order.
    pub fn records(&self) -> &[WordRecord] {
        &self.records
    }

    /// Longest word, in letters. Zero for an empty graph.
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Every stored edit of `word` whose result is a vocabulary word,
    /// paired with that word. Empty for unknown words.
    pub fn edges(&self, word: &str) -> Vec<(Edit, &str)> {
        match self.vocabulary.id_of(word) {
            Some(id) => self
                .edge_ids(id)
                .map(|(edit, target)| (edit, self.vocabulary.word(target)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct neighbors of `word` in vocabulary order. Empty for unknown
    /// words.
    pub fn neighbors(&self, word: &str) -> Vec<&str> {
        match self.vocabulary.id_of(word) {
            Some(id) => self
                .neighbor_ids(id)
                .into_iter()
                .map(|n| self.vocabulary.word(n))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Distinct neighbor ids of `id`, ascending.
    pub fn neighbor_ids(&self, id: WordId) -> BTreeSet<WordId> {
        self.edge_ids(id).map(|(_, target)| target).collect()
    }

    fn edge_ids(&self, id: WordId) -> impl Iterator<Item = (Edit, WordId)> + '_ {
        let record = &self.records[id];
        record.edits().filter_map(move |edit| {
            let candidate = edit.apply(record.letters())?;
            self.vocabulary
                .id_of(&candidate)
                .filter(|&target| target != id)
                .map(|target| (edit, target))
        })
    }
}
