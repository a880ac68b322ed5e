// src/core/vocabulary.rs
use crate::core::types::{is_reserved, WordId};
use crate::error::{GraphError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered, duplicate-free list of case-sensitive words.
///
/// Word ids are positions in first-occurrence order. Words may not contain
/// the characters reserved by the serialized graph form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Vocabulary {
    words: Vec<String>,
    index: HashMap<String, WordId>,
}

impl Vocabulary {
    /// Collects `words`, dropping repeats silently.
    pub fn new<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut vocab = Self::default();
        for word in words {
            vocab.push(word.into())?;
        }
        Ok(vocab)
    }

    /// Parses a newline-delimited word list. Lines are trimmed and blank
    /// lines skipped.
    pub fn from_lines(text: &str) -> Result<Self> {
        Self::new(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    fn push(&mut self, word: String) -> Result<()> {
        if let Some(ch) = word.chars().find(|&c| is_reserved(c)) {
            return Err(GraphError::ReservedCharacter { word, ch });
        }
        if !self.index.contains_key(&word) {
            self.index.insert(word.clone(), self.words.len());
            self.words.push(word);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    pub fn id_of(&self, word: &str) -> Option<WordId> {
        self.index.get(word).copied()
    }

    /// The word with id `id`.
    ///
    /// # Panics
    /// If `id` is not below [`len`](Self::len).
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(String::as_str)
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// A new vocabulary holding the words that satisfy `keep`, in order.
    pub fn retain<F>(&self, mut keep: F) -> Vocabulary
    where
        F: FnMut(WordId, &str) -> bool,
    {
        let words: Vec<String> = self
            .words
            .iter()
            .enumerate()
            .filter(|(id, word)| keep(*id, word))
            .map(|(_, word)| word.clone())
            .collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(id, word)| (word.clone(), id))
            .collect();
        Vocabulary { words, index }
    }

    /// One word per line, in vocabulary order.
    pub fn to_lines(&self) -> String {
        let mut out = String::new();
        for word in &self.words {
            out.push_str(word);
            out.push('\n');
        }
        out
    }
}

impl TryFrom<Vec<String>> for Vocabulary {
    type Error = GraphError;

    fn try_from(words: Vec<String>) -> Result<Self> {
        Self::new(words)
    }
}

impl From<Vocabulary> for Vec<String> {
    fn from(vocab: Vocabulary) -> Self {
        vocab.words
    }
}
