// File: src/error.rs
//! Crate-wide error type.
//!
//! Building and analysing a graph never fails once a [`Vocabulary`] exists;
//! the fallible edges are vocabulary validation, decoding serialized graphs,
//! and file I/O. `GraphError` bridges all of them.
//!
//! [`Vocabulary`]: crate::core::vocabulary::Vocabulary

use crate::codec::DecodeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    /// A serialized record failed validation.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// A required lookup named a word the graph does not hold.
    #[error("word {0:?} is not in the graph")]
    MissingWord(String),

    /// A word contains a character the serialized form reserves.
    #[error("word {word:?} contains reserved character {ch:?}")]
    ReservedCharacter { word: String, ch: char },

    /// The same key appeared twice in a serialized graph.
    #[error("serialized graph lists word {0:?} more than once")]
    DuplicateWord(String),

    #[error("snapshot does not match its vocabulary: {0}")]
    CorruptSnapshot(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot encoding error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    /// True for failures caused by the content of an input file rather than
    /// by the file system.
    pub fn is_invalid_input(&self) -> bool {
        !matches!(self, GraphError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, GraphError>;
