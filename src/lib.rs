// src/lib.rs
//! Single-letter edit graph over a vocabulary: which deletions, insertions
//! and replacements (case changes included) turn one word into another, a
//! compact serialized form of that data, and connectivity analysis.

pub mod codec;
pub mod config;
pub mod connectivity;
pub mod core;
pub mod edit;
pub mod error;
pub mod persistence;

pub use crate::codec::{decode, encode, SerializedGraph, SerializedRecord};
pub use crate::connectivity::{ConnectivityAnalyzer, ConnectivityReport, ReportDisplay};
pub use crate::core::graph::WordGraph;
pub use crate::core::types::{Edit, LetterSet, WordId, WordRecord};
pub use crate::core::vocabulary::Vocabulary;
pub use crate::edit::builder::{build_graph, GraphBuilder};
pub use crate::error::{GraphError, Result};
