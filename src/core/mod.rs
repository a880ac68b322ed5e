pub mod graph;
pub mod types;
pub mod vocabulary;
