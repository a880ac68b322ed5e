pub mod adjacency;
pub mod builder;
