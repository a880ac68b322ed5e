// File: src/config.rs
//! Tunables for building graphs and rendering reports.

/// Members listed per component in a connectivity report.
pub const DEFAULT_SAMPLE_MEMBERS: usize = 10;
/// Isolated words listed before the report truncates with a count.
pub const DEFAULT_LISTED_ISOLATES: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    /// Sort each position's insert/replace letters once construction is done.
    /// Without it letters keep discovery order.
    pub sort_candidates: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportConfig {
    pub sample_members: usize,
    pub listed_isolates: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sample_members: DEFAULT_SAMPLE_MEMBERS,
            listed_isolates: DEFAULT_LISTED_ISOLATES,
        }
    }
}
