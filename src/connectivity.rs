// File: src/connectivity.rs
//! Connected components of a word graph and the text report built from them.

use crate::config::ReportConfig;
use crate::core::graph::WordGraph;
use crate::core::types::WordId;
use crate::core::vocabulary::Vocabulary;
use std::fmt;

/// One maximal connected set of words, in traversal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    members: Vec<WordId>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_isolated(&self) -> bool {
        self.members.len() == 1
    }

    pub fn ids(&self) -> &[WordId] {
        &self.members
    }

    pub fn words<'g>(&'g self, graph: &'g WordGraph) -> impl Iterator<Item = &'g str> + 'g {
        self.members.iter().map(|&id| graph.vocabulary().word(id))
    }
}

/// Partitions a graph into components with an explicit-stack depth-first
/// traversal. Starts are taken in vocabulary order and neighbors are visited
/// in ascending id order, so the partition and its order are reproducible.
pub struct ConnectivityAnalyzer<'g> {
    graph: &'g WordGraph,
}

impl<'g> ConnectivityAnalyzer<'g> {
    pub fn new(graph: &'g WordGraph) -> Self {
        Self { graph }
    }

    /// Components in discovery order.
    pub fn components(&self) -> Vec<Component> {
        let n = self.graph.len();
        let mut visited = vec![false; n];
        let mut stack: Vec<WordId> = Vec::new();
        let mut components = Vec::new();

        for start in 0..n {
            if visited[start] {
                continue;
            }
            let mut members = Vec::new();
            stack.push(start);
            while let Some(id) = stack.pop() {
                if visited[id] {
                    continue;
                }
                visited[id] = true;
                members.push(id);
                // Reversed so the smallest id is popped first.
                for next in self.graph.neighbor_ids(id).into_iter().rev() {
                    if !visited[next] {
                        stack.push(next);
                    }
                }
            }
            components.push(Component { members });
        }
        components
    }

    /// Components sorted largest first; ties keep discovery order.
    pub fn analyze(&self) -> ConnectivityReport<'g> {
        let mut components = self.components();
        components.sort_by_key(|c| std::cmp::Reverse(c.len()));

        let mut component_of = vec![0; self.graph.len()];
        for (index, component) in components.iter().enumerate() {
            for &id in component.ids() {
                component_of[id] = index;
            }
        }
        tracing::info!(
            words = self.graph.len(),
            components = components.len(),
            isolated = components.iter().filter(|c| c.is_isolated()).count(),
            "connectivity analysed"
        );
        ConnectivityReport {
            graph: self.graph,
            components,
            component_of,
        }
    }
}

/// Result of [`ConnectivityAnalyzer::analyze`].
pub struct ConnectivityReport<'g> {
    graph: &'g WordGraph,
    components: Vec<Component>,
    component_of: Vec<usize>,
}

impl<'g> ConnectivityReport<'g> {
    pub fn total_words(&self) -> usize {
        self.graph.len()
    }

    /// Largest first.
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.components.iter().map(Component::len).collect()
    }

    /// The component holding `word`, if the graph has it.
    pub fn component_of(&self, word: &str) -> Option<&Component> {
        let id = self.graph.vocabulary().id_of(word)?;
        self.components.get(self.component_of[id])
    }

    /// Words with no neighbors at all, in report order.
    pub fn isolated(&self) -> Vec<&'g str> {
        let graph = self.graph;
        self.components
            .iter()
            .filter(|c| c.is_isolated())
            .flat_map(|c| c.ids())
            .map(|&id| graph.vocabulary().word(id))
            .collect()
    }

    /// The vocabulary restricted to words whose component has at least
    /// `min_size` members, in original order. Rebuild a graph from it rather
    /// than editing the existing one.
    pub fn retain_min_size(&self, min_size: usize) -> Vocabulary {
        self.graph
            .vocabulary()
            .retain(|id, _| self.components[self.component_of[id]].len() >= min_size)
    }

    /// Human-readable summary: totals, each multi-word component with a
    /// sample of its members, then the isolated words.
    pub fn render(&self, config: &ReportConfig) -> String {
        self.display(config).to_string()
    }

    /// The same report as [`render`](Self::render), written straight to any
    /// formatter.
    pub fn display<'r>(&'r self, config: &'r ReportConfig) -> ReportDisplay<'r, 'g> {
        ReportDisplay {
            report: self,
            config,
        }
    }
}

/// Formats a [`ConnectivityReport`] with a given [`ReportConfig`].
pub struct ReportDisplay<'r, 'g> {
    report: &'r ConnectivityReport<'g>,
    config: &'r ReportConfig,
}

impl fmt::Display for ReportDisplay<'_, '_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;
        let config = self.config;
        let isolated = report.isolated();

        writeln!(f, "Word graph connectivity report")?;
        writeln!(f, "==============================")?;
        writeln!(f, "Total words: {}", report.total_words())?;
        writeln!(f, "Connected components: {}", report.components.len())?;
        if let Some(largest) = report.components.first() {
            writeln!(f, "Largest component: {} words", largest.len())?;
        }
        writeln!(f, "Isolated words: {}", isolated.len())?;

        let grouped: Vec<&Component> =
            report.components.iter().filter(|c| !c.is_isolated()).collect();
        if !grouped.is_empty() {
            writeln!(f)?;
            writeln!(f, "Components (largest first):")?;
            for (rank, component) in grouped.iter().enumerate() {
                let sample: Vec<&str> = component
                    .words(report.graph)
                    .take(config.sample_members)
                    .collect();
                write!(
                    f,
                    "  #{}: {} words: {}",
                    rank + 1,
                    component.len(),
                    sample.join(", ")
                )?;
                if component.len() > sample.len() {
                    write!(f, ", ... (+{} more)", component.len() - sample.len())?;
                }
                writeln!(f)?;
            }
        }

        if !isolated.is_empty() {
            writeln!(f)?;
            writeln!(f, "Isolated words ({}):", isolated.len())?;
            for word in isolated.iter().take(config.listed_isolates) {
                writeln!(f, "  {word}")?;
            }
            if isolated.len() > config.listed_isolates {
                writeln!(f, "  ... and {} more", isolated.len() - config.listed_isolates)?;
            }
        }
        Ok(())
    }
}
