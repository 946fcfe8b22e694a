//! Benchmark parameter types.
//!
//! Each type renders as the Criterion parameter label for one input size.

use std::fmt;

/// Parameters for a heap benchmark run.
#[derive(Clone, Debug)]
pub struct HeapBenchParams {
    /// Number of elements inserted before the measured operation.
    pub element_count: usize,
}

impl fmt::Display for HeapBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={}", self.element_count)
    }
}

/// Parameters for a minimum spanning forest benchmark run.
#[derive(Clone, Debug)]
pub struct ForestBenchParams {
    /// Number of vertices in the graph.
    pub vertex_count: usize,
    /// Number of edges in the graph.
    pub edge_count: usize,
}

impl fmt::Display for ForestBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v={},e={}", self.vertex_count, self.edge_count)
    }
}
