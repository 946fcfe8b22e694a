//! Type definitions for forest property-based tests.

use test_strategy::Arbitrary;

/// Shape of the generated graph.
///
/// Each shape stresses a different part of the frontier handling.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// Random graph with weights drawn from a wide range.
    #[weight(2)]
    Unique,
    /// Large groups of edges share identical weights, stressing tie-breaking.
    #[weight(3)]
    ManyIdentical,
    /// Random spanning tree plus a few extra edges, up to a few hundred
    /// vertices.
    #[weight(2)]
    Sparse,
    /// Graph approaching a complete graph.
    #[weight(2)]
    Dense,
    /// Several components with no cross-component edges.
    #[weight(2)]
    Disconnected,
    /// Random graph with some vertices removed after construction.
    #[weight(2)]
    Churned,
}

/// Fixture for forest property tests.
///
/// Vertices are `0..vertex_count`; `removed` lists vertices deleted after
/// every edge has been inserted.
#[derive(Clone, Debug)]
pub(super) struct ForestFixture {
    /// Number of vertices inserted.
    pub vertex_count: usize,
    /// Undirected `(a, b, weight)` edges in insertion order.
    pub edges: Vec<(usize, usize, u32)>,
    /// Vertices removed after construction.
    pub removed: Vec<usize>,
    /// Shape used during generation.
    pub shape: GraphShape,
}
