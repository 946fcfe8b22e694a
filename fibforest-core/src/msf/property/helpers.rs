//! Shared helper functions for forest property-based tests.

use std::collections::HashMap;

use crate::graph::{DynamicGraph, Edge, VertexId};

use super::types::ForestFixture;

/// Graph under test plus the position of every live vertex in slot order.
pub(super) struct BuiltGraph {
    pub graph: DynamicGraph<usize, u32>,
    pub positions: HashMap<VertexId, usize>,
}

/// Builds the graph described by `fixture`, applying removals last.
pub(super) fn build_graph(fixture: &ForestFixture) -> BuiltGraph {
    let mut graph = DynamicGraph::new();
    let ids: Vec<VertexId> = (0..fixture.vertex_count)
        .map(|label| graph.insert_vertex(label))
        .collect();
    for &(a, b, weight) in &fixture.edges {
        graph
            .insert_edge(ids[a], ids[b], weight)
            .expect("generated edges join distinct vertices");
    }
    for &victim in &fixture.removed {
        graph
            .remove_vertex(ids[victim])
            .expect("generated removals are unique");
    }
    let positions = graph
        .vertices()
        .enumerate()
        .map(|(position, (id, _))| (id, position))
        .collect();
    BuiltGraph { graph, positions }
}

/// Path-compressing find for union-find verification.
pub(super) fn find_root(parent: &mut [usize], mut node: usize) -> usize {
    while parent[node] != node {
        parent[node] = parent[parent[node]];
        node = parent[node];
    }
    node
}

/// Sums edge weights without overflow.
pub(super) fn total_weight(edges: &[Edge<u32>]) -> u64 {
    edges.iter().map(|edge| u64::from(*edge.weight())).sum()
}
