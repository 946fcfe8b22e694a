//! Sequential Kruskal oracle for forest property verification.

use super::helpers::{BuiltGraph, find_root};

/// Result of the Kruskal oracle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) struct KruskalResult {
    /// Total weight of the forest.
    pub total_weight: u64,
    /// Number of forest edges.
    pub edge_count: usize,
    /// Number of connected components.
    pub component_count: usize,
}

/// Computes a minimum spanning forest of the built graph with Kruskal's
/// algorithm.
pub(super) fn sequential_kruskal(built: &BuiltGraph) -> KruskalResult {
    let vertex_count = built.graph.vertex_count();
    let mut edges: Vec<(u32, usize, usize)> = built
        .graph
        .edges()
        .map(|edge| {
            (
                *edge.weight(),
                built.positions[&edge.from()],
                built.positions[&edge.to()],
            )
        })
        .collect();
    edges.sort_unstable();

    let mut parent: Vec<usize> = (0..vertex_count).collect();
    let mut components = vertex_count;
    let mut total_weight = 0_u64;
    let mut edge_count = 0_usize;
    for (weight, a, b) in edges {
        let ra = find_root(&mut parent, a);
        let rb = find_root(&mut parent, b);
        if ra != rb {
            parent[rb] = ra;
            total_weight += u64::from(weight);
            edge_count += 1;
            components -= 1;
        }
    }

    KruskalResult {
        total_weight,
        edge_count,
        component_count: components,
    }
}
