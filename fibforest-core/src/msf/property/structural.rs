//! Structural invariant verification.
//!
//! For any forest produced by the builder, verifies:
//!
//! - every forest edge is a live edge of the input graph;
//! - the forest is acyclic;
//! - it has `V - C` edges for `C` connected components;
//! - a connected input yields a spanning tree;
//! - the input graph is left untouched.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::msf::{MinimumSpanningForest, minimum_spanning_forest};

use super::helpers::{BuiltGraph, build_graph, find_root};
use super::oracle::sequential_kruskal;
use super::types::ForestFixture;

/// Runs the structural invariant property for the given fixture.
pub(super) fn run_structural_invariants_property(fixture: &ForestFixture) -> TestCaseResult {
    let built = build_graph(fixture);
    let (vertices, edges) = (built.graph.vertex_count(), built.graph.edge_count());
    let forest = minimum_spanning_forest(&built.graph, 0, u32::MAX)
        .map_err(|e| TestCaseError::fail(format!("minimum_spanning_forest failed: {e}")))?;

    validate_membership(&built, &forest)?;
    validate_acyclicity(&built, &forest)?;
    validate_edge_count(vertices, &forest)?;
    validate_connectivity(&built, &forest)?;

    if built.graph.vertex_count() != vertices || built.graph.edge_count() != edges {
        return Err(TestCaseError::fail("input graph changed during the run"));
    }
    Ok(())
}

/// Verifies that every forest edge exists in the graph unchanged.
fn validate_membership(built: &BuiltGraph, forest: &MinimumSpanningForest<u32>) -> TestCaseResult {
    for (i, edge) in forest.edges().iter().enumerate() {
        if built.graph.edge(edge.id()) != Some(edge) {
            return Err(TestCaseError::fail(format!(
                "edge {i}: {} is not a live edge of the graph",
                edge.id(),
            )));
        }
    }
    Ok(())
}

/// Detects cycles in the forest using union-find.
fn validate_acyclicity(built: &BuiltGraph, forest: &MinimumSpanningForest<u32>) -> TestCaseResult {
    let mut parent: Vec<usize> = (0..built.graph.vertex_count()).collect();
    for (i, edge) in forest.edges().iter().enumerate() {
        let ra = find_root(&mut parent, built.positions[&edge.from()]);
        let rb = find_root(&mut parent, built.positions[&edge.to()]);
        if ra == rb {
            return Err(TestCaseError::fail(format!(
                "edge {i}: ({}, {}) creates a cycle",
                edge.from(),
                edge.to(),
            )));
        }
        parent[rb] = ra;
    }
    Ok(())
}

/// Verifies that the forest has exactly `n - c` edges for `c` components.
fn validate_edge_count(vertex_count: usize, forest: &MinimumSpanningForest<u32>) -> TestCaseResult {
    let expected = vertex_count.saturating_sub(forest.component_count());
    let actual = forest.edges().len();
    if actual != expected {
        return Err(TestCaseError::fail(format!(
            "edge count {actual}, expected n - c = {expected} (n={vertex_count}, c={})",
            forest.component_count(),
        )));
    }
    Ok(())
}

/// Verifies that a connected input produces a spanning tree.
fn validate_connectivity(built: &BuiltGraph, forest: &MinimumSpanningForest<u32>) -> TestCaseResult {
    let input_components = sequential_kruskal(built).component_count;
    if input_components == 1 && !forest.is_tree() {
        return Err(TestCaseError::fail(format!(
            "input is connected but output has {} components",
            forest.component_count(),
        )));
    }
    Ok(())
}
