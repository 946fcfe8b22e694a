//! Equivalence with the sequential Kruskal oracle.
//!
//! Minimum spanning forests need not be unique, but their total weight, edge
//! count, and component count are.

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::msf::minimum_spanning_forest;

use super::helpers::{build_graph, total_weight};
use super::oracle::sequential_kruskal;
use super::types::ForestFixture;

/// Runs the oracle equivalence property for the given fixture.
pub(super) fn run_oracle_equivalence_property(fixture: &ForestFixture) -> TestCaseResult {
    let built = build_graph(fixture);
    let forest = minimum_spanning_forest(&built.graph, 0, u32::MAX).map_err(|e| {
        TestCaseError::fail(format!(
            "minimum_spanning_forest failed: {e} (shape={:?}, vertices={}, edges={})",
            fixture.shape,
            built.graph.vertex_count(),
            built.graph.edge_count(),
        ))
    })?;
    let oracle = sequential_kruskal(&built);

    let prim_weight = total_weight(forest.edges());
    if prim_weight != oracle.total_weight {
        return Err(TestCaseError::fail(format!(
            "total weight mismatch: prim={prim_weight}, oracle={} (shape={:?}, vertices={})",
            oracle.total_weight,
            fixture.shape,
            built.graph.vertex_count(),
        )));
    }
    if forest.edges().len() != oracle.edge_count {
        return Err(TestCaseError::fail(format!(
            "edge count mismatch: prim={}, oracle={} (shape={:?})",
            forest.edges().len(),
            oracle.edge_count,
            fixture.shape,
        )));
    }
    if forest.component_count() != oracle.component_count {
        return Err(TestCaseError::fail(format!(
            "component count mismatch: prim={}, oracle={} (shape={:?})",
            forest.component_count(),
            oracle.component_count,
            fixture.shape,
        )));
    }
    Ok(())
}
