//! Shared test utilities for `fibforest-core`.

use fibforest_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::{DynamicGraph, VertexId};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `FIBFOREST_PBT_CASES` and
/// `FIBFOREST_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Builds a graph with `labels` as vertices and `(from, to, weight)` edges
/// addressed by position in `labels`.
///
/// Returns the graph together with the vertex ids in insertion order.
pub(crate) fn graph_from<L, W>(
    labels: impl IntoIterator<Item = L>,
    edges: &[(usize, usize, W)],
) -> (DynamicGraph<L, W>, Vec<VertexId>)
where
    W: Clone,
{
    let mut graph = DynamicGraph::new();
    let ids: Vec<VertexId> = labels
        .into_iter()
        .map(|label| graph.insert_vertex(label))
        .collect();
    for (from, to, weight) in edges {
        graph
            .insert_edge(ids[*from], ids[*to], weight.clone())
            .expect("fixture edges join distinct known vertices");
    }
    (graph, ids)
}
