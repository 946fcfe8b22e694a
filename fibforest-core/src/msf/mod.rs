//! Minimum spanning forest construction.
//!
//! Grows one tree at a time with Prim's algorithm, using a
//! [`FibonacciHeap`] keyed by the cheapest known connection of every vertex
//! as the frontier. When the frontier yields a vertex with no connecting edge
//! the current tree is complete and a new one is rooted at that vertex, so
//! disconnected graphs produce one tree per component.

use std::cmp::Ordering;
use std::collections::HashMap;

use tracing::{debug, info, instrument};

use crate::error::MsfError;
use crate::graph::{DynamicGraph, Edge, VertexId};
use crate::heap::{FibonacciHeap, HeapHandle};
use crate::weight::{Weight, WeightKey};

/// The output of a minimum spanning forest computation.
///
/// When the input graph is connected, the forest is a minimum spanning tree.
#[derive(Clone, Debug, PartialEq)]
pub struct MinimumSpanningForest<W> {
    edges: Vec<Edge<W>>,
    component_count: usize,
}

impl<W> MinimumSpanningForest<W> {
    /// Returns the forest edges in the order they joined the forest.
    #[must_use]
    #[rustfmt::skip]
    pub fn edges(&self) -> &[Edge<W>] { &self.edges }

    /// Returns the number of trees in the forest, one per connected component.
    #[must_use]
    #[rustfmt::skip]
    pub fn component_count(&self) -> usize { self.component_count }

    /// Returns `true` when the forest spans a single connected component.
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.component_count == 1
    }

    /// Consumes the forest and returns its edges.
    #[must_use]
    pub fn into_edges(self) -> Vec<Edge<W>> {
        self.edges
    }
}

/// Per-vertex frontier state for one run.
struct FrontierEntry<'g, W> {
    handle: HeapHandle,
    best: Option<&'g Edge<W>>,
}

/// Computes a minimum spanning forest of `graph`.
///
/// `zero` seeds the first vertex in slot order and `infinity` seeds every
/// other vertex; an edge only joins the forest when its weight is strictly
/// below the key of the vertex it reaches, so edges weighing `infinity` or
/// more are never selected. Edges are returned in extraction order and the
/// graph is left untouched.
///
/// # Errors
/// Returns [`MsfError::InvalidSentinels`] when `zero` compares greater than
/// `infinity`. The remaining variants indicate internal logic errors.
///
/// # Examples
/// ```
/// use fibforest_core::{DynamicGraph, minimum_spanning_forest};
///
/// let mut graph = DynamicGraph::new();
/// let a = graph.insert_vertex("a");
/// let b = graph.insert_vertex("b");
/// let c = graph.insert_vertex("c");
/// graph.insert_edge(a, b, 1.0)?;
/// graph.insert_edge(b, c, 2.0)?;
/// graph.insert_edge(a, c, 5.0)?;
///
/// let forest = minimum_spanning_forest(&graph, 0.0, f64::MAX)?;
/// assert!(forest.is_tree());
/// assert_eq!(forest.edges().len(), 2);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(
    name = "core.msf",
    err,
    skip(graph, zero, infinity),
    fields(vertices = graph.vertex_count(), edges = graph.edge_count()),
)]
pub fn minimum_spanning_forest<L, W: Weight>(
    graph: &DynamicGraph<L, W>,
    zero: W,
    infinity: W,
) -> Result<MinimumSpanningForest<W>, MsfError> {
    if zero.total_cmp_weight(&infinity) == Ordering::Greater {
        return Err(MsfError::InvalidSentinels);
    }

    let vertex_count = graph.vertex_count();
    let mut frontier: FibonacciHeap<WeightKey<W>, VertexId> = FibonacciHeap::with_capacity(vertex_count);
    let mut entries: HashMap<VertexId, FrontierEntry<'_, W>> = HashMap::with_capacity(vertex_count);
    let mut seed = Some(zero);
    for (vertex, _) in graph.vertices() {
        let key = seed.take().unwrap_or_else(|| infinity.clone());
        let handle = frontier.insert(WeightKey(key), vertex);
        entries.insert(vertex, FrontierEntry { handle, best: None });
    }

    let mut edges = Vec::with_capacity(vertex_count.saturating_sub(1));
    let mut component_count = 0_usize;
    while let Some((_, vertex)) = frontier.extract_min() {
        match entries.get(&vertex).and_then(|entry| entry.best) {
            Some(edge) => edges.push(edge.clone()),
            None => {
                component_count += 1;
                debug!(root = %vertex, "rooting new tree");
            }
        }

        for (neighbour, edge) in graph.incident_edges(vertex)? {
            let Some(entry) = entries.get_mut(&neighbour) else {
                continue;
            };
            // Extracted vertices are no longer contained and yield no key.
            let improves = frontier
                .key(&entry.handle)
                .is_some_and(|current| edge.weight().total_cmp_weight(&current.0).is_lt());
            if improves {
                frontier.decrease_key(&entry.handle, WeightKey(edge.weight().clone()))?;
                entry.best = Some(edge);
            }
        }
    }

    info!(
        forest_edges = edges.len(),
        components = component_count,
        "minimum spanning forest computed"
    );
    Ok(MinimumSpanningForest {
        edges,
        component_count,
    })
}

#[cfg(test)]
mod property;
