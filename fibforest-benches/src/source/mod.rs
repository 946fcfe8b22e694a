//! Seeded synthetic inputs for the benchmarks.
//!
//! Graphs are built as a random spanning tree plus extra random chords, so
//! every generated graph is connected and the forest builder visits every
//! vertex through the heap.

use fibforest_core::{DynamicGraph, GraphError, VertexId};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;

/// Upper bound, exclusive, for generated edge weights.
const MAX_WEIGHT: f64 = 1_000.0;

/// Errors raised while generating synthetic inputs.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// A graph must have at least one vertex.
    #[error("vertex_count must be greater than zero")]
    ZeroVertices,
    /// More chords were requested than the complete graph can hold.
    #[error("{requested} extra edges exceed the {available} free vertex pairs")]
    TooManyEdges {
        /// Chords requested by the caller.
        requested: usize,
        /// Pairs not already used by the spanning tree.
        available: usize,
    },
    /// The graph store rejected a generated edge.
    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// Shape of a synthetic graph.
#[derive(Clone, Copy, Debug)]
pub struct SyntheticGraphConfig {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Edges added on top of the `vertex_count - 1` spanning tree edges.
    pub extra_edges: usize,
    /// RNG seed.
    pub seed: u64,
}

/// A generated graph with its vertex ids in insertion order.
#[derive(Debug)]
pub struct SyntheticGraph {
    graph: DynamicGraph<u32, f64>,
    vertices: Vec<VertexId>,
}

impl SyntheticGraph {
    /// Generates a connected graph described by `config`.
    ///
    /// # Errors
    /// Returns [`SyntheticError`] when the configuration cannot be satisfied.
    pub fn generate(config: &SyntheticGraphConfig) -> Result<Self, SyntheticError> {
        let available = free_pairs(config.vertex_count)?;
        if config.extra_edges > available {
            return Err(SyntheticError::TooManyEdges {
                requested: config.extra_edges,
                available,
            });
        }

        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut graph = DynamicGraph::new();
        let vertices: Vec<VertexId> = (0..config.vertex_count)
            .map(|index| graph.insert_vertex(u32::try_from(index).unwrap_or(u32::MAX)))
            .collect();

        for (offset, &vertex) in vertices.iter().enumerate().skip(1) {
            if let Some(&parent) = vertices.get(rng.gen_range(0..offset)) {
                connect(&mut graph, parent, vertex, &mut rng)?;
            }
        }

        let mut added = 0;
        while added < config.extra_edges {
            let first = vertices.get(rng.gen_range(0..vertices.len()));
            let second = vertices.get(rng.gen_range(0..vertices.len()));
            let (Some(&a), Some(&b)) = (first, second) else {
                continue;
            };
            if a == b || graph.are_adjacent(a, b)? {
                continue;
            }
            connect(&mut graph, a, b, &mut rng)?;
            added += 1;
        }

        Ok(Self { graph, vertices })
    }

    /// Returns the generated graph.
    #[must_use]
    pub const fn graph(&self) -> &DynamicGraph<u32, f64> {
        &self.graph
    }

    /// Returns the vertex ids in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }
}

fn free_pairs(vertex_count: usize) -> Result<usize, SyntheticError> {
    let tree_edges = vertex_count
        .checked_sub(1)
        .ok_or(SyntheticError::ZeroVertices)?;
    // n * (n - 1) is always even, so halving with a shift is exact.
    let complete = vertex_count.saturating_mul(tree_edges) >> 1;
    Ok(complete.saturating_sub(tree_edges))
}

fn connect(
    graph: &mut DynamicGraph<u32, f64>,
    a: VertexId,
    b: VertexId,
    rng: &mut SmallRng,
) -> Result<(), GraphError> {
    graph.insert_edge(a, b, rng.gen_range(0.0..MAX_WEIGHT))?;
    Ok(())
}

/// Returns `count` seeded keys for heap workloads.
#[must_use]
pub fn random_keys(count: usize, seed: u64) -> Vec<u64> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count).map(|_| rng.r#gen()).collect()
}
