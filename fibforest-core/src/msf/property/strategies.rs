//! Strategy builders for forest property-based tests.
//!
//! Each generator produces a [`ForestFixture`] from a seeded [`SmallRng`],
//! so failing cases can be replayed from the seed alone.

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::seq::{IteratorRandom, SliceRandom};
use rand::{Rng, SeedableRng};

use super::types::{ForestFixture, GraphShape};

/// Minimum vertex count for most generated graphs.
const MIN_VERTICES: usize = 8;
/// Maximum vertex count for most generated graphs.
const MAX_VERTICES: usize = 64;
/// Maximum vertex count for sparse graphs.
const SPARSE_MAX_VERTICES: usize = 300;
/// Maximum vertex count for dense graphs.
const DENSE_MAX_VERTICES: usize = 32;

/// Generates forest fixtures covering every graph shape.
pub(super) fn forest_fixture_strategy() -> impl Strategy<Value = ForestFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> ForestFixture {
    match shape {
        GraphShape::Unique => random_graph(rng, MAX_VERTICES, (0.2, 0.6), shape, |r| {
            r.gen_range(1..1_000_000)
        }),
        GraphShape::ManyIdentical => {
            let pool: Vec<u32> = (0..rng.gen_range(1..=3))
                .map(|_| rng.gen_range(1..=10))
                .collect();
            random_graph(rng, MAX_VERTICES, (0.3, 0.7), shape, move |r| {
                pool[r.gen_range(0..pool.len())]
            })
        }
        GraphShape::Sparse => sparse_graph(rng),
        GraphShape::Dense => random_graph(rng, DENSE_MAX_VERTICES, (0.7, 0.95), shape, |r| {
            r.gen_range(1..1000)
        }),
        GraphShape::Disconnected => disconnected_graph(rng),
        GraphShape::Churned => {
            let mut fixture = random_graph(rng, MAX_VERTICES, (0.2, 0.5), shape, |r| {
                r.gen_range(1..100)
            });
            let removals = rng.gen_range(1..=fixture.vertex_count / 4);
            fixture.removed = (0..fixture.vertex_count).choose_multiple(rng, removals);
            fixture.removed.shuffle(rng);
            fixture
        }
    }
}

/// Adds each vertex pair independently with a probability sampled from
/// `probability`.
fn random_graph(
    rng: &mut SmallRng,
    max_vertices: usize,
    probability: (f64, f64),
    shape: GraphShape,
    mut weight: impl FnMut(&mut SmallRng) -> u32,
) -> ForestFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=max_vertices);
    let edge_probability: f64 = rng.gen_range(probability.0..=probability.1);
    let mut edges = Vec::new();
    for a in 0..vertex_count {
        for b in (a + 1)..vertex_count {
            if rng.gen_bool(edge_probability) {
                let w = weight(rng);
                edges.push(oriented(rng, a, b, w));
            }
        }
    }
    ForestFixture {
        vertex_count,
        edges,
        removed: Vec::new(),
        shape,
    }
}

/// Builds a random spanning tree by walking a permutation, then adds a few
/// extra edges. Repeated pairs replace earlier edges in the graph.
fn sparse_graph(rng: &mut SmallRng) -> ForestFixture {
    let vertex_count = rng.gen_range(MIN_VERTICES..=SPARSE_MAX_VERTICES);
    let mut order: Vec<usize> = (0..vertex_count).collect();
    order.shuffle(rng);

    let mut edges = Vec::with_capacity(vertex_count * 2);
    for pair in order.windows(2) {
        let weight = rng.gen_range(1..10_000);
        edges.push((pair[0], pair[1], weight));
    }
    for _ in 0..rng.gen_range(vertex_count / 2..=vertex_count) {
        let a = rng.gen_range(0..vertex_count);
        let b = rng.gen_range(0..vertex_count);
        if a != b {
            let weight = rng.gen_range(1..10_000);
            edges.push((a, b, weight));
        }
    }
    ForestFixture {
        vertex_count,
        edges,
        removed: Vec::new(),
        shape: GraphShape::Sparse,
    }
}

/// Generates 2-5 components with random internal edges and occasionally an
/// isolated vertex.
fn disconnected_graph(rng: &mut SmallRng) -> ForestFixture {
    let sizes: Vec<usize> = (0..rng.gen_range(2..=5))
        .map(|_| rng.gen_range(1..=12))
        .collect();
    let mut edges = Vec::new();
    let mut offset = 0;
    for &size in &sizes {
        let probability: f64 = rng.gen_range(0.3..=0.8);
        for a in offset..offset + size {
            for b in (a + 1)..offset + size {
                if rng.gen_bool(probability) {
                    let weight = rng.gen_range(1..500);
                    edges.push(oriented(rng, a, b, weight));
                }
            }
        }
        offset += size;
    }
    ForestFixture {
        vertex_count: offset,
        edges,
        removed: Vec::new(),
        shape: GraphShape::Disconnected,
    }
}

/// Randomises endpoint order so edges are not always inserted low-to-high.
fn oriented(rng: &mut SmallRng, a: usize, b: usize, weight: u32) -> (usize, usize, u32) {
    if rng.gen_bool(0.5) { (a, b, weight) } else { (b, a, weight) }
}
