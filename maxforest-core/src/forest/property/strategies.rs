//! Strategy builders for forest property-based tests.
//!
//! Every generator is driven by a seeded [`SmallRng`], so a failing proptest
//! case can be replayed from its `(shape, seed)` pair alone.

use proptest::prelude::*;
use rand::{Rng, SeedableRng, rngs::SmallRng};

use super::types::{ForestFixture, GraphShape};

/// Minimum node count for most generated graphs.
const MIN_NODES: usize = 2;
/// Maximum node count for most generated graphs.
const MAX_NODES: usize = 64;
/// Maximum node count for dense graphs.
const DENSE_MAX_NODES: usize = 24;
/// Largest graph the exhaustive oracle is asked to check.
pub(super) const ORACLE_MAX_NODES: usize = 8;
/// Largest edge count the exhaustive oracle is asked to check.
pub(super) const ORACLE_MAX_EDGES: usize = 12;

/// Generates fixtures covering every [`GraphShape`].
pub(super) fn fixture_strategy() -> impl Strategy<Value = ForestFixture> {
    (any::<GraphShape>(), any::<u64>()).prop_map(|(shape, seed)| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_fixture(shape, &mut rng)
    })
}

/// Generates graphs small enough for exhaustive subset enumeration.
///
/// Weights are small integers (with the occasional absent weight) so ties are
/// frequent and every total is exact.
pub(super) fn small_fixture_strategy() -> impl Strategy<Value = ForestFixture> {
    any::<u64>().prop_map(|seed| {
        let mut rng = SmallRng::seed_from_u64(seed);
        generate_small(&mut rng)
    })
}

/// Generates a fixture for a specific shape.
pub(super) fn generate_fixture(shape: GraphShape, rng: &mut SmallRng) -> ForestFixture {
    let (node_count, edges) = match shape {
        GraphShape::Unique => probabilistic(rng, MAX_NODES, (0.1, 0.4), |r| {
            Some(r.gen_range(-50.0..100.0))
        }),
        GraphShape::ManyIdentical => {
            let pool: Vec<f64> = (0..rng.gen_range(2..=3))
                .map(|_| f64::from(rng.gen_range(1_u8..=5)))
                .collect();
            probabilistic(rng, MAX_NODES, (0.2, 0.5), move |r| {
                Some(pool[r.gen_range(0..pool.len())])
            })
        }
        GraphShape::Sparse => sparse(rng),
        GraphShape::Dense => probabilistic(rng, DENSE_MAX_NODES, (0.7, 0.95), |r| {
            Some(r.gen_range(0.0..10.0))
        }),
        GraphShape::Disconnected => disconnected(rng),
        GraphShape::Degenerate => degenerate(rng),
    };
    ForestFixture {
        node_count,
        edges,
        shape,
    }
}

type RawEdges = Vec<(usize, usize, Option<f64>)>;

fn probabilistic(
    rng: &mut SmallRng,
    max_nodes: usize,
    probability_range: (f64, f64),
    mut weight: impl FnMut(&mut SmallRng) -> Option<f64>,
) -> (usize, RawEdges) {
    let node_count = rng.gen_range(MIN_NODES..=max_nodes);
    let probability = rng.gen_range(probability_range.0..=probability_range.1);
    let mut edges = Vec::new();
    for source in 0..node_count {
        for target in (source + 1)..node_count {
            if rng.gen_bool(probability) {
                let (a, b) = orient(source, target, rng);
                edges.push((a, b, weight(rng)));
            }
        }
    }
    (node_count, edges)
}

/// A random spanning path plus roughly `n / 2` extra edges.
fn sparse(rng: &mut SmallRng) -> (usize, RawEdges) {
    let node_count = rng.gen_range(MIN_NODES..=MAX_NODES);
    let mut order: Vec<usize> = (0..node_count).collect();
    shuffle(&mut order, rng);

    let mut edges: RawEdges = order
        .windows(2)
        .map(|pair| (pair[0], pair[1], Some(rng.gen_range(0.0..50.0))))
        .collect();
    for _ in 0..node_count / 2 {
        let source = rng.gen_range(0..node_count);
        let target = rng.gen_range(0..node_count);
        if source != target {
            edges.push((source, target, Some(rng.gen_range(0.0..50.0))));
        }
    }
    shuffle(&mut edges, rng);
    (node_count, edges)
}

/// Two to five components with internal edges only, then a few isolated
/// nodes at the end.
fn disconnected(rng: &mut SmallRng) -> (usize, RawEdges) {
    let mut edges = Vec::new();
    let mut offset = 0;
    for _ in 0..rng.gen_range(2..=5) {
        let size = rng.gen_range(1..=10);
        for source in offset..offset + size {
            for target in (source + 1)..offset + size {
                if rng.gen_bool(0.5) {
                    edges.push((source, target, Some(f64::from(rng.gen_range(-5_i8..=20)))));
                }
            }
        }
        offset += size;
    }
    let node_count = offset + rng.gen_range(0..=3);
    (node_count, edges)
}

/// Random endpoints with self-loops, parallel edges, and unusable weights.
fn degenerate(rng: &mut SmallRng) -> (usize, RawEdges) {
    let node_count = rng.gen_range(1..=24);
    let edge_count = rng.gen_range(0..=node_count * 3);
    let edges = (0..edge_count)
        .map(|_| {
            let source = rng.gen_range(0..node_count);
            let target = if rng.gen_bool(0.15) {
                source
            } else {
                rng.gen_range(0..node_count)
            };
            (source, target, awkward_weight(rng))
        })
        .collect();
    (node_count, edges)
}

fn generate_small(rng: &mut SmallRng) -> ForestFixture {
    let node_count = rng.gen_range(1..=ORACLE_MAX_NODES);
    let edge_count = rng.gen_range(0..=ORACLE_MAX_EDGES);
    let edges = (0..edge_count)
        .map(|_| {
            let source = rng.gen_range(0..node_count);
            let target = rng.gen_range(0..node_count);
            let weight = if rng.gen_bool(0.1) {
                None
            } else {
                Some(f64::from(rng.gen_range(-3_i8..=6)))
            };
            (source, target, weight)
        })
        .collect();
    ForestFixture {
        node_count,
        edges,
        shape: GraphShape::Degenerate,
    }
}

fn awkward_weight(rng: &mut SmallRng) -> Option<f64> {
    match rng.gen_range(0..10) {
        0 => None,
        1 => Some(f64::NAN),
        2 => Some(if rng.gen_bool(0.5) {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }),
        3 => Some(-0.0),
        _ => Some(f64::from(rng.gen_range(-10_i8..=10))),
    }
}

/// Returns the pair in a random direction; edges are undirected.
fn orient(a: usize, b: usize, rng: &mut SmallRng) -> (usize, usize) {
    if rng.gen_bool(0.5) { (a, b) } else { (b, a) }
}

/// Fisher-Yates shuffle using the provided RNG.
pub(super) fn shuffle<T>(slice: &mut [T], rng: &mut SmallRng) {
    for i in (1..slice.len()).rev() {
        let j = rng.gen_range(0..=i);
        slice.swap(i, j);
    }
}
