//! Synthetic graph source for benchmarking.
//!
//! Provides [`SyntheticGraph`], a seeded random graph over `usize` node
//! identifiers. Every node after the first is attached to an earlier node so
//! the graph is connected; the remaining edges join uniformly random pairs.
//! Weights are drawn from a small set of integer levels so ties are common.

use maxforest_core::GraphSnapshot;
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Errors that may occur during synthetic graph generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum SyntheticError {
    /// The requested node count was zero.
    #[error("node count must be greater than zero")]
    ZeroNodes,
    /// The requested number of weight levels was zero.
    #[error("weight levels must be greater than zero")]
    ZeroWeightLevels,
}

/// Configuration for synthetic graph generation.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes to generate.
    pub node_count: usize,
    /// Average number of edges per node; values below one still yield a
    /// spanning backbone.
    pub edges_per_node: usize,
    /// Number of distinct integer weights.
    pub weight_levels: u32,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

/// A seeded random graph for benchmarking.
///
/// # Examples
///
/// ```
/// use maxforest_benches::source::{SyntheticConfig, SyntheticGraph};
///
/// let config = SyntheticConfig { node_count: 10, edges_per_node: 3, weight_levels: 4, seed: 42 };
/// let graph = SyntheticGraph::generate(&config).expect("valid config");
/// assert_eq!(graph.snapshot().node_count(), 10);
/// assert_eq!(graph.snapshot().edge_count(), 30);
/// ```
#[derive(Clone, Debug)]
pub struct SyntheticGraph {
    snapshot: GraphSnapshot<usize>,
}

impl SyntheticGraph {
    /// Generates the graph eagerly from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SyntheticError::ZeroNodes`] if `node_count` is zero, or
    /// [`SyntheticError::ZeroWeightLevels`] if `weight_levels` is zero.
    pub fn generate(config: &SyntheticConfig) -> Result<Self, SyntheticError> {
        if config.node_count == 0 {
            return Err(SyntheticError::ZeroNodes);
        }
        if config.weight_levels == 0 {
            return Err(SyntheticError::ZeroWeightLevels);
        }

        let n = config.node_count;
        let target = n.saturating_mul(config.edges_per_node).max(n - 1);
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let mut edges = Vec::with_capacity(target);

        for node in 1..n {
            let parent = rng.gen_range(0..node);
            edges.push((parent, node, Some(draw_weight(&mut rng, config.weight_levels))));
        }
        while edges.len() < target {
            let source = rng.gen_range(0..n);
            let target_node = rng.gen_range(0..n);
            edges.push((
                source,
                target_node,
                Some(draw_weight(&mut rng, config.weight_levels)),
            ));
        }

        Ok(Self {
            snapshot: GraphSnapshot::with_positional_edges(0..n, edges),
        })
    }

    /// Returns the generated snapshot.
    #[must_use]
    pub const fn snapshot(&self) -> &GraphSnapshot<usize> {
        &self.snapshot
    }
}

fn draw_weight(rng: &mut SmallRng, levels: u32) -> f64 {
    f64::from(rng.gen_range(0..levels))
}
