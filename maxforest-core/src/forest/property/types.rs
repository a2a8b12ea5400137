//! Type definitions for forest property-based tests.
//!
//! Provides the graph shapes sampled by the strategies and the fixture passed
//! to every property runner.

use test_strategy::Arbitrary;

use crate::{
    ExecutionStrategy, ForestResult, GraphSnapshot, MaxForestBuilder, Result,
    error::WeightIssue,
};

/// Topology and weight pattern of a generated graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
pub(super) enum GraphShape {
    /// Distinct weights drawn from a continuous range.
    #[weight(2)]
    Unique,
    /// Weights drawn from a pool of two or three values, stressing the
    /// index tie-break.
    #[weight(3)]
    ManyIdentical,
    /// A random spanning path plus a handful of extra edges.
    #[weight(2)]
    Sparse,
    /// Close to a complete graph.
    #[weight(1)]
    Dense,
    /// Several components with no edges between them, plus isolated nodes.
    #[weight(2)]
    Disconnected,
    /// Self-loops, parallel edges, negative and unusable weights mixed in.
    #[weight(2)]
    Degenerate,
}

/// Generated graph in dense node positions.
///
/// Node identifiers are the positions themselves and edge indices are the
/// positions in `edges`, unless a property remaps them.
#[derive(Clone, Debug)]
pub(super) struct ForestFixture {
    /// Number of nodes in the graph.
    pub node_count: usize,
    /// `(source, target, weight)` triples in caller order.
    pub edges: Vec<(usize, usize, Option<f64>)>,
    /// Shape used during generation.
    pub shape: GraphShape,
}

impl ForestFixture {
    /// Returns the fixture as a snapshot keyed by node position.
    pub(super) fn snapshot(&self) -> GraphSnapshot<usize> {
        GraphSnapshot::with_positional_edges(0..self.node_count, self.edges.iter().copied())
    }

    /// Returns the weight the forest builder works with for edge `index`.
    pub(super) fn effective_weight(&self, index: usize) -> f64 {
        let weight = self.edges[index].2;
        match (weight, WeightIssue::classify(weight)) {
            (Some(weight), None) => weight,
            _ => 0.0,
        }
    }

    /// Runs the full computation with `strategy`.
    pub(super) fn compute(&self, strategy: ExecutionStrategy) -> Result<ForestResult<usize>> {
        MaxForestBuilder::new()
            .with_execution_strategy(strategy)
            .build()?
            .compute(&self.snapshot())
    }

    /// Short description used in failure messages.
    pub(super) fn describe(&self) -> String {
        format!(
            "shape={:?}, nodes={}, edges={}",
            self.shape,
            self.node_count,
            self.edges.len()
        )
    }
}
