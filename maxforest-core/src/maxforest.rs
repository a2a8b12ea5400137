//! Maximum spanning forest orchestration.
//!
//! Provides the [`MaxForest`] entry point, which runs the snapshot adapter,
//! the greedy forest builder, and the rank assigner in sequence, plus the
//! [`compute_maximum_spanning_forest`] convenience wrapper for default
//! settings.

use tracing::{info, instrument};

use crate::{
    Result,
    builder::{
        DEFAULT_PARALLEL_SORT_THRESHOLD, ExecutionStrategy, MaxForestBuilder,
        NonFiniteWeightPolicy,
    },
    forest::{self, SortMode},
    rank,
    result::ForestResult,
    snapshot::{GraphSnapshot, NodeKey, normalize},
};

/// Entry point for computing maximum spanning forests.
///
/// Instances are immutable and cheap to clone. A single instance may be used
/// from several threads at once; each call owns all of its working state.
///
/// # Examples
/// ```
/// use maxforest_core::{GraphSnapshot, MaxForestBuilder};
///
/// let forest = MaxForestBuilder::new().build()?;
/// let graph = GraphSnapshot::with_positional_edges(
///     [1_u32, 2, 3, 4],
///     [(1, 2, Some(1.0)), (3, 4, Some(4.0))],
/// );
/// let result = forest.compute(&graph)?;
/// assert_eq!(result.tree_count(), 2);
/// assert_eq!(result.total_weight(), 5.0);
/// # Ok::<(), maxforest_core::ForestError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxForest {
    execution_strategy: ExecutionStrategy,
    parallel_sort_threshold: usize,
    non_finite_weights: NonFiniteWeightPolicy,
}

impl Default for MaxForest {
    fn default() -> Self {
        Self::new(
            ExecutionStrategy::Auto,
            DEFAULT_PARALLEL_SORT_THRESHOLD,
            NonFiniteWeightPolicy::SubstituteZero,
        )
    }
}

impl MaxForest {
    pub(crate) fn new(
        execution_strategy: ExecutionStrategy,
        parallel_sort_threshold: usize,
        non_finite_weights: NonFiniteWeightPolicy,
    ) -> Self {
        Self {
            execution_strategy,
            parallel_sort_threshold,
            non_finite_weights,
        }
    }

    /// Returns a builder for custom configurations.
    #[must_use]
    pub fn builder() -> MaxForestBuilder {
        MaxForestBuilder::new()
    }

    /// Returns the execution strategy used for the edge sort.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the edge count at which [`ExecutionStrategy::Auto`] sorts in
    /// parallel.
    #[must_use]
    pub fn parallel_sort_threshold(&self) -> usize {
        self.parallel_sort_threshold
    }

    /// Returns the policy applied to absent or non-finite weights.
    #[must_use]
    pub fn non_finite_weights(&self) -> NonFiniteWeightPolicy {
        self.non_finite_weights
    }

    /// Computes the maximum-weight spanning forest of `graph`, picks a root per
    /// tree, and ranks every node.
    ///
    /// The result depends only on the snapshot contents: repeated calls, and
    /// calls under different execution strategies, return equal results.
    ///
    /// # Errors
    /// Returns [`crate::ForestError::DuplicateNodeId`],
    /// [`crate::ForestError::DuplicateEdgeIndex`], or
    /// [`crate::ForestError::InvalidEdgeReference`] for malformed snapshots,
    /// and [`crate::ForestError::NonFiniteWeight`] when
    /// [`NonFiniteWeightPolicy::Reject`] is configured. No partial result is
    /// produced on error.
    ///
    /// # Examples
    /// ```
    /// use maxforest_core::{ForestError, GraphSnapshot, MaxForest};
    ///
    /// let graph = GraphSnapshot::with_positional_edges(["a", "b"], [("a", "z", Some(1.0))]);
    /// let err = MaxForest::default().compute(&graph).expect_err("z is unknown");
    /// assert!(matches!(err, ForestError::InvalidEdgeReference { edge: 0, .. }));
    /// ```
    #[instrument(
        name = "forest.compute",
        err,
        skip(self, graph),
        fields(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            strategy = self.execution_strategy.as_str(),
        ),
    )]
    pub fn compute<Id: NodeKey>(&self, graph: &GraphSnapshot<Id>) -> Result<ForestResult<Id>> {
        let normalized = normalize(graph, self.non_finite_weights)?;
        let mode = self.sort_mode(normalized.edges.len());
        let forest = forest::build(normalized.nodes.len(), &normalized.edges, mode)?;
        let ranking = rank::assign(&forest, &normalized.edges, normalized.nodes);
        let result = ForestResult::assemble(&normalized, &forest, &ranking);

        info!(
            trees = result.tree_count(),
            selected_edges = result.selected_edge_indices().len(),
            total_weight = result.total_weight(),
            warnings = result.warnings().len(),
            "maximum spanning forest computed"
        );
        Ok(result)
    }

    fn sort_mode(&self, edge_count: usize) -> SortMode {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => SortMode::Sequential,
            ExecutionStrategy::Parallel => SortMode::Parallel,
            ExecutionStrategy::Auto
                if cfg!(feature = "parallel") && edge_count >= self.parallel_sort_threshold =>
            {
                SortMode::Parallel
            }
            ExecutionStrategy::Auto => SortMode::Sequential,
        }
    }
}

/// Computes a maximum spanning forest with the default configuration.
///
/// # Errors
/// See [`MaxForest::compute`].
///
/// # Examples
/// ```
/// use maxforest_core::{GraphSnapshot, compute_maximum_spanning_forest};
///
/// let graph: GraphSnapshot<&str> = GraphSnapshot::new([], []);
/// let result = compute_maximum_spanning_forest(&graph)?;
/// assert_eq!(result.tree_count(), 0);
/// assert!(result.selected_edge_indices().is_empty());
/// # Ok::<(), maxforest_core::ForestError>(())
/// ```
pub fn compute_maximum_spanning_forest<Id: NodeKey>(
    graph: &GraphSnapshot<Id>,
) -> Result<ForestResult<Id>> {
    MaxForest::default().compute(graph)
}
