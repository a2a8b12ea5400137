//! Builder utilities for configuring [`MaxForest`].
//!
//! Every setting is an explicit named field with a documented default, and
//! validation happens once in [`MaxForestBuilder::build`] rather than on each
//! computation.

use crate::{Result, error::ForestError, maxforest::MaxForest};

/// Default edge count at which [`ExecutionStrategy::Auto`] switches to the
/// parallel sort.
pub const DEFAULT_PARALLEL_SORT_THRESHOLD: usize = 4096;

/// Selects how the edge list is sorted before greedy selection.
///
/// The comparator (weight descending, then edge index ascending) is a total
/// order over validated input, so every strategy produces identical results.
///
/// # Examples
/// ```
/// use maxforest_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::default();
/// assert_eq!(strategy, ExecutionStrategy::Auto);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExecutionStrategy {
    /// Sort in parallel when the `parallel` feature is enabled and the edge
    /// count reaches the configured threshold.
    #[default]
    Auto,
    /// Always sort on the calling thread.
    Sequential,
    /// Always sort with Rayon. Requires the `parallel` feature.
    Parallel,
}

impl ExecutionStrategy {
    /// Returns the lowercase label used in logs and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Sequential => "sequential",
            Self::Parallel => "parallel",
        }
    }
}

/// How absent or non-finite edge weights are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NonFiniteWeightPolicy {
    /// Replace the weight with zero and record a
    /// [`crate::ForestWarning::NonFiniteWeight`].
    #[default]
    SubstituteZero,
    /// Fail the computation with [`ForestError::NonFiniteWeight`].
    Reject,
}

/// Configures and constructs [`MaxForest`] instances.
///
/// # Examples
/// ```
/// use maxforest_core::{ExecutionStrategy, MaxForestBuilder, NonFiniteWeightPolicy};
///
/// let forest = MaxForestBuilder::new()
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .with_non_finite_weights(NonFiniteWeightPolicy::Reject)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(forest.execution_strategy(), ExecutionStrategy::Sequential);
/// assert_eq!(forest.non_finite_weights(), NonFiniteWeightPolicy::Reject);
/// ```
#[derive(Debug, Clone)]
pub struct MaxForestBuilder {
    execution_strategy: ExecutionStrategy,
    parallel_sort_threshold: usize,
    non_finite_weights: NonFiniteWeightPolicy,
}

impl Default for MaxForestBuilder {
    fn default() -> Self {
        Self {
            execution_strategy: ExecutionStrategy::Auto,
            parallel_sort_threshold: DEFAULT_PARALLEL_SORT_THRESHOLD,
            non_finite_weights: NonFiniteWeightPolicy::SubstituteZero,
        }
    }
}

impl MaxForestBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use maxforest_core::{ExecutionStrategy, MaxForestBuilder};
    ///
    /// let builder = MaxForestBuilder::new();
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.parallel_sort_threshold(), 4096);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the execution strategy used for the edge sort.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Overrides the edge count at which [`ExecutionStrategy::Auto`] sorts in
    /// parallel.
    ///
    /// # Examples
    /// ```
    /// use maxforest_core::MaxForestBuilder;
    ///
    /// let builder = MaxForestBuilder::new().with_parallel_sort_threshold(128);
    /// assert_eq!(builder.parallel_sort_threshold(), 128);
    /// ```
    #[must_use]
    pub fn with_parallel_sort_threshold(mut self, threshold: usize) -> Self {
        self.parallel_sort_threshold = threshold;
        self
    }

    /// Returns the configured parallel sort threshold.
    #[must_use]
    pub fn parallel_sort_threshold(&self) -> usize {
        self.parallel_sort_threshold
    }

    /// Sets the policy for absent or non-finite edge weights.
    #[must_use]
    pub fn with_non_finite_weights(mut self, policy: NonFiniteWeightPolicy) -> Self {
        self.non_finite_weights = policy;
        self
    }

    /// Returns the configured non-finite weight policy.
    #[must_use]
    pub fn non_finite_weights(&self) -> NonFiniteWeightPolicy {
        self.non_finite_weights
    }

    /// Validates the configuration and constructs a [`MaxForest`] instance.
    ///
    /// # Errors
    /// Returns [`ForestError::InvalidParallelThreshold`] when the threshold is
    /// zero and [`ForestError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use maxforest_core::{ForestError, MaxForestBuilder};
    ///
    /// let err = MaxForestBuilder::new()
    ///     .with_parallel_sort_threshold(0)
    ///     .build()
    ///     .expect_err("zero threshold is rejected");
    /// assert_eq!(err, ForestError::InvalidParallelThreshold { got: 0 });
    /// ```
    pub fn build(self) -> Result<MaxForest> {
        if self.parallel_sort_threshold == 0 {
            return Err(ForestError::InvalidParallelThreshold {
                got: self.parallel_sort_threshold,
            });
        }

        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(ForestError::BackendUnavailable {
                requested: self.execution_strategy,
            });
        }

        Ok(MaxForest::new(
            self.execution_strategy,
            self.parallel_sort_threshold,
            self.non_finite_weights,
        ))
    }
}
