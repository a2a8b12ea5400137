//! Determinism of the forest computation.
//!
//! Repeated runs, parallel and sequential sorts, and reordered edge lists
//! (with caller indices kept) must all produce the same forest, roots, and
//! ranks.

use maxforest_test_support::ci::property_test_profile::positive_count_or;
use proptest::test_runner::{TestCaseError, TestCaseResult};
use rand::{SeedableRng, rngs::SmallRng};

use crate::{EdgeRecord, ExecutionStrategy, ForestResult, GraphSnapshot, MaxForest};

use super::{strategies::shuffle, types::ForestFixture};

/// Environment variable overriding how often each input is recomputed.
pub(super) const DETERMINISM_REPS_ENV_KEY: &str = "MAXFOREST_PBT_DETERMINISM_REPS";

/// Repetition count for the determinism property.
pub(super) struct DeterminismConfig {
    /// Number of times to repeat the computation per input.
    pub repetitions: usize,
}

impl DeterminismConfig {
    /// Reads [`DETERMINISM_REPS_ENV_KEY`], defaulting to 3. Invalid values
    /// are logged and ignored.
    pub(super) fn load() -> Self {
        Self {
            repetitions: positive_count_or(DETERMINISM_REPS_ENV_KEY, 3),
        }
    }
}

/// Runs the determinism property for the given fixture.
pub(super) fn run_determinism_property(fixture: &ForestFixture, seed: u64) -> TestCaseResult {
    let config = DeterminismConfig::load();
    let baseline = compute(fixture, ExecutionStrategy::Sequential)?;

    for run in 1..config.repetitions {
        let repeat = compute(fixture, ExecutionStrategy::Sequential)?;
        if repeat != baseline {
            return Err(TestCaseError::fail(format!(
                "run {run} diverged from the first run ({})",
                fixture.describe()
            )));
        }
    }

    if cfg!(feature = "parallel") {
        let parallel = compute(fixture, ExecutionStrategy::Parallel)?;
        if parallel != baseline {
            return Err(TestCaseError::fail(format!(
                "parallel sort diverged from sequential sort ({})",
                fixture.describe()
            )));
        }
    }

    let mut records: Vec<EdgeRecord<usize>> = fixture
        .edges
        .iter()
        .enumerate()
        .map(|(index, &(source, target, weight))| {
            EdgeRecord::with_optional_weight(index, source, target, weight)
        })
        .collect();
    shuffle(&mut records, &mut SmallRng::seed_from_u64(seed));
    let reordered = MaxForest::default()
        .compute(&GraphSnapshot::new(0..fixture.node_count, records))
        .map_err(|err| TestCaseError::fail(format!("reordered compute failed: {err}")))?;

    if reordered.selected_edge_indices() != baseline.selected_edge_indices()
        || reordered.root_of() != baseline.root_of()
        || reordered.rank_of() != baseline.rank_of()
        || reordered.tree_of() != baseline.tree_of()
    {
        return Err(TestCaseError::fail(format!(
            "reordering the edge list changed the forest ({})",
            fixture.describe()
        )));
    }
    Ok(())
}

fn compute(
    fixture: &ForestFixture,
    strategy: ExecutionStrategy,
) -> Result<ForestResult<usize>, TestCaseError> {
    fixture.compute(strategy).map_err(|err| {
        TestCaseError::fail(format!(
            "{} compute failed: {err} ({})",
            strategy.as_str(),
            fixture.describe()
        ))
    })
}
