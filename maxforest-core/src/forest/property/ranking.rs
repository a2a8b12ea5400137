//! Root and rank invariants.
//!
//! Each root carries the greatest weighted degree in its tree (lowest id on
//! ties) and the tree's highest rank; ranks step by exactly one across every
//! selected edge, so they never increase moving away from the root.

use std::collections::BTreeMap;

use proptest::test_runner::{TestCaseError, TestCaseResult};

use crate::{ExecutionStrategy, TreeId, rank::exact_sum};

use super::types::ForestFixture;

/// Runs the ranking property for the given fixture.
pub(super) fn run_ranking_property(fixture: &ForestFixture) -> TestCaseResult {
    let result = fixture
        .compute(ExecutionStrategy::Sequential)
        .map_err(|err| TestCaseError::fail(format!("compute failed: {err} ({})", fixture.describe())))?;
    let fail = |message: String| TestCaseError::fail(format!("{message} ({})", fixture.describe()));

    let mut incident: Vec<Vec<f64>> = vec![Vec::new(); fixture.node_count];
    for &index in result.selected_edge_indices() {
        let (source, target, _) = fixture.edges[index];
        let weight = fixture.effective_weight(index);
        incident[source].push(weight);
        incident[target].push(weight);

        let (Some(a), Some(b)) = (result.rank(&source), result.rank(&target)) else {
            return Err(fail(format!("edge {index} touches an unranked node")));
        };
        if a.abs_diff(b) != 1 {
            return Err(fail(format!(
                "edge {index} joins ranks {a} and {b}; tree neighbours differ by one"
            )));
        }
    }

    let degree: Vec<f64> = incident
        .iter()
        .map(|weights| exact_sum(weights.iter().copied()))
        .collect();
    let mut best: BTreeMap<TreeId, usize> = BTreeMap::new();
    for node in 0..fixture.node_count {
        let Some(tree) = result.tree(&node) else {
            return Err(fail(format!("node {node} has no tree")));
        };
        best.entry(tree)
            .and_modify(|current| {
                if degree[node].total_cmp(&degree[*current]).is_gt() {
                    *current = node;
                }
            })
            .or_insert(node);
    }

    for summary in result.trees() {
        let root = *summary.root();
        if best.get(&summary.id()) != Some(&root) {
            return Err(fail(format!(
                "tree {} is rooted at {root}, expected {:?}",
                summary.id(),
                best.get(&summary.id())
            )));
        }
        if result.rank(&root) != Some(summary.height()) {
            return Err(fail(format!(
                "root {root} has rank {:?} but tree height is {}",
                result.rank(&root),
                summary.height()
            )));
        }
    }

    for node in 0..fixture.node_count {
        let (Some(tree), Some(rank)) = (result.tree(&node), result.rank(&node)) else {
            return Err(fail(format!("node {node} is missing from the result")));
        };
        let Some(root) = result.root_of().get(&tree) else {
            return Err(fail(format!("tree {tree} has no root")));
        };
        let Some(root_rank) = result.rank(root) else {
            return Err(fail(format!("root {root} has no rank")));
        };
        if node != *root && rank >= root_rank {
            return Err(fail(format!(
                "node {node} has rank {rank}, not below root {root} at {root_rank}"
            )));
        }
    }
    Ok(())
}
